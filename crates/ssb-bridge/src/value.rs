//! Values exchanged with the engine
//!
//! The engine is dynamically typed: every numeric value is a double
//! matrix, and a `1×1` matrix is handed back as a bare scalar. These types
//! make that shape explicit so callers can match on it instead of probing.

/// Opaque reference to an object living in the engine workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectHandle(pub u64);

impl ObjectHandle {
    /// Get the raw handle value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Row-major double matrix
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumericArray {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl NumericArray {
    /// Create a matrix from row-major data
    ///
    /// Returns `None` if `data` does not hold exactly `rows × cols` values.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        (rows.checked_mul(cols)? == data.len()).then_some(Self { rows, cols, data })
    }

    /// The `0×0` matrix
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        }
    }

    /// A `1×n` row vector
    pub fn row(data: Vec<f64>) -> Self {
        Self {
            rows: 1,
            cols: data.len(),
            data,
        }
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the matrix holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True for a `1×n` matrix
    pub fn is_row(&self) -> bool {
        self.rows == 1
    }

    /// Row-major element data
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Consume the matrix, returning its row-major data
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }
}

/// A value passed to or returned from an engine procedure
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineValue {
    /// Bare double
    Scalar(f64),
    /// Double matrix (including the empty `0×0` matrix)
    Array(NumericArray),
    /// Logical
    Bool(bool),
    /// Character vector
    Text(String),
    /// Object in the engine workspace
    Handle(ObjectHandle),
}

impl EngineValue {
    /// Row vector of frequencies in Hz
    pub fn frequencies(hz: &[u64]) -> Self {
        EngineValue::Array(NumericArray::row(hz.iter().map(|&f| f as f64).collect()))
    }

    /// The empty numeric container
    pub fn empty() -> Self {
        EngineValue::Array(NumericArray::empty())
    }

    /// Short name of the value's type, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            EngineValue::Scalar(_) => "scalar",
            EngineValue::Array(a) if a.is_empty() => "empty array",
            EngineValue::Array(_) => "array",
            EngineValue::Bool(_) => "logical",
            EngineValue::Text(_) => "text",
            EngineValue::Handle(_) => "handle",
        }
    }

    /// Get the handle, if this is one
    pub fn as_handle(&self) -> Option<ObjectHandle> {
        match self {
            EngineValue::Handle(h) => Some(*h),
            _ => None,
        }
    }

    /// Get the text, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            EngineValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for EngineValue {
    fn from(value: f64) -> Self {
        EngineValue::Scalar(value)
    }
}

impl From<bool> for EngineValue {
    fn from(value: bool) -> Self {
        EngineValue::Bool(value)
    }
}

impl From<&str> for EngineValue {
    fn from(value: &str) -> Self {
        EngineValue::Text(value.to_string())
    }
}

impl From<String> for EngineValue {
    fn from(value: String) -> Self {
        EngineValue::Text(value)
    }
}

impl From<ObjectHandle> for EngineValue {
    fn from(value: ObjectHandle) -> Self {
        EngineValue::Handle(value)
    }
}
