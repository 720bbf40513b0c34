//! SSB frequency sweep
//!
//! The engine's sweep procedure returns `[frequencies, timestamps]` whose
//! shape depends on how many SSBs it found: an empty `0×0` matrix for
//! none, bare scalars for exactly one, and row vectors for several.
//! [`DetectionReply`] names those three shapes; everything past it sees
//! only [`SweepResult`].

use ssb_bridge::{procedures, Engine, EngineValue, NumericArray};
use ssb_raster::{channels_to_frequencies, ChannelNumber};
use tracing::{debug, info};

use crate::error::ControlError;
use crate::session::SessionManager;
use crate::settings::ControlSettings;

/// Capture duration passed to the sweep procedure (engine-defined unit)
pub const DEFAULT_CAPTURE_DURATION: f64 = 40.0;

/// SSBs found by a sweep
///
/// `frequencies[i]` was first detected at `timestamps[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepResult {
    /// Detected SSB frequencies in Hz, in sweep order
    pub frequencies: Vec<u64>,
    /// First detection time of each SSB in seconds
    pub timestamps: Vec<f64>,
}

impl SweepResult {
    /// Number of detections
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True when nothing was detected
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// `(frequency, timestamp)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.timestamps.iter().copied())
    }
}

/// Raw sweep reply, tagged by shape
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionReply {
    /// Empty matrices: nothing detected
    None,
    /// Scalars: exactly one detection
    Single { frequency: f64, timestamp: f64 },
    /// Vectors: one or more detections
    Multiple {
        frequencies: Vec<f64>,
        timestamps: Vec<f64>,
    },
}

impl DetectionReply {
    /// Classify the two sweep outputs by shape
    pub fn from_outputs(
        frequencies: EngineValue,
        timestamps: EngineValue,
    ) -> Result<Self, ControlError> {
        let malformed =
            |reason: String| ControlError::malformed(procedures::FREQUENCY_SWEEP, reason);

        match (frequencies, timestamps) {
            (EngineValue::Array(f), EngineValue::Array(t)) if f.is_empty() => {
                if t.is_empty() {
                    Ok(Self::None)
                } else {
                    Err(malformed(format!(
                        "no frequencies but {} timestamp(s)",
                        t.len()
                    )))
                }
            }
            (EngineValue::Scalar(frequency), EngineValue::Scalar(timestamp)) => {
                Ok(Self::Single {
                    frequency,
                    timestamp,
                })
            }
            (EngineValue::Array(f), EngineValue::Array(t)) => {
                let frequencies = vector_data(f).map_err(&malformed)?;
                let timestamps = vector_data(t).map_err(&malformed)?;
                if frequencies.len() != timestamps.len() {
                    return Err(malformed(format!(
                        "{} frequencies but {} timestamps",
                        frequencies.len(),
                        timestamps.len()
                    )));
                }
                Ok(Self::Multiple {
                    frequencies,
                    timestamps,
                })
            }
            (f, t) => Err(malformed(format!(
                "unexpected output types {} and {}",
                f.kind(),
                t.kind()
            ))),
        }
    }

    /// Number of detections
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Single { .. } => 1,
            Self::Multiple { frequencies, .. } => frequencies.len(),
        }
    }

    /// True when nothing was detected
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to the uniform result, truncating frequencies to whole Hz
    pub fn normalize(self) -> Result<SweepResult, ControlError> {
        match self {
            Self::None => Ok(SweepResult::default()),
            Self::Single {
                frequency,
                timestamp,
            } => Ok(SweepResult {
                frequencies: vec![to_hz(frequency)?],
                timestamps: vec![timestamp],
            }),
            Self::Multiple {
                frequencies,
                timestamps,
            } => Ok(SweepResult {
                frequencies: frequencies
                    .into_iter()
                    .map(to_hz)
                    .collect::<Result<_, _>>()?,
                timestamps,
            }),
        }
    }
}

/// Elements of a row or column vector
fn vector_data(array: NumericArray) -> Result<Vec<f64>, String> {
    match array.shape() {
        (1, _) | (_, 1) => Ok(array.into_data()),
        (rows, cols) => Err(format!("expected a vector, got a {}x{} matrix", rows, cols)),
    }
}

fn to_hz(value: f64) -> Result<u64, ControlError> {
    if value.is_finite() && value >= 0.0 && value < u64::MAX as f64 {
        Ok(value.trunc() as u64)
    } else {
        Err(ControlError::malformed(
            procedures::FREQUENCY_SWEEP,
            format!("invalid detected frequency {}", value),
        ))
    }
}

/// Runs SSB sweeps on a configured radio
#[derive(Debug, Clone)]
pub struct SweepCoordinator {
    capture_duration: f64,
}

impl SweepCoordinator {
    /// Create a coordinator with the default capture duration
    pub fn new() -> Self {
        Self::with_capture_duration(DEFAULT_CAPTURE_DURATION)
    }

    /// Create a coordinator with a custom capture duration
    pub fn with_capture_duration(capture_duration: f64) -> Self {
        Self { capture_duration }
    }

    /// Create a coordinator from settings
    pub fn from_settings(settings: &ControlSettings) -> Self {
        Self::with_capture_duration(settings.capture_duration)
    }

    /// Capture duration passed to the engine
    pub fn capture_duration(&self) -> f64 {
        self.capture_duration
    }

    /// Sweep the given frequencies (Hz) for SSBs
    pub fn frequency_sweep<E: Engine>(
        &self,
        session: &mut SessionManager<E>,
        frequencies: &[u64],
    ) -> Result<SweepResult, ControlError> {
        let mut radio = session.configured()?;
        let rx = radio.rx();

        info!("Sweeping {} frequencies for SSBs", frequencies.len());
        let call = radio.invoke(
            procedures::FREQUENCY_SWEEP,
            &[
                EngineValue::Handle(rx),
                EngineValue::frequencies(frequencies),
                EngineValue::Scalar(self.capture_duration),
            ],
            procedures::FREQUENCY_SWEEP_NARGOUT,
        )?;

        if !call.stdout.is_empty() {
            debug!("Sweep output: {:?}", call.stdout);
        }

        let [found, first_seen] = call.into_outputs::<2>().ok_or_else(|| {
            ControlError::malformed(procedures::FREQUENCY_SWEEP, "expected two outputs")
        })?;

        let reply = DetectionReply::from_outputs(found, first_seen)?;
        match reply.len() {
            0 => info!("No SSBs found"),
            1 => info!("Found 1 SSB"),
            n => info!("Found {} SSBs", n),
        }

        reply.normalize()
    }

    /// Convert channel numbers to frequencies and sweep them
    ///
    /// The whole list is validated before the radio is touched.
    pub fn sweep_channels<E: Engine>(
        &self,
        session: &mut SessionManager<E>,
        channels: &[ChannelNumber],
    ) -> Result<SweepResult, ControlError> {
        if !session.is_configured() {
            return Err(ControlError::NotConfigured);
        }
        let frequencies = channels_to_frequencies(channels)?;
        self.frequency_sweep(session, &frequencies)
    }
}

impl Default for SweepCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(data: &[f64]) -> EngineValue {
        EngineValue::Array(NumericArray::row(data.to_vec()))
    }

    #[test]
    fn test_empty_reply() {
        let reply = DetectionReply::from_outputs(EngineValue::empty(), EngineValue::empty());
        assert_eq!(reply, Ok(DetectionReply::None));
        assert_eq!(reply.unwrap().normalize().unwrap(), SweepResult::default());
    }

    #[test]
    fn test_scalar_reply() {
        let reply = DetectionReply::from_outputs(
            EngineValue::Scalar(1_857_850_000.0),
            EngineValue::Scalar(0.25),
        )
        .unwrap();
        let result = reply.normalize().unwrap();

        assert_eq!(result.frequencies, vec![1_857_850_000]);
        assert_eq!(result.timestamps, vec![0.25]);
    }

    #[test]
    fn test_row_reply() {
        let reply = DetectionReply::from_outputs(
            row(&[775_250_000.0, 2_115_850_000.0]),
            row(&[0.01, 0.05]),
        )
        .unwrap();

        assert_eq!(reply.len(), 2);
        let result = reply.normalize().unwrap();
        assert_eq!(
            result.iter().collect::<Vec<_>>(),
            vec![(775_250_000, 0.01), (2_115_850_000, 0.05)]
        );
    }

    #[test]
    fn test_column_vectors_accepted() {
        let column =
            |data: Vec<f64>| EngineValue::Array(NumericArray::new(data.len(), 1, data).unwrap());
        let reply = DetectionReply::from_outputs(
            column(vec![1.0, 2.0, 3.0]),
            column(vec![0.1, 0.2, 0.3]),
        )
        .unwrap();
        assert_eq!(reply.len(), 3);
    }

    #[test]
    fn test_matrix_rejected() {
        let matrix =
            EngineValue::Array(NumericArray::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap());
        let result = DetectionReply::from_outputs(matrix.clone(), matrix);
        assert!(matches!(result, Err(ControlError::MalformedReply { .. })));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = DetectionReply::from_outputs(row(&[1.0, 2.0]), row(&[0.1]));
        assert!(matches!(result, Err(ControlError::MalformedReply { .. })));
    }

    #[test]
    fn test_mixed_shapes_rejected() {
        let result = DetectionReply::from_outputs(EngineValue::Scalar(1.0), row(&[0.1]));
        assert!(matches!(result, Err(ControlError::MalformedReply { .. })));

        let result = DetectionReply::from_outputs(EngineValue::empty(), row(&[0.1]));
        assert!(matches!(result, Err(ControlError::MalformedReply { .. })));
    }

    #[test]
    fn test_invalid_frequency_rejected() {
        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            let reply = DetectionReply::Single {
                frequency: bad,
                timestamp: 0.0,
            };
            assert!(matches!(
                reply.normalize(),
                Err(ControlError::MalformedReply { .. })
            ));
        }
    }

    #[test]
    fn test_fractional_hz_truncated() {
        let reply = DetectionReply::Single {
            frequency: 1_857_850_000.9,
            timestamp: 0.0,
        };
        assert_eq!(reply.normalize().unwrap().frequencies, vec![1_857_850_000]);
    }
}
