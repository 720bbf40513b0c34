//! Engine call contract
//!
//! The controller depends only on this narrow interface: call a named
//! procedure with positional arguments and an expected output count, and
//! get back the outputs together with whatever the engine printed.

use crate::error::BridgeError;
use crate::value::EngineValue;

/// Result of one engine call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    /// Positional outputs, `nargout` of them on success
    pub outputs: Vec<EngineValue>,
    /// Text the engine wrote to its output stream during the call
    pub stdout: String,
    /// Text the engine wrote to its error stream during the call
    pub stderr: String,
}

impl Invocation {
    /// A call that produced the given outputs and printed nothing
    pub fn with_outputs(outputs: Vec<EngineValue>) -> Self {
        Self {
            outputs,
            ..Default::default()
        }
    }

    /// Take exactly `N` outputs, or `None` if the count differs
    pub fn into_outputs<const N: usize>(self) -> Option<[EngineValue; N]> {
        self.outputs.try_into().ok()
    }
}

/// A live connection to the engine
///
/// Calls are blocking round trips. Implementations do not need to be
/// thread-safe: a connection has a single owner.
pub trait Engine {
    /// Identifier of the engine session (shared session name or process tag)
    fn name(&self) -> &str;

    /// Run `procedure` with `args`, expecting `nargout` outputs
    fn invoke(
        &mut self,
        procedure: &str,
        args: &[EngineValue],
        nargout: usize,
    ) -> Result<Invocation, BridgeError>;

    /// Terminate the engine session
    fn quit(&mut self) -> Result<(), BridgeError>;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn invoke(
        &mut self,
        procedure: &str,
        args: &[EngineValue],
        nargout: usize,
    ) -> Result<Invocation, BridgeError> {
        (**self).invoke(procedure, args, nargout)
    }

    fn quit(&mut self) -> Result<(), BridgeError> {
        (**self).quit()
    }
}

/// Locates, attaches to, or starts engine sessions
pub trait EngineConnector {
    /// Connection type produced by this connector
    type Engine: Engine;

    /// Names of shared engine sessions that are already running
    fn find_shared(&self) -> Vec<String>;

    /// Attach to a running shared session
    fn connect(&self, name: &str) -> Result<Self::Engine, BridgeError>;

    /// Start a fresh engine session
    fn start(&self) -> Result<Self::Engine, BridgeError>;
}
