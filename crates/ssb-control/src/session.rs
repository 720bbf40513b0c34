//! Radio session lifecycle
//!
//! A [`SessionManager`] owns one engine connection and at most one
//! configured radio. It moves through
//! `Unattached → Attached → Configured → Closed`; the radio handles are
//! only reachable through [`SessionManager::configured`], which fails
//! unless the session is `Configured`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use ssb_bridge::{
    attach_or_start, procedures, Engine, EngineConnector, EngineOrigin, EngineValue, Invocation,
    ObjectHandle,
};
use tracing::{debug, info, warn};

use crate::classifier::classify;
use crate::error::ControlError;
use crate::settings::ControlSettings;

/// Lifecycle state of a radio session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No engine connection yet
    Unattached,
    /// Engine connected, no radio configured
    Attached,
    /// Radio configured, handles valid
    Configured,
    /// Engine released; terminal
    Closed,
}

impl SessionState {
    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unattached => "Unattached",
            Self::Attached => "Attached",
            Self::Configured => "Configured",
            Self::Closed => "Closed",
        }
    }
}

/// Which radio to ask the engine for
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RadioSelector {
    /// Let the engine pick the first radio it finds
    #[default]
    Auto,
    /// A specific radio by serial number
    Serial(String),
}

impl RadioSelector {
    /// Serial number argument for discovery (empty for auto-select)
    pub fn serial_number(&self) -> &str {
        match self {
            Self::Auto => "",
            Self::Serial(sn) => sn,
        }
    }
}

impl From<&KnownRadio> for RadioSelector {
    fn from(radio: &KnownRadio) -> Self {
        Self::Serial(radio.serial_number.clone())
    }
}

/// A radio the operator expects to be plugged in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownRadio {
    /// Display label
    pub label: String,
    /// Serial number passed to discovery
    pub serial_number: String,
}

/// The radio side of a session
#[derive(Debug, Clone, PartialEq)]
pub struct RadioSession {
    platform: String,
    serial_number: String,
    rx: Option<ObjectHandle>,
    tx: Option<ObjectHandle>,
    state: SessionState,
}

impl RadioSession {
    fn new() -> Self {
        Self {
            platform: String::new(),
            serial_number: String::new(),
            rx: None,
            tx: None,
            state: SessionState::Unattached,
        }
    }

    /// Platform of the configured radio
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Serial number requested at discovery (empty for auto-select)
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// `(rx, tx)` handles, only while configured
    pub fn handles(&self) -> Option<(ObjectHandle, ObjectHandle)> {
        match (self.state, self.rx, self.tx) {
            (SessionState::Configured, Some(rx), Some(tx)) => Some((rx, tx)),
            _ => None,
        }
    }

    fn clear_radio(&mut self) {
        self.rx = None;
        self.tx = None;
    }
}

/// Access to the engine and radio handles of a configured session
pub struct ConfiguredRadio<'a, E: Engine> {
    engine: &'a mut E,
    rx: ObjectHandle,
    tx: ObjectHandle,
}

impl<E: Engine> ConfiguredRadio<'_, E> {
    /// Receive handle
    pub fn rx(&self) -> ObjectHandle {
        self.rx
    }

    /// Transmit handle
    pub fn tx(&self) -> ObjectHandle {
        self.tx
    }

    /// Run a procedure on the session's engine
    pub fn invoke(
        &mut self,
        procedure: &str,
        args: &[EngineValue],
        nargout: usize,
    ) -> Result<Invocation, ControlError> {
        debug!("Invoking {} (nargout={})", procedure, nargout);
        self.engine
            .invoke(procedure, args, nargout)
            .map_err(|e| ControlError::EngineExecution(e.to_string()))
    }
}

/// Owner of the engine connection and the configured radio
///
/// Dropping the manager closes it, so the engine is released on every
/// exit path. [`close`](Self::close) may also be called explicitly and is
/// idempotent.
pub struct SessionManager<E: Engine> {
    procedure_root: PathBuf,
    engine: Option<E>,
    origin: Option<EngineOrigin>,
    session: RadioSession,
}

impl<E: Engine> SessionManager<E> {
    /// Create an unattached manager
    ///
    /// `procedure_root` is registered (with all subdirectories) on the
    /// engine search path when the engine is attached.
    pub fn new(procedure_root: impl Into<PathBuf>) -> Self {
        Self {
            procedure_root: procedure_root.into(),
            engine: None,
            origin: None,
            session: RadioSession::new(),
        }
    }

    /// Attach to or start an engine and return an `Attached` manager
    pub fn open<C>(
        connector: &C,
        procedure_root: impl Into<PathBuf>,
    ) -> Result<Self, ControlError>
    where
        C: EngineConnector<Engine = E>,
    {
        let mut manager = Self::new(procedure_root);
        manager.attach(connector)?;
        Ok(manager)
    }

    /// [`open`](Self::open) using the procedure root from settings
    pub fn open_with_settings<C>(
        connector: &C,
        settings: &ControlSettings,
    ) -> Result<Self, ControlError>
    where
        C: EngineConnector<Engine = E>,
    {
        Self::open(connector, settings.resolved_procedure_root())
    }

    /// Attach to a shared engine session or start a new one
    ///
    /// Only valid while `Unattached`.
    pub fn attach<C>(&mut self, connector: &C) -> Result<(), ControlError>
    where
        C: EngineConnector<Engine = E>,
    {
        if self.session.state != SessionState::Unattached {
            return Err(ControlError::EngineStart(format!(
                "session is already {}",
                self.session.state.name()
            )));
        }

        let (mut engine, origin) =
            attach_or_start(connector).map_err(|e| ControlError::EngineStart(e.to_string()))?;

        if let Err(e) = register_search_path(&mut engine, &self.procedure_root) {
            // The engine is ours now; release it before reporting
            if let Err(quit_err) = engine.quit() {
                warn!("Failed to quit engine after setup error: {}", quit_err);
            }
            return Err(e);
        }

        info!("Engine {} ready ({:?})", engine.name(), origin);
        self.engine = Some(engine);
        self.origin = Some(origin);
        self.session.state = SessionState::Attached;
        Ok(())
    }

    /// Configure a radio through the engine
    ///
    /// `serial_number` selects a specific radio; an empty string lets the
    /// engine pick. On success the session is `Configured`. On failure any
    /// previously configured radio is dropped and the session stays
    /// `Attached`.
    pub fn discover_radio(
        &mut self,
        platform: &str,
        serial_number: &str,
    ) -> Result<(), ControlError> {
        let engine = match (self.session.state, self.engine.as_mut()) {
            (SessionState::Attached | SessionState::Configured, Some(engine)) => engine,
            (state, _) => {
                return Err(ControlError::Configuration(format!(
                    "no engine attached (session is {})",
                    state.name()
                )))
            }
        };

        if self.session.state == SessionState::Configured {
            info!("Reconfiguring radio; releasing previous handles");
        }
        self.session.clear_radio();
        self.session.state = SessionState::Attached;

        info!(
            "Discovering {} radio (serial: {})",
            platform,
            if serial_number.is_empty() { "auto" } else { serial_number }
        );

        let call = engine
            .invoke(
                procedures::CONFIGURE_SDR,
                &[platform.into(), serial_number.into()],
                procedures::CONFIGURE_SDR_NARGOUT,
            )
            .map_err(|e| ControlError::Configuration(e.to_string()))?;

        classify(&call.stdout, &call.stderr).map_err(ControlError::RadioNotFound)?;

        let [rx, tx] = call.into_outputs::<2>().ok_or_else(|| {
            ControlError::malformed(procedures::CONFIGURE_SDR, "expected two outputs")
        })?;
        let (Some(rx), Some(tx)) = (rx.as_handle(), tx.as_handle()) else {
            return Err(ControlError::malformed(
                procedures::CONFIGURE_SDR,
                format!("expected radio handles, got {} and {}", rx.kind(), tx.kind()),
            ));
        };

        self.session.platform = platform.to_string();
        self.session.serial_number = serial_number.to_string();
        self.session.rx = Some(rx);
        self.session.tx = Some(tx);
        self.session.state = SessionState::Configured;

        info!("Radio configured: rx={} tx={}", rx.as_u64(), tx.as_u64());
        Ok(())
    }

    /// [`discover_radio`](Self::discover_radio) with a [`RadioSelector`]
    pub fn discover(
        &mut self,
        platform: &str,
        selector: &RadioSelector,
    ) -> Result<(), ControlError> {
        self.discover_radio(platform, selector.serial_number())
    }

    /// Engine and radio handles, if a radio is configured
    pub fn configured(&mut self) -> Result<ConfiguredRadio<'_, E>, ControlError> {
        match (self.session.handles(), self.engine.as_mut()) {
            (Some((rx, tx)), Some(engine)) => Ok(ConfiguredRadio { engine, rx, tx }),
            _ => Err(ControlError::NotConfigured),
        }
    }

    /// Release the engine session
    ///
    /// Calls the engine's quit exactly once over the manager's lifetime.
    /// Calling it again is a no-op.
    pub fn close(&mut self) {
        if self.session.state == SessionState::Closed {
            return;
        }

        if let Some(mut engine) = self.engine.take() {
            info!("Closing engine session {}", engine.name());
            if let Err(e) = engine.quit() {
                warn!("Engine quit failed: {}", e);
            }
        }

        self.session.clear_radio();
        self.session.state = SessionState::Closed;
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.session.state
    }

    /// True when a radio is configured
    pub fn is_configured(&self) -> bool {
        self.session.state == SessionState::Configured
    }

    /// The radio session
    pub fn session(&self) -> &RadioSession {
        &self.session
    }

    /// How the engine connection was obtained
    pub fn origin(&self) -> Option<&EngineOrigin> {
        self.origin.as_ref()
    }

    /// Directory registered on the engine search path
    pub fn procedure_root(&self) -> &Path {
        &self.procedure_root
    }
}

impl<E: Engine> Drop for SessionManager<E> {
    fn drop(&mut self) {
        self.close();
    }
}

/// `addpath(genpath(root))`
fn register_search_path<E: Engine>(engine: &mut E, root: &Path) -> Result<(), ControlError> {
    let root = root.to_string_lossy().into_owned();
    debug!("Registering engine search path {}", root);

    let start_err = |e: ssb_bridge::BridgeError| ControlError::EngineStart(e.to_string());

    let [paths] = engine
        .invoke(procedures::GENPATH, &[EngineValue::Text(root)], 1)
        .map_err(start_err)?
        .into_outputs::<1>()
        .ok_or_else(|| ControlError::EngineStart("genpath returned no path".to_string()))?;

    engine
        .invoke(procedures::ADDPATH, &[paths], 0)
        .map_err(start_err)?;
    Ok(())
}
