//! SSB Radio Controller
//!
//! This crate drives an SDR through the remote signal-processing engine to
//! find 5G NR synchronization signal blocks and jam them.
//!
//! # Architecture
//!
//! - **SessionManager**: owns the engine connection and the configured
//!   radio; `Unattached → Attached → Configured → Closed`
//! - **SweepCoordinator**: sweeps frequencies for SSBs and normalizes the
//!   engine's cardinality-dependent reply into a [`SweepResult`]
//! - **AttackDispatcher**: runs a jamming waveform selected by
//!   [`AttackMode`]
//! - **classify**: turns text the engine printed into typed errors
//!
//! Channel numbers are converted with [`ssb_raster`] before sweeping.
//!
//! # Example
//!
//! ```rust,no_run
//! use ssb_control::{
//!     AttackDispatcher, AttackMode, ControlSettings, SessionManager, SweepCoordinator,
//! };
//! use ssb_raster::arfcns_to_frequencies;
//! use ssb_sim::SimulatedConnector;
//!
//! let settings = ControlSettings::load();
//! let connector = SimulatedConnector::default();
//! let mut session = SessionManager::open_with_settings(&connector, &settings)?;
//! session.discover_radio(&settings.platform, "")?;
//!
//! let frequencies = arfcns_to_frequencies(&[155_050, 371_570, 628_032])?;
//! let sweeper = SweepCoordinator::from_settings(&settings);
//! let result = sweeper.frequency_sweep(&mut session, &frequencies)?;
//!
//! if let Some((hz, _)) = result.iter().next() {
//!     AttackDispatcher::new().run_attack(&mut session, hz, 10, AttackMode::Smart)?;
//! }
//! session.close();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod attack;
pub mod classifier;
pub mod error;
pub mod session;
pub mod settings;
pub mod sweep;

pub use attack::{AttackConfig, AttackDispatcher, AttackMode, JamProcedure};
pub use classifier::{classify, ClassifiedError, WARNING_MARKER};
pub use error::{ControlError, SettingsError};
pub use session::{
    ConfiguredRadio, KnownRadio, RadioSelector, RadioSession, SessionManager, SessionState,
};
pub use settings::ControlSettings;
pub use sweep::{DetectionReply, SweepCoordinator, SweepResult, DEFAULT_CAPTURE_DURATION};

pub use ssb_raster::{ChannelNumber, RasterError};
