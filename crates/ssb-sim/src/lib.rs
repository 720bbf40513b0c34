//! SSB Engine Simulation Library
//!
//! This crate provides an in-process stand-in for the remote engine so the
//! controller can be exercised without an SDR attached. It includes:
//!
//! - **SimulatedEngine**: answers the SDR procedures with realistic output
//!   shapes, captured warnings and exceptions, and records every call
//! - **SimulatedConnector**: hands out simulated engines, optionally
//!   pretending that shared sessions exist or that startup fails
//!
//! # Example
//!
//! ```rust
//! use ssb_bridge::{attach_or_start, procedures, Engine, EngineValue};
//! use ssb_sim::{SimulatedConnector, SimulatedEngineConfig};
//!
//! let config = SimulatedEngineConfig {
//!     ssb_frequencies: vec![1_857_850_000],
//!     ..Default::default()
//! };
//! let connector = SimulatedConnector::new(config);
//! let (mut engine, _) = attach_or_start(&connector).unwrap();
//!
//! let radios = engine
//!     .invoke(procedures::CONFIGURE_SDR, &["B210".into(), "".into()], 2)
//!     .unwrap();
//! assert_eq!(radios.outputs.len(), 2);
//! ```

pub mod connector;
pub mod engine;

pub use connector::SimulatedConnector;
pub use engine::{RecordedCall, ScriptedReply, SimulatedEngine, SimulatedEngineConfig};
