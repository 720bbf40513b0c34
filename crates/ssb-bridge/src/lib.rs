//! Engine Bridge
//!
//! This crate defines how the radio controller talks to the remote
//! numerical engine that owns the SDR driver and the SSB signal
//! processing. The engine is an RPC-style collaborator:
//!
//! - **Engine**: a live session; runs named procedures with positional
//!   arguments and returns positional outputs plus captured output text
//! - **EngineConnector**: finds shared sessions, attaches to them, or
//!   starts a new engine
//! - **EngineValue**: the dynamically shaped values crossing the boundary
//!
//! # Example
//!
//! ```rust,no_run
//! use ssb_bridge::{attach_or_start, Engine, EngineConnector, EngineValue};
//!
//! fn ping<C: EngineConnector>(connector: &C) -> Result<(), ssb_bridge::BridgeError> {
//!     let (mut engine, origin) = attach_or_start(connector)?;
//!     println!("engine {} ({:?})", engine.name(), origin);
//!     engine.invoke("disp", &[EngineValue::from("hello")], 0)?;
//!     engine.quit()
//! }
//! ```

pub mod connect;
pub mod engine;
pub mod error;
pub mod procedures;
pub mod value;

pub use connect::{attach_or_start, EngineOrigin};
pub use engine::{Engine, EngineConnector, Invocation};
pub use error::BridgeError;
pub use value::{EngineValue, NumericArray, ObjectHandle};
