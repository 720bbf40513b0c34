//! SSB jamming dispatch

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ssb_bridge::{procedures, Engine, EngineValue};
use tracing::info;

use crate::error::ControlError;
use crate::session::SessionManager;

/// Jamming waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttackMode {
    /// Jam only the SSB symbols, timed from the received signal
    #[default]
    Smart,
    /// Continuous wideband noise on the SSB frequency
    Dumb,
    /// Smart timing with an OFDM jamming waveform
    Ofdm,
}

/// Engine procedure a mode runs, with its mode-specific arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JamProcedure {
    /// `smartSSBJam`, optionally with the OFDM waveform generator
    Smart { ofdm: bool },
    /// `dumbSSBJam`
    Dumb,
}

impl JamProcedure {
    /// Engine procedure name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Smart { .. } => procedures::SMART_SSB_JAM,
            Self::Dumb => procedures::DUMB_SSB_JAM,
        }
    }
}

impl AttackMode {
    /// All modes, in menu order
    pub const ALL: [AttackMode; 3] = [AttackMode::Smart, AttackMode::Dumb, AttackMode::Ofdm];

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Smart => "SMART",
            Self::Dumb => "DUMB",
            Self::Ofdm => "OFDM",
        }
    }

    /// Get description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Smart => "Smart SSB jamming",
            Self::Dumb => "Dumb SSB jamming",
            Self::Ofdm => "OFDM SSB jamming",
        }
    }

    /// The engine procedure this mode runs
    pub fn procedure(&self) -> JamProcedure {
        match self {
            Self::Smart => JamProcedure::Smart { ofdm: false },
            Self::Dumb => JamProcedure::Dumb,
            Self::Ofdm => JamProcedure::Smart { ofdm: true },
        }
    }

    /// Parse a 1-based menu choice (`"1"` = SMART)
    pub fn from_menu_choice(choice: &str) -> Result<Self, ControlError> {
        choice
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| ControlError::InvalidMode(choice.to_string()))
    }
}

impl fmt::Display for AttackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AttackMode {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ControlError::InvalidMode(s.to_string()))
    }
}

/// A fully specified attack, owned by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackConfig {
    /// Jamming waveform
    pub mode: AttackMode,
    /// Target SSB frequency in Hz
    pub frequency_hz: u64,
    /// Jamming duration in seconds
    pub duration_s: u64,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            mode: AttackMode::Smart,
            frequency_hz: 1_857_850_000, // n3, ARFCN 371570
            duration_s: 10,
        }
    }
}

impl fmt::Display for AttackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {:.3} MHz for {} s",
            self.mode,
            self.frequency_hz as f64 / 1_000_000.0,
            self.duration_s
        )
    }
}

/// Runs jamming attacks on a configured radio
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackDispatcher;

impl AttackDispatcher {
    /// Create a dispatcher
    pub fn new() -> Self {
        Self
    }

    /// Jam `frequency_hz` for `duration_s` seconds using `mode`
    ///
    /// Blocks until the engine finishes transmitting.
    pub fn run_attack<E: Engine>(
        &self,
        session: &mut SessionManager<E>,
        frequency_hz: u64,
        duration_s: u64,
        mode: AttackMode,
    ) -> Result<(), ControlError> {
        let mut radio = session.configured()?;
        let procedure = mode.procedure();

        let mut args = vec![
            EngineValue::Handle(radio.rx()),
            EngineValue::Handle(radio.tx()),
            EngineValue::Scalar(frequency_hz as f64),
            EngineValue::Scalar(duration_s as f64),
        ];
        match procedure {
            JamProcedure::Smart { ofdm } => args.push(EngineValue::Bool(ofdm)),
            JamProcedure::Dumb => {}
        }

        info!(
            "Starting {} attack on {} Hz for {} s",
            mode, frequency_hz, duration_s
        );
        radio.invoke(procedure.name(), &args, 0)?;
        info!("{} attack finished", mode);
        Ok(())
    }

    /// Run the attack described by `config`
    pub fn run<E: Engine>(
        &self,
        session: &mut SessionManager<E>,
        config: &AttackConfig,
    ) -> Result<(), ControlError> {
        self.run_attack(session, config.frequency_hz, config.duration_s, config.mode)
    }
}
