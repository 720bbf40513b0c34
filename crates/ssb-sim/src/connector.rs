//! Simulated engine connector

use std::cell::RefCell;

use ssb_bridge::{BridgeError, EngineConnector};
use tracing::debug;

use crate::engine::{SimulatedEngine, SimulatedEngineConfig};

/// Connector that hands out simulated engines
///
/// Every engine it creates is remembered so tests can inspect the session
/// the controller ended up with.
#[derive(Debug)]
pub struct SimulatedConnector {
    config: SimulatedEngineConfig,
    shared_sessions: Vec<String>,
    attach_allowed: bool,
    start_allowed: bool,
    engines: RefCell<Vec<SimulatedEngine>>,
}

impl SimulatedConnector {
    /// Create a connector with no shared sessions that can start engines
    pub fn new(config: SimulatedEngineConfig) -> Self {
        Self {
            config,
            shared_sessions: Vec::new(),
            attach_allowed: true,
            start_allowed: true,
            engines: RefCell::new(Vec::new()),
        }
    }

    /// Advertise a shared session with this name
    pub fn with_shared_session(mut self, name: impl Into<String>) -> Self {
        self.shared_sessions.push(name.into());
        self
    }

    /// Make every attach attempt fail
    pub fn refuse_attach(mut self) -> Self {
        self.attach_allowed = false;
        self
    }

    /// Make engine startup fail
    pub fn refuse_start(mut self) -> Self {
        self.start_allowed = false;
        self
    }

    /// Engines handed out so far, oldest first
    pub fn engines(&self) -> Vec<SimulatedEngine> {
        self.engines.borrow().clone()
    }

    /// The most recently handed out engine
    pub fn last_engine(&self) -> Option<SimulatedEngine> {
        self.engines.borrow().last().cloned()
    }

    fn spawn(&self, name: String) -> SimulatedEngine {
        let engine = SimulatedEngine::new(SimulatedEngineConfig {
            name,
            ..self.config.clone()
        });
        self.engines.borrow_mut().push(engine.clone());
        engine
    }
}

impl Default for SimulatedConnector {
    fn default() -> Self {
        Self::new(SimulatedEngineConfig::default())
    }
}

impl EngineConnector for SimulatedConnector {
    type Engine = SimulatedEngine;

    fn find_shared(&self) -> Vec<String> {
        self.shared_sessions.clone()
    }

    fn connect(&self, name: &str) -> Result<SimulatedEngine, BridgeError> {
        if !self.attach_allowed || !self.shared_sessions.iter().any(|s| s == name) {
            return Err(BridgeError::NoEngine(name.to_string()));
        }
        debug!("Attaching simulated engine {}", name);
        Ok(self.spawn(name.to_string()))
    }

    fn start(&self) -> Result<SimulatedEngine, BridgeError> {
        if !self.start_allowed {
            return Err(BridgeError::StartFailed(
                "simulated engine startup disabled".to_string(),
            ));
        }
        let name = format!("{}-{}", self.config.name, self.engines.borrow().len() + 1);
        debug!("Starting simulated engine {}", name);
        Ok(self.spawn(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssb_bridge::{attach_or_start, Engine, EngineOrigin};

    #[test]
    fn test_start_names_engines() {
        let connector = SimulatedConnector::default();
        let (first, origin) = attach_or_start(&connector).unwrap();
        let (second, _) = attach_or_start(&connector).unwrap();

        assert_eq!(origin, EngineOrigin::Started);
        assert_eq!(first.name(), "sim-1");
        assert_eq!(second.name(), "sim-2");
        assert_eq!(connector.engines().len(), 2);
    }

    #[test]
    fn test_attach_to_shared() {
        let connector = SimulatedConnector::default().with_shared_session("MATLAB_1234");
        let (engine, origin) = attach_or_start(&connector).unwrap();

        assert_eq!(origin, EngineOrigin::Attached("MATLAB_1234".to_string()));
        assert_eq!(engine.name(), "MATLAB_1234");
    }

    #[test]
    fn test_refused_attach_falls_back_to_start() {
        let connector = SimulatedConnector::default()
            .with_shared_session("MATLAB_1234")
            .refuse_attach();
        let (_, origin) = attach_or_start(&connector).unwrap();

        assert_eq!(origin, EngineOrigin::Started);
    }

    #[test]
    fn test_refused_start() {
        let connector = SimulatedConnector::default().refuse_start();
        assert!(matches!(
            attach_or_start(&connector),
            Err(BridgeError::StartFailed(_))
        ));
        assert!(connector.last_engine().is_none());
    }
}
