//! Engine session negotiation
//!
//! Prefer attaching to a session someone already shared. Only start a new
//! engine when no shared session exists or none of them accepts the
//! connection.

use tracing::{debug, info, warn};

use crate::engine::EngineConnector;
use crate::error::BridgeError;

/// How an engine connection was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOrigin {
    /// Attached to the named shared session
    Attached(String),
    /// Started a new engine
    Started,
}

/// Attach to the first reachable shared session, or start a new engine
pub fn attach_or_start<C: EngineConnector>(
    connector: &C,
) -> Result<(C::Engine, EngineOrigin), BridgeError> {
    let sessions = connector.find_shared();

    if sessions.is_empty() {
        debug!("No shared engine sessions found");
    } else {
        info!("Found {} shared engine session(s): {:?}", sessions.len(), sessions);
    }

    for name in &sessions {
        match connector.connect(name) {
            Ok(engine) => {
                info!("Attached to shared engine session {}", name);
                return Ok((engine, EngineOrigin::Attached(name.clone())));
            }
            Err(e) => warn!("Failed to attach to engine session {}: {}", name, e),
        }
    }

    info!("Starting engine");
    let engine = connector.start()?;
    Ok((engine, EngineOrigin::Started))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::engine::{Engine, Invocation};
    use crate::value::EngineValue;

    struct NullEngine(String);

    impl Engine for NullEngine {
        fn name(&self) -> &str {
            &self.0
        }

        fn invoke(
            &mut self,
            _procedure: &str,
            _args: &[EngineValue],
            _nargout: usize,
        ) -> Result<Invocation, BridgeError> {
            Ok(Invocation::default())
        }

        fn quit(&mut self) -> Result<(), BridgeError> {
            Ok(())
        }
    }

    struct FakeConnector {
        shared: Vec<String>,
        reachable: Vec<String>,
        can_start: bool,
        starts: Cell<usize>,
    }

    impl FakeConnector {
        fn new(shared: &[&str], reachable: &[&str], can_start: bool) -> Self {
            Self {
                shared: shared.iter().map(|s| s.to_string()).collect(),
                reachable: reachable.iter().map(|s| s.to_string()).collect(),
                can_start,
                starts: Cell::new(0),
            }
        }
    }

    impl EngineConnector for FakeConnector {
        type Engine = NullEngine;

        fn find_shared(&self) -> Vec<String> {
            self.shared.clone()
        }

        fn connect(&self, name: &str) -> Result<NullEngine, BridgeError> {
            if self.reachable.iter().any(|r| r == name) {
                Ok(NullEngine(name.to_string()))
            } else {
                Err(BridgeError::NoEngine(name.to_string()))
            }
        }

        fn start(&self) -> Result<NullEngine, BridgeError> {
            self.starts.set(self.starts.get() + 1);
            if self.can_start {
                Ok(NullEngine("local".to_string()))
            } else {
                Err(BridgeError::StartFailed("no license".to_string()))
            }
        }
    }

    #[test]
    fn test_prefers_shared_session() {
        let connector = FakeConnector::new(&["Engine_1"], &["Engine_1"], true);
        let (engine, origin) = attach_or_start(&connector).unwrap();

        assert_eq!(engine.name(), "Engine_1");
        assert_eq!(origin, EngineOrigin::Attached("Engine_1".to_string()));
        assert_eq!(connector.starts.get(), 0);
    }

    #[test]
    fn test_skips_unreachable_sessions() {
        let connector = FakeConnector::new(&["stale", "Engine_2"], &["Engine_2"], true);
        let (engine, _) = attach_or_start(&connector).unwrap();

        assert_eq!(engine.name(), "Engine_2");
    }

    #[test]
    fn test_starts_when_nothing_shared() {
        let connector = FakeConnector::new(&[], &[], true);
        let (engine, origin) = attach_or_start(&connector).unwrap();

        assert_eq!(engine.name(), "local");
        assert_eq!(origin, EngineOrigin::Started);
    }

    #[test]
    fn test_start_failure_propagates() {
        let connector = FakeConnector::new(&["stale"], &[], false);
        let result = attach_or_start(&connector);

        assert!(matches!(result, Err(BridgeError::StartFailed(_))));
        assert_eq!(connector.starts.get(), 1);
    }
}
