//! Simulated engine session
//!
//! Mimics the engine-side SDR procedures closely enough to exercise every
//! path through the controller: radio selection warnings, cardinality
//! dependent sweep replies, and exceptions for unknown procedures or
//! stale radio objects.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use ssb_bridge::{
    procedures, BridgeError, Engine, EngineValue, Invocation, NumericArray, ObjectHandle,
};
use tracing::{debug, info, trace};

/// Configuration for a simulated engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedEngineConfig {
    /// Session name reported by the engine
    pub name: String,
    /// Radio platform the simulated driver supports
    pub platform: String,
    /// Serial numbers of the radios "plugged in"
    pub attached_serials: Vec<String>,
    /// Frequencies (Hz) at which an SSB is on air
    pub ssb_frequencies: Vec<u64>,
    /// Timestamp of the first detection in seconds
    pub first_timestamp_s: f64,
    /// Spacing between detection timestamps in seconds
    pub timestamp_step_s: f64,
}

impl Default for SimulatedEngineConfig {
    fn default() -> Self {
        Self {
            name: "sim".to_string(),
            platform: "B210".to_string(),
            attached_serials: vec!["8000748".to_string()],
            ssb_frequencies: Vec::new(),
            first_timestamp_s: 0.01,
            timestamp_step_s: 0.04,
        }
    }
}

/// A call the engine received
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Procedure name
    pub procedure: String,
    /// Positional arguments
    pub args: Vec<EngineValue>,
    /// Requested output count
    pub nargout: usize,
}

/// A canned reply that overrides the simulated behaviour once
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Return these outputs and captured text
    Outputs(Invocation),
    /// Raise an engine exception with this message
    Exception(String),
}

#[derive(Debug)]
struct SimState {
    config: SimulatedEngineConfig,
    calls: Vec<RecordedCall>,
    scripted: VecDeque<(String, ScriptedReply)>,
    search_path: Vec<String>,
    issued_handles: Vec<ObjectHandle>,
    next_handle: u64,
    quit_count: usize,
}

/// A simulated engine session
///
/// Clones share the same session, so a test can keep a clone for
/// inspection after handing the engine to the controller.
#[derive(Debug, Clone)]
pub struct SimulatedEngine {
    name: String,
    state: Rc<RefCell<SimState>>,
}

impl SimulatedEngine {
    /// Create a simulated engine from configuration
    pub fn new(config: SimulatedEngineConfig) -> Self {
        Self {
            name: config.name.clone(),
            state: Rc::new(RefCell::new(SimState {
                config,
                calls: Vec::new(),
                scripted: VecDeque::new(),
                search_path: Vec::new(),
                issued_handles: Vec::new(),
                next_handle: 1,
                quit_count: 0,
            })),
        }
    }

    /// Queue a reply for the next call to `procedure`
    pub fn script(&self, procedure: impl Into<String>, reply: ScriptedReply) {
        self.state
            .borrow_mut()
            .scripted
            .push_back((procedure.into(), reply));
    }

    /// Replace the set of on-air SSB frequencies
    pub fn set_ssb_frequencies(&self, hz: Vec<u64>) {
        self.state.borrow_mut().config.ssb_frequencies = hz;
    }

    /// Replace the set of attached radios
    pub fn set_attached_serials(&self, serials: Vec<String>) {
        self.state.borrow_mut().config.attached_serials = serials;
    }

    /// All calls received so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.borrow().calls.clone()
    }

    /// Calls received for one procedure
    pub fn calls_to(&self, procedure: &str) -> Vec<RecordedCall> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| c.procedure == procedure)
            .cloned()
            .collect()
    }

    /// Directories registered on the search path
    pub fn search_path(&self) -> Vec<String> {
        self.state.borrow().search_path.clone()
    }

    /// How many times `quit` was called
    pub fn quit_count(&self) -> usize {
        self.state.borrow().quit_count
    }

    /// True once the session has been terminated
    pub fn is_closed(&self) -> bool {
        self.quit_count() > 0
    }
}

impl SimState {
    fn take_scripted(&mut self, procedure: &str) -> Option<ScriptedReply> {
        let pos = self.scripted.iter().position(|(p, _)| p == procedure)?;
        self.scripted.remove(pos).map(|(_, reply)| reply)
    }

    fn issue_handle(&mut self) -> ObjectHandle {
        let handle = ObjectHandle(self.next_handle);
        self.next_handle += 1;
        self.issued_handles.push(handle);
        handle
    }

    fn require_path(&self, procedure: &str) -> Result<(), BridgeError> {
        if self.search_path.is_empty() {
            return Err(BridgeError::exception(
                procedure,
                format!("Undefined function or variable '{}'.", procedure),
            ));
        }
        Ok(())
    }

    fn require_radio(
        &self,
        procedure: &str,
        value: Option<&EngineValue>,
    ) -> Result<(), BridgeError> {
        match value.and_then(EngineValue::as_handle) {
            Some(h) if self.issued_handles.contains(&h) => Ok(()),
            _ => Err(BridgeError::exception(procedure, "Invalid or deleted object.")),
        }
    }

    fn dispatch(
        &mut self,
        procedure: &str,
        args: &[EngineValue],
    ) -> Result<Invocation, BridgeError> {
        match procedure {
            procedures::GENPATH => {
                let dir = text_arg(procedure, args, 0)?;
                Ok(Invocation::with_outputs(vec![EngineValue::Text(dir)]))
            }
            procedures::ADDPATH => {
                let dir = text_arg(procedure, args, 0)?;
                self.search_path.push(dir);
                Ok(Invocation::default())
            }
            procedures::CONFIGURE_SDR => self.configure_sdr(args),
            procedures::FREQUENCY_SWEEP => self.frequency_sweep(args),
            procedures::SMART_SSB_JAM | procedures::DUMB_SSB_JAM => {
                self.require_path(procedure)?;
                self.require_radio(procedure, args.first())?;
                self.require_radio(procedure, args.get(1))?;
                Ok(Invocation::default())
            }
            _ => Err(BridgeError::exception(
                procedure,
                format!("Undefined function or variable '{}'.", procedure),
            )),
        }
    }

    fn configure_sdr(&mut self, args: &[EngineValue]) -> Result<Invocation, BridgeError> {
        let procedure = procedures::CONFIGURE_SDR;
        self.require_path(procedure)?;

        let platform = text_arg(procedure, args, 0)?;
        let serial = text_arg(procedure, args, 1)?;

        if platform != self.config.platform {
            return Err(BridgeError::exception(
                procedure,
                format!("Unsupported radio platform '{}'.", platform),
            ));
        }

        let Some(first) = self.config.attached_serials.first().cloned() else {
            return Err(BridgeError::exception(
                procedure,
                format!("No {} radios found.", platform),
            ));
        };

        let mut stdout = String::new();
        if !serial.is_empty() && !self.config.attached_serials.contains(&serial) {
            stdout.push_str(&format!(
                "Warning: Radio with serial number {} not found. Using {} instead.\n",
                serial, first
            ));
        }

        let rx = self.issue_handle();
        let tx = self.issue_handle();
        debug!("Simulated {} configured: rx={:?} tx={:?}", platform, rx, tx);

        Ok(Invocation {
            outputs: vec![EngineValue::Handle(rx), EngineValue::Handle(tx)],
            stdout,
            stderr: String::new(),
        })
    }

    fn frequency_sweep(&mut self, args: &[EngineValue]) -> Result<Invocation, BridgeError> {
        let procedure = procedures::FREQUENCY_SWEEP;
        self.require_path(procedure)?;
        self.require_radio(procedure, args.first())?;

        let requested: Vec<f64> = match args.get(1) {
            Some(EngineValue::Array(a)) => a.data().to_vec(),
            Some(EngineValue::Scalar(f)) => vec![*f],
            _ => {
                return Err(BridgeError::exception(
                    procedure,
                    "Frequencies must be numeric.",
                ))
            }
        };

        let detected: Vec<f64> = requested
            .into_iter()
            .filter(|f| self.config.ssb_frequencies.iter().any(|&s| s as f64 == *f))
            .collect();
        let timestamps: Vec<f64> = (0..detected.len())
            .map(|i| self.config.first_timestamp_s + i as f64 * self.config.timestamp_step_s)
            .collect();

        trace!("Simulated sweep detected {} SSB(s)", detected.len());

        // The engine collapses 1x1 results to scalars and returns 0x0 for none
        let outputs = match (detected.as_slice(), timestamps.as_slice()) {
            ([], _) => vec![EngineValue::empty(), EngineValue::empty()],
            ([f], [t]) => vec![EngineValue::Scalar(*f), EngineValue::Scalar(*t)],
            _ => vec![
                EngineValue::Array(NumericArray::row(detected)),
                EngineValue::Array(NumericArray::row(timestamps)),
            ],
        };

        Ok(Invocation::with_outputs(outputs))
    }
}

fn text_arg(procedure: &str, args: &[EngineValue], index: usize) -> Result<String, BridgeError> {
    args.get(index)
        .and_then(EngineValue::as_text)
        .map(str::to_string)
        .ok_or_else(|| {
            BridgeError::exception(procedure, format!("Argument {} must be text.", index + 1))
        })
}

impl Engine for SimulatedEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(
        &mut self,
        procedure: &str,
        args: &[EngineValue],
        nargout: usize,
    ) -> Result<Invocation, BridgeError> {
        let mut state = self.state.borrow_mut();
        if state.quit_count > 0 {
            return Err(BridgeError::Disconnected);
        }

        state.calls.push(RecordedCall {
            procedure: procedure.to_string(),
            args: args.to_vec(),
            nargout,
        });

        match state.take_scripted(procedure) {
            Some(ScriptedReply::Outputs(call)) => Ok(call),
            Some(ScriptedReply::Exception(message)) => {
                Err(BridgeError::exception(procedure, message))
            }
            None => state.dispatch(procedure, args),
        }
    }

    fn quit(&mut self) -> Result<(), BridgeError> {
        let mut state = self.state.borrow_mut();
        state.quit_count += 1;
        if state.quit_count > 1 {
            return Err(BridgeError::Disconnected);
        }
        info!("Simulated engine {} quit", self.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_engine(config: SimulatedEngineConfig) -> SimulatedEngine {
        let mut engine = SimulatedEngine::new(config);
        engine
            .invoke(procedures::ADDPATH, &["/opt/ssb".into()], 0)
            .unwrap();
        engine
    }

    fn configure(engine: &mut SimulatedEngine, serial: &str) -> Invocation {
        engine
            .invoke(procedures::CONFIGURE_SDR, &["B210".into(), serial.into()], 2)
            .unwrap()
    }

    #[test]
    fn test_procedures_need_search_path() {
        let mut engine = SimulatedEngine::new(SimulatedEngineConfig::default());
        let result = engine.invoke(procedures::CONFIGURE_SDR, &["B210".into(), "".into()], 2);

        assert!(matches!(result, Err(BridgeError::Exception { .. })));
    }

    #[test]
    fn test_configure_issues_handles() {
        let mut engine = ready_engine(SimulatedEngineConfig::default());
        let call = configure(&mut engine, "");

        assert_eq!(
            call.outputs,
            vec![
                EngineValue::Handle(ObjectHandle(1)),
                EngineValue::Handle(ObjectHandle(2))
            ]
        );
        assert!(call.stdout.is_empty());
    }

    #[test]
    fn test_unknown_serial_warns() {
        let mut engine = ready_engine(SimulatedEngineConfig::default());
        let call = configure(&mut engine, "8000758");

        assert!(call.stdout.starts_with("Warning: Radio with serial number 8000758"));
        assert_eq!(call.outputs.len(), 2);
    }

    #[test]
    fn test_no_radios_raises() {
        let mut engine = ready_engine(SimulatedEngineConfig {
            attached_serials: Vec::new(),
            ..Default::default()
        });
        let result = engine.invoke(procedures::CONFIGURE_SDR, &["B210".into(), "".into()], 2);

        assert_eq!(
            result,
            Err(BridgeError::exception(
                procedures::CONFIGURE_SDR,
                "No B210 radios found."
            ))
        );
    }

    #[test]
    fn test_sweep_reply_shapes() {
        let mut engine = ready_engine(SimulatedEngineConfig {
            ssb_frequencies: vec![100, 300],
            ..Default::default()
        });
        let rx = configure(&mut engine, "").outputs[0].clone();

        let mut sweep = |hz: &[u64]| {
            engine
                .invoke(
                    procedures::FREQUENCY_SWEEP,
                    &[rx.clone(), EngineValue::frequencies(hz), EngineValue::Scalar(40.0)],
                    2,
                )
                .unwrap()
                .outputs
        };

        assert_eq!(sweep(&[200]), vec![EngineValue::empty(), EngineValue::empty()]);
        assert_eq!(
            sweep(&[100, 200]),
            vec![EngineValue::Scalar(100.0), EngineValue::Scalar(0.01)]
        );

        let many = sweep(&[100, 200, 300]);
        match &many[0] {
            EngineValue::Array(a) => assert_eq!(a.data(), &[100.0, 300.0]),
            other => panic!("expected array, got {}", other.kind()),
        }
    }

    #[test]
    fn test_scripted_reply_wins_once() {
        let mut engine = ready_engine(SimulatedEngineConfig::default());
        engine.script(
            procedures::CONFIGURE_SDR,
            ScriptedReply::Exception("device busy".to_string()),
        );

        let first = engine.invoke(procedures::CONFIGURE_SDR, &["B210".into(), "".into()], 2);
        assert!(first.is_err());

        let second = engine.invoke(procedures::CONFIGURE_SDR, &["B210".into(), "".into()], 2);
        assert!(second.is_ok());
    }

    #[test]
    fn test_calls_after_quit_fail() {
        let mut engine = ready_engine(SimulatedEngineConfig::default());
        engine.quit().unwrap();

        assert!(engine.is_closed());
        assert_eq!(
            engine.invoke(procedures::GENPATH, &["x".into()], 1),
            Err(BridgeError::Disconnected)
        );
        assert_eq!(engine.quit(), Err(BridgeError::Disconnected));
        assert_eq!(engine.quit_count(), 2);
    }
}
