use statig::blocking::IntoStateMachineExt as _;

use embassy_time::Instant;

use crate::anomaly::AnomalySignal;
use crate::config::CompanionConfig;
use crate::transport::StateMessage;

use super::actions::CompanionActions;
use super::events::CompanionEvent;
use super::machine::{CompanionMachine, DispatchContext};
use super::types::ResponderState;

#[derive(Clone, Copy, Debug)]
pub struct CompanionOutput {
    pub before: ResponderState,
    pub after: ResponderState,
    pub actions: CompanionActions,
}

impl CompanionOutput {
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

/// Control surface of the companion state machine; single-owner like the
/// wearable engine.
pub struct CompanionEngine {
    machine: statig::blocking::StateMachine<CompanionMachine>,
}

impl CompanionEngine {
    pub fn new(config: CompanionConfig) -> Self {
        Self {
            machine: CompanionMachine::new(config).state_machine(),
        }
    }

    pub fn state(&self) -> ResponderState {
        self.machine.inner().state
    }

    pub fn wait_timer_armed(&self) -> bool {
        self.machine.inner().timer.is_armed()
    }

    pub fn handle(&mut self, event: CompanionEvent) -> CompanionOutput {
        let before = self.state();
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        CompanionOutput {
            before,
            after: self.state(),
            actions: context.actions,
        }
    }

    pub fn on_anomaly(&mut self, signal: AnomalySignal, at: Instant) -> CompanionOutput {
        self.handle(CompanionEvent::Anomaly { signal, at })
    }

    pub fn on_tap(&mut self, at: Instant) -> CompanionOutput {
        self.handle(CompanionEvent::Tap { at })
    }

    pub fn on_timer_fired(&mut self, generation: u32) -> CompanionOutput {
        self.handle(CompanionEvent::WaitTimerFired { generation })
    }

    pub fn resolve_manually(&mut self, at: Instant) -> CompanionOutput {
        self.handle(CompanionEvent::Resolve { at })
    }

    /// Raw transport entry point; malformed traffic dies here.
    pub fn on_message(&mut self, path: &str, payload: &[u8], at: Instant) -> CompanionOutput {
        match StateMessage::decode(path, payload) {
            Some(message) => self.handle(CompanionEvent::Message { message, at }),
            None => {
                log::debug!("ignoring unknown message on {path:?}");
                let state = self.state();
                CompanionOutput {
                    before: state,
                    after: state,
                    actions: CompanionActions::default(),
                }
            }
        }
    }
}
