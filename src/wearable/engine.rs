use statig::blocking::IntoStateMachineExt as _;

use embassy_time::Instant;

use crate::config::WearableConfig;
use crate::transport::StateMessage;

use super::actions::WearableActions;
use super::events::WearableEvent;
use super::machine::{DispatchContext, WearableMachine};
use super::types::IncidentState;

/// Result of dispatching one event: the transition (if any) and the side
/// effects the dispatcher must perform.
#[derive(Clone, Copy, Debug)]
pub struct WearableOutput {
    pub before: IncidentState,
    pub after: IncidentState,
    pub actions: WearableActions,
}

impl WearableOutput {
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

/// Control surface of the wearable state machine. Single-owner: exactly one
/// task (or test) drives it, so dispatch is plain `&mut self`.
pub struct WearableEngine {
    machine: statig::blocking::StateMachine<WearableMachine>,
}

impl WearableEngine {
    pub fn new(config: WearableConfig) -> Self {
        Self {
            machine: WearableMachine::new(config).state_machine(),
        }
    }

    pub fn state(&self) -> IncidentState {
        self.machine.inner().state
    }

    /// True while an auto-confirm deadline is live. Exposed for the host UI
    /// countdown and for tests.
    pub fn confirm_timer_armed(&self) -> bool {
        self.machine.inner().timer.is_armed()
    }

    pub fn handle(&mut self, event: WearableEvent) -> WearableOutput {
        let before = self.state();
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        WearableOutput {
            before,
            after: self.state(),
            actions: context.actions,
        }
    }

    pub fn on_anomaly(&mut self, at: Instant) -> WearableOutput {
        self.handle(WearableEvent::Anomaly { at })
    }

    pub fn on_tap(&mut self, at: Instant) -> WearableOutput {
        self.handle(WearableEvent::Tap { at })
    }

    pub fn on_timer_fired(&mut self, generation: u32) -> WearableOutput {
        self.handle(WearableEvent::ConfirmTimerFired { generation })
    }

    /// Raw transport entry point. Unknown paths and payloads are dropped
    /// here, before the state machine ever sees them.
    pub fn on_message(&mut self, path: &str, payload: &[u8], at: Instant) -> WearableOutput {
        match StateMessage::decode(path, payload) {
            Some(message) => self.handle(WearableEvent::Message { message, at }),
            None => {
                log::debug!("ignoring unknown message on {path:?}");
                let state = self.state();
                WearableOutput {
                    before: state,
                    after: state,
                    actions: WearableActions::default(),
                }
            }
        }
    }
}
