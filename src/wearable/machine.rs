use statig::prelude::*;

use embassy_time::Instant;

use crate::config::WearableConfig;
use crate::escalation::EscalationTimer;
use crate::gesture::TapSequencer;
use crate::transport::StateMessage;
use crate::types::VibrationPattern;

use super::actions::{WearableAction, WearableActions};
use super::events::WearableEvent;
use super::types::IncidentState;

#[derive(Default)]
pub(super) struct DispatchContext {
    pub(super) actions: WearableActions,
}

pub(super) struct WearableMachine {
    pub(super) config: WearableConfig,
    pub(super) state: IncidentState,
    pub(super) taps: TapSequencer,
    pub(super) timer: EscalationTimer,
}

impl WearableMachine {
    pub(super) fn new(config: WearableConfig) -> Self {
        Self {
            config,
            state: IncidentState::Idle,
            taps: TapSequencer::new(config.debounce_window),
            timer: EscalationTimer::new(),
        }
    }

    fn enter_alerting(&mut self, context: &mut DispatchContext, at: Instant) {
        self.state = IncidentState::Alerting;
        self.taps.reset();
        context
            .actions
            .push(WearableAction::Vibrate(VibrationPattern::Fast));
        match self.timer.arm(at, self.config.confirm_timeout) {
            Ok(episode) => context.actions.push(WearableAction::ArmConfirmTimer {
                generation: episode.generation,
                after: self.config.confirm_timeout,
            }),
            Err(err) => {
                // Reaching Alerting with a live timer means a transition
                // skipped its cancel.
                debug_assert!(false, "confirm timer armed on entry: {err}");
                log::error!("confirm timer armed on entry to alerting: {err}");
            }
        }
    }

    fn cancel_to_idle(&mut self, context: &mut DispatchContext, notify_companion: bool) {
        self.state = IncidentState::Idle;
        self.taps.reset();
        if self.timer.cancel().is_some() {
            context.actions.push(WearableAction::CancelConfirmTimer);
        }
        context.actions.push(WearableAction::StopVibration);
        if notify_companion {
            context.actions.push(WearableAction::Send(StateMessage::Idle));
        }
    }
}

#[state_machine(initial = "State::idle()")]
impl WearableMachine {
    #[state]
    fn idle(
        &mut self,
        context: &mut DispatchContext,
        event: &WearableEvent,
    ) -> Outcome<State> {
        match event {
            WearableEvent::Anomaly { at }
            | WearableEvent::Message {
                message: StateMessage::IncidentDetected,
                at,
            } => {
                self.enter_alerting(context, *at);
                Transition(State::alerting())
            }
            // Taps, stale timer fires and cancel messages mean nothing here.
            _ => Handled,
        }
    }

    #[state]
    fn alerting(
        &mut self,
        context: &mut DispatchContext,
        event: &WearableEvent,
    ) -> Outcome<State> {
        match event {
            // Repeated detections while already alerting are a no-op.
            WearableEvent::Anomaly { .. }
            | WearableEvent::Message {
                message: StateMessage::IncidentDetected,
                ..
            } => Handled,
            WearableEvent::Tap { at } => {
                if self.taps.on_tap(*at, self.config.cancel_taps) {
                    self.cancel_to_idle(context, true);
                    Transition(State::idle())
                } else {
                    Handled
                }
            }
            WearableEvent::ConfirmTimerFired { generation } => {
                if self.timer.take_fire(*generation) {
                    self.state = IncidentState::Confirmed;
                    self.taps.reset();
                    context
                        .actions
                        .push(WearableAction::Vibrate(VibrationPattern::Slow));
                    context
                        .actions
                        .push(WearableAction::Send(StateMessage::IncidentConfirmed));
                    Transition(State::confirmed())
                } else {
                    // Cancelled or superseded episode; the fire lost the race.
                    Handled
                }
            }
            WearableEvent::Message {
                message: StateMessage::Idle,
                ..
            } => {
                // Companion resolved remotely; no IDLE echo back.
                self.cancel_to_idle(context, false);
                Transition(State::idle())
            }
            WearableEvent::Message {
                message: StateMessage::IncidentConfirmed,
                ..
            } => Handled,
        }
    }

    #[state]
    fn confirmed(
        &mut self,
        context: &mut DispatchContext,
        event: &WearableEvent,
    ) -> Outcome<State> {
        match event {
            WearableEvent::Tap { at } => {
                if self.taps.on_tap(*at, self.config.dismiss_taps) {
                    self.cancel_to_idle(context, true);
                    Transition(State::idle())
                } else {
                    Handled
                }
            }
            // Once confirmed, only the wearer's dismiss gesture exits.
            _ => Handled,
        }
    }
}
