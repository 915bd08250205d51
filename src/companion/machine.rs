use statig::prelude::*;

use embassy_time::Instant;

use crate::config::CompanionConfig;
use crate::escalation::EscalationTimer;
use crate::gesture::TapSequencer;
use crate::transport::StateMessage;
use crate::types::VibrationPattern;

use super::actions::{CompanionAction, CompanionActions};
use super::events::CompanionEvent;
use super::types::ResponderState;

#[derive(Default)]
pub(super) struct DispatchContext {
    pub(super) actions: CompanionActions,
}

pub(super) struct CompanionMachine {
    pub(super) config: CompanionConfig,
    pub(super) state: ResponderState,
    pub(super) taps: TapSequencer,
    pub(super) timer: EscalationTimer,
}

impl CompanionMachine {
    pub(super) fn new(config: CompanionConfig) -> Self {
        Self {
            config,
            state: ResponderState::Idle,
            taps: TapSequencer::new(config.debounce_window),
            timer: EscalationTimer::new(),
        }
    }

    /// Arms the waiting-episode timer and emits the matching runtime command.
    fn arm_wait(&mut self, context: &mut DispatchContext, at: Instant) {
        match self.timer.arm(at, self.config.resend_interval) {
            Ok(episode) => context.actions.push(CompanionAction::ArmWaitTimer {
                generation: episode.generation,
                after: self.config.resend_interval,
            }),
            Err(err) => {
                debug_assert!(false, "wait timer armed on entry: {err}");
                log::error!("wait timer armed entering waiting_for_wearable: {err}");
            }
        }
    }

    fn return_to_idle(&mut self, context: &mut DispatchContext, notify_wearable: bool) {
        self.state = ResponderState::Idle;
        self.taps.reset();
        if self.timer.cancel().is_some() {
            context.actions.push(CompanionAction::CancelWaitTimer);
        }
        context.actions.push(CompanionAction::StopVibration);
        context.actions.push(CompanionAction::ResumePolling);
        if notify_wearable {
            context
                .actions
                .push(CompanionAction::Send(StateMessage::Idle));
        }
    }
}

#[state_machine(initial = "State::idle()")]
impl CompanionMachine {
    #[state]
    fn idle(
        &mut self,
        context: &mut DispatchContext,
        event: &CompanionEvent,
    ) -> Outcome<State> {
        match event {
            CompanionEvent::Anomaly { at, .. } => {
                self.state = ResponderState::WaitingForWearable;
                self.taps.reset();
                context.actions.push(CompanionAction::PausePolling);
                context
                    .actions
                    .push(CompanionAction::Send(StateMessage::IncidentDetected));
                context
                    .actions
                    .push(CompanionAction::Vibrate(VibrationPattern::Strong));
                self.arm_wait(context, *at);
                Transition(State::waiting_for_wearable())
            }
            // Taps, stale fires, stray messages and resolves: nothing to do.
            _ => Handled,
        }
    }

    #[state]
    fn waiting_for_wearable(
        &mut self,
        context: &mut DispatchContext,
        event: &CompanionEvent,
    ) -> Outcome<State> {
        match event {
            // Further anomaly signals must not re-trigger a second incident.
            CompanionEvent::Anomaly { .. } => Handled,
            CompanionEvent::Message {
                message: StateMessage::IncidentConfirmed,
                ..
            } => {
                self.state = ResponderState::Active;
                self.taps.reset();
                if self.timer.cancel().is_some() {
                    context.actions.push(CompanionAction::CancelWaitTimer);
                }
                context.actions.push(CompanionAction::StartAlarm);
                context
                    .actions
                    .push(CompanionAction::Vibrate(VibrationPattern::Strong));
                Transition(State::active())
            }
            CompanionEvent::Message {
                message: StateMessage::Idle,
                ..
            } => {
                // Wearer cancelled on the wearable.
                self.return_to_idle(context, false);
                Transition(State::idle())
            }
            CompanionEvent::Resolve { .. } => {
                // Resolved locally without waiting for the wearable; tell it
                // to stand down in case it is still alerting.
                self.return_to_idle(context, true);
                Transition(State::idle())
            }
            CompanionEvent::WaitTimerFired { generation } => {
                let fired_at = self.timer.armed().map(|episode| episode.deadline);
                if self.timer.take_fire(*generation) {
                    // The observed protocol has no ack; this periodic re-send
                    // covers a lost INCIDENT_DETECTED while the wearable's
                    // own timeout covers everything else.
                    context
                        .actions
                        .push(CompanionAction::Send(StateMessage::IncidentDetected));
                    if let Some(fired_at) = fired_at {
                        self.arm_wait(context, fired_at);
                    }
                }
                Handled
            }
            CompanionEvent::Message {
                message: StateMessage::IncidentDetected,
                ..
            }
            | CompanionEvent::Tap { .. } => Handled,
        }
    }

    #[state]
    fn active(
        &mut self,
        context: &mut DispatchContext,
        event: &CompanionEvent,
    ) -> Outcome<State> {
        match event {
            CompanionEvent::Tap { at } => {
                if self.taps.on_tap(*at, self.config.acknowledge_taps) {
                    self.state = ResponderState::Acknowledged;
                    self.taps.reset();
                    context.actions.push(CompanionAction::StopAlarm);
                    context
                        .actions
                        .push(CompanionAction::Vibrate(VibrationPattern::Slow));
                    Transition(State::acknowledged())
                } else {
                    Handled
                }
            }
            // Anomalies, duplicate confirms and stray messages are ignored
            // while the alarm is up.
            _ => Handled,
        }
    }

    #[state]
    fn acknowledged(
        &mut self,
        context: &mut DispatchContext,
        event: &CompanionEvent,
    ) -> Outcome<State> {
        match event {
            CompanionEvent::Tap { at } => {
                if self.taps.on_tap(*at, self.config.resolve_taps) {
                    context.actions.push(CompanionAction::StopAlarm);
                    self.return_to_idle(context, true);
                    Transition(State::idle())
                } else {
                    Handled
                }
            }
            _ => Handled,
        }
    }
}
