use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Receiver, Sender};

use crate::companion::{CompanionAction, CompanionEngine, CompanionEvent, ResponderState};
use crate::config::{EVENT_QUEUE_DEPTH, TIMER_COMMAND_DEPTH};
use crate::escalation::TimerCommand;
use crate::transport::{send_best_effort, MessageSender};
use crate::types::StateCell;
use crate::wearable::{IncidentState, WearableAction, WearableEngine, WearableEvent};

use super::actuators::{drive, Actuators};
use super::poller::PollGate;

type EventReceiver<'ch, E> = Receiver<'ch, CriticalSectionRawMutex, E, EVENT_QUEUE_DEPTH>;
type TimerSender<'ch> = Sender<'ch, CriticalSectionRawMutex, TimerCommand, TIMER_COMMAND_DEPTH>;

/// Serialized event loop of the wearable. Owns the engine; timer fires,
/// inbound messages and taps all arrive through the one event channel, so no
/// locking exists anywhere near the state.
pub struct WearableRuntime<'ch, A: Actuators, S: MessageSender> {
    engine: WearableEngine,
    events: EventReceiver<'ch, WearableEvent>,
    timer_commands: TimerSender<'ch>,
    published: &'ch StateCell<IncidentState>,
    actuators: A,
    transport: S,
}

impl<'ch, A: Actuators, S: MessageSender> WearableRuntime<'ch, A, S> {
    pub fn new(
        engine: WearableEngine,
        events: EventReceiver<'ch, WearableEvent>,
        timer_commands: TimerSender<'ch>,
        published: &'ch StateCell<IncidentState>,
        actuators: A,
        transport: S,
    ) -> Self {
        Self {
            engine,
            events,
            timer_commands,
            published,
            actuators,
            transport,
        }
    }

    pub async fn run(mut self) -> ! {
        self.published.publish(self.engine.state());
        loop {
            let event = self.events.receive().await;
            let output = self.engine.handle(event);
            if output.changed() {
                log::info!("wearable {:?} -> {:?}", output.before, output.after);
            }
            // Publish before performing actions so the ticker never renders a
            // stale state while the dispatcher is busy with side effects.
            self.published.publish(output.after);
            for action in output.actions.iter() {
                self.perform(*action).await;
            }
        }
    }

    async fn perform(&mut self, action: WearableAction) {
        match action {
            WearableAction::Vibrate(pattern) => {
                drive(self.actuators.vibrate(pattern), "vibrate");
            }
            WearableAction::StopVibration => {
                drive(self.actuators.stop_vibration(), "stop vibration");
            }
            WearableAction::Send(message) => send_best_effort(&mut self.transport, message),
            WearableAction::ArmConfirmTimer { generation, after } => {
                self.timer_commands
                    .send(TimerCommand::Arm { generation, after })
                    .await;
            }
            WearableAction::CancelConfirmTimer => {
                self.timer_commands.send(TimerCommand::Cancel).await;
            }
        }
    }
}

/// Serialized event loop of the companion device.
pub struct CompanionRuntime<'ch, A: Actuators, S: MessageSender> {
    engine: CompanionEngine,
    events: EventReceiver<'ch, CompanionEvent>,
    timer_commands: TimerSender<'ch>,
    published: &'ch StateCell<ResponderState>,
    poll_gate: &'ch PollGate,
    actuators: A,
    transport: S,
}

impl<'ch, A: Actuators, S: MessageSender> CompanionRuntime<'ch, A, S> {
    pub fn new(
        engine: CompanionEngine,
        events: EventReceiver<'ch, CompanionEvent>,
        timer_commands: TimerSender<'ch>,
        published: &'ch StateCell<ResponderState>,
        poll_gate: &'ch PollGate,
        actuators: A,
        transport: S,
    ) -> Self {
        Self {
            engine,
            events,
            timer_commands,
            published,
            poll_gate,
            actuators,
            transport,
        }
    }

    pub async fn run(mut self) -> ! {
        self.published.publish(self.engine.state());
        loop {
            let event = self.events.receive().await;
            let output = self.engine.handle(event);
            if output.changed() {
                log::info!("companion {:?} -> {:?}", output.before, output.after);
            }
            self.published.publish(output.after);
            for action in output.actions.iter() {
                self.perform(*action).await;
            }
        }
    }

    async fn perform(&mut self, action: CompanionAction) {
        match action {
            CompanionAction::Vibrate(pattern) => {
                drive(self.actuators.vibrate(pattern), "vibrate");
            }
            CompanionAction::StopVibration => {
                drive(self.actuators.stop_vibration(), "stop vibration");
            }
            CompanionAction::StartAlarm => drive(self.actuators.start_alarm(), "start alarm"),
            CompanionAction::StopAlarm => drive(self.actuators.stop_alarm(), "stop alarm"),
            CompanionAction::Send(message) => send_best_effort(&mut self.transport, message),
            CompanionAction::PausePolling => self.poll_gate.pause(),
            CompanionAction::ResumePolling => self.poll_gate.resume(),
            CompanionAction::ArmWaitTimer { generation, after } => {
                self.timer_commands
                    .send(TimerCommand::Arm { generation, after })
                    .await;
            }
            CompanionAction::CancelWaitTimer => {
                self.timer_commands.send(TimerCommand::Cancel).await;
            }
        }
    }
}
