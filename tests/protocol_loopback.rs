//! End-to-end scenarios: both device runtimes wired back to back over an
//! in-memory loopback transport, real (shortened) timers, one busy-polled
//! executor.

use std::sync::{Arc, Mutex};

use embassy_futures::block_on;
use embassy_futures::join::{join4, join5};
use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender};
use embassy_time::{Duration, Instant, Timer};

use vigil::anomaly::{AnomalyKind, AnomalySignal};
use vigil::companion::{CompanionEngine, CompanionEvent, ResponderState};
use vigil::config::{CompanionConfig, WearableConfig, EVENT_QUEUE_DEPTH, TIMER_COMMAND_DEPTH};
use vigil::escalation::{run_escalation_timer, TimerCommand};
use vigil::runtime::{
    run_flash_ticker, ActuatorError, Actuators, CompanionRuntime, PollGate, VisualActuator,
    WearableRuntime,
};
use vigil::transport::{MessageSender, Node, NodeList, StateMessage, TransportError};
use vigil::types::{StateCell, VibrationPattern, VisualState};
use vigil::wearable::{IncidentState, WearableEngine, WearableEvent};

type EventChannel<E> = Channel<CriticalSectionRawMutex, E, EVENT_QUEUE_DEPTH>;
type TimerChannel = Channel<CriticalSectionRawMutex, TimerCommand, TIMER_COMMAND_DEPTH>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Call {
    Vibrate(VibrationPattern),
    StopVibration,
    StartAlarm,
    StopAlarm,
}

#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    fn recorded(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn saw(&self, call: Call) -> bool {
        self.recorded().contains(&call)
    }
}

impl Actuators for Recorder {
    fn vibrate(&mut self, pattern: VibrationPattern) -> Result<(), ActuatorError> {
        self.calls.lock().unwrap().push(Call::Vibrate(pattern));
        Ok(())
    }

    fn stop_vibration(&mut self) -> Result<(), ActuatorError> {
        self.calls.lock().unwrap().push(Call::StopVibration);
        Ok(())
    }

    fn start_alarm(&mut self) -> Result<(), ActuatorError> {
        self.calls.lock().unwrap().push(Call::StartAlarm);
        Ok(())
    }

    fn stop_alarm(&mut self) -> Result<(), ActuatorError> {
        self.calls.lock().unwrap().push(Call::StopAlarm);
        Ok(())
    }
}

/// Companion-side transport: delivers straight into the wearable's event
/// queue. Dropped-on-full mirrors the real best-effort link.
struct ToWearable {
    peer: Sender<'static, CriticalSectionRawMutex, WearableEvent, EVENT_QUEUE_DEPTH>,
    sent: Arc<Mutex<Vec<StateMessage>>>,
}

impl MessageSender for ToWearable {
    fn connected_nodes(&mut self) -> NodeList {
        let mut nodes = NodeList::new();
        nodes
            .push(Node::new("band-01", "wrist band", true))
            .unwrap();
        nodes
    }

    fn capability_nodes(&mut self) -> NodeList {
        NodeList::new()
    }

    fn send_to(&mut self, _node: &Node, message: StateMessage) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(message);
        self.peer
            .try_send(WearableEvent::Message {
                message,
                at: Instant::now(),
            })
            .map_err(|_| TransportError::Unavailable("peer queue full"))
    }
}

struct ToCompanion {
    peer: Sender<'static, CriticalSectionRawMutex, CompanionEvent, EVENT_QUEUE_DEPTH>,
    sent: Arc<Mutex<Vec<StateMessage>>>,
}

impl MessageSender for ToCompanion {
    fn connected_nodes(&mut self) -> NodeList {
        let mut nodes = NodeList::new();
        nodes.push(Node::new("phone-01", "companion", true)).unwrap();
        nodes
    }

    fn capability_nodes(&mut self) -> NodeList {
        NodeList::new()
    }

    fn send_to(&mut self, _node: &Node, message: StateMessage) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(message);
        self.peer
            .try_send(CompanionEvent::Message {
                message,
                at: Instant::now(),
            })
            .map_err(|_| TransportError::Unavailable("peer queue full"))
    }
}

#[derive(Clone, Default)]
struct VisualRecorder {
    seen: Arc<Mutex<Vec<VisualState>>>,
}

impl VisualActuator for VisualRecorder {
    fn set_visual(&mut self, visual: VisualState) -> Result<(), ActuatorError> {
        self.seen.lock().unwrap().push(visual);
        Ok(())
    }
}

fn fall() -> AnomalySignal {
    AnomalySignal::new(AnomalyKind::Fall, 88)
}

#[test]
fn unattended_incident_confirms_end_to_end() {
    let _ = env_logger::builder().is_test(true).try_init();

    static WEARABLE_EVENTS: EventChannel<WearableEvent> = Channel::new();
    static COMPANION_EVENTS: EventChannel<CompanionEvent> = Channel::new();
    static WEARABLE_TIMER: TimerChannel = Channel::new();
    static COMPANION_TIMER: TimerChannel = Channel::new();
    static WEARABLE_STATE: StateCell<IncidentState> = StateCell::new();
    static COMPANION_STATE: StateCell<ResponderState> = StateCell::new();
    static POLL_GATE: PollGate = PollGate::new();

    let wearable_haptics = Recorder::default();
    let companion_haptics = Recorder::default();
    let wearable_sent = Arc::new(Mutex::new(Vec::new()));
    let companion_sent = Arc::new(Mutex::new(Vec::new()));

    let wearable = WearableRuntime::new(
        WearableEngine::new(WearableConfig {
            confirm_timeout: Duration::from_millis(100),
            ..WearableConfig::default()
        }),
        WEARABLE_EVENTS.receiver(),
        WEARABLE_TIMER.sender(),
        &WEARABLE_STATE,
        wearable_haptics.clone(),
        ToCompanion {
            peer: COMPANION_EVENTS.sender(),
            sent: wearable_sent.clone(),
        },
    );
    let companion = CompanionRuntime::new(
        CompanionEngine::new(CompanionConfig::default()),
        COMPANION_EVENTS.receiver(),
        COMPANION_TIMER.sender(),
        &COMPANION_STATE,
        &POLL_GATE,
        companion_haptics.clone(),
        ToWearable {
            peer: WEARABLE_EVENTS.sender(),
            sent: companion_sent.clone(),
        },
    );

    let driver = async {
        COMPANION_EVENTS
            .send(CompanionEvent::Anomaly {
                signal: fall(),
                at: Instant::now(),
            })
            .await;
        Timer::after(Duration::from_millis(600)).await;
        assert_eq!(WEARABLE_STATE.read(), IncidentState::Confirmed);
        assert_eq!(COMPANION_STATE.read(), ResponderState::Active);
    };

    let visual = VisualRecorder::default();
    block_on(select(
        join5(
            wearable.run(),
            companion.run(),
            run_escalation_timer(WEARABLE_TIMER.receiver(), WEARABLE_EVENTS.sender(), |g| {
                WearableEvent::ConfirmTimerFired { generation: g }
            }),
            run_escalation_timer(COMPANION_TIMER.receiver(), COMPANION_EVENTS.sender(), |g| {
                CompanionEvent::WaitTimerFired { generation: g }
            }),
            run_flash_ticker(&WEARABLE_STATE, visual.clone(), Duration::from_millis(10)),
        ),
        driver,
    ));

    assert!(POLL_GATE.is_paused());
    // The ticker flashed during Alerting and holds the alert visual once
    // the incident confirmed.
    let seen = visual.seen.lock().unwrap();
    assert!(seen.contains(&VisualState::Alert));
    assert_eq!(seen.last(), Some(&VisualState::Alert));
    assert_eq!(
        companion_sent.lock().unwrap().as_slice(),
        [StateMessage::IncidentDetected]
    );
    assert_eq!(
        wearable_sent.lock().unwrap().as_slice(),
        [StateMessage::IncidentConfirmed]
    );
    assert!(wearable_haptics.saw(Call::Vibrate(VibrationPattern::Fast)));
    assert!(wearable_haptics.saw(Call::Vibrate(VibrationPattern::Slow)));
    assert!(companion_haptics.saw(Call::StartAlarm));
}

#[test]
fn wearer_cancel_stands_both_devices_down() {
    let _ = env_logger::builder().is_test(true).try_init();

    static WEARABLE_EVENTS: EventChannel<WearableEvent> = Channel::new();
    static COMPANION_EVENTS: EventChannel<CompanionEvent> = Channel::new();
    static WEARABLE_TIMER: TimerChannel = Channel::new();
    static COMPANION_TIMER: TimerChannel = Channel::new();
    static WEARABLE_STATE: StateCell<IncidentState> = StateCell::new();
    static COMPANION_STATE: StateCell<ResponderState> = StateCell::new();
    static POLL_GATE: PollGate = PollGate::new();

    let wearable_haptics = Recorder::default();
    let companion_haptics = Recorder::default();
    let wearable_sent = Arc::new(Mutex::new(Vec::new()));
    let companion_sent = Arc::new(Mutex::new(Vec::new()));

    let wearable = WearableRuntime::new(
        WearableEngine::new(WearableConfig {
            confirm_timeout: Duration::from_millis(250),
            ..WearableConfig::default()
        }),
        WEARABLE_EVENTS.receiver(),
        WEARABLE_TIMER.sender(),
        &WEARABLE_STATE,
        wearable_haptics.clone(),
        ToCompanion {
            peer: COMPANION_EVENTS.sender(),
            sent: wearable_sent.clone(),
        },
    );
    let companion = CompanionRuntime::new(
        CompanionEngine::new(CompanionConfig::default()),
        COMPANION_EVENTS.receiver(),
        COMPANION_TIMER.sender(),
        &COMPANION_STATE,
        &POLL_GATE,
        companion_haptics.clone(),
        ToWearable {
            peer: WEARABLE_EVENTS.sender(),
            sent: companion_sent.clone(),
        },
    );

    let driver = async {
        COMPANION_EVENTS
            .send(CompanionEvent::Anomaly {
                signal: fall(),
                at: Instant::now(),
            })
            .await;
        Timer::after(Duration::from_millis(50)).await;
        assert_eq!(WEARABLE_STATE.read(), IncidentState::Alerting);

        // Wearer cancels with three quick taps well before the deadline.
        for _ in 0..3 {
            WEARABLE_EVENTS
                .send(WearableEvent::Tap { at: Instant::now() })
                .await;
            Timer::after(Duration::from_millis(30)).await;
        }
        // Wait past the original confirm deadline: the cancelled timer must
        // stay silent.
        Timer::after(Duration::from_millis(400)).await;
        assert_eq!(WEARABLE_STATE.read(), IncidentState::Idle);
        assert_eq!(COMPANION_STATE.read(), ResponderState::Idle);
    };

    block_on(select(
        join4(
            wearable.run(),
            companion.run(),
            run_escalation_timer(WEARABLE_TIMER.receiver(), WEARABLE_EVENTS.sender(), |g| {
                WearableEvent::ConfirmTimerFired { generation: g }
            }),
            run_escalation_timer(COMPANION_TIMER.receiver(), COMPANION_EVENTS.sender(), |g| {
                CompanionEvent::WaitTimerFired { generation: g }
            }),
        ),
        driver,
    ));

    // Polling resumed for the next incident; nothing ever confirmed.
    assert!(!POLL_GATE.is_paused());
    assert_eq!(
        wearable_sent.lock().unwrap().as_slice(),
        [StateMessage::Idle]
    );
    assert!(!wearable_haptics.saw(Call::Vibrate(VibrationPattern::Slow)));
    assert!(!companion_haptics.saw(Call::StartAlarm));
    assert!(companion_haptics.saw(Call::StopVibration));
}
