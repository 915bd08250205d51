use embassy_time::Instant;

use crate::anomaly::AnomalySignal;
use crate::transport::StateMessage;

/// Events feeding the companion dispatcher: the detection backend (pushed or
/// polled), the wearable's messages, screen taps and the wait timer.
#[derive(Clone, Copy, Debug)]
pub enum CompanionEvent {
    Anomaly { signal: AnomalySignal, at: Instant },
    Tap { at: Instant },
    Message { message: StateMessage, at: Instant },
    WaitTimerFired { generation: u32 },
    /// The responder closed the incident from the companion UI.
    Resolve { at: Instant },
}
