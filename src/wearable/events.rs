use embassy_time::Instant;

use crate::transport::StateMessage;

/// Every event source feeding the wearable dispatcher. Timestamps come from
/// the producer so the machine stays deterministic under test.
#[derive(Clone, Copy, Debug)]
pub enum WearableEvent {
    /// Local anomaly detection fired on the wearable itself.
    Anomaly { at: Instant },
    /// One raw tap on the wearable surface, pre-debounce.
    Tap { at: Instant },
    /// A decoded state message from the companion.
    Message { message: StateMessage, at: Instant },
    /// The escalation timer task reports its deadline elapsed.
    ConfirmTimerFired { generation: u32 },
}
