use embassy_time::Duration;

/// Maximum gap between consecutive taps that still counts toward the same
/// gesture.
pub const DEBOUNCE_WINDOW_MS: u64 = 600;

/// Window the wearer has to cancel before the wearable auto-confirms.
/// Deployed drafts ran 5 s and 10 s; ship value still under discussion.
pub const CONFIRM_TIMEOUT_MS: u64 = 5_000;

/// Companion re-sends INCIDENT_DETECTED each interval while it is still
/// waiting for the wearable. Delivery is best-effort, this is the only retry.
pub const RESEND_INTERVAL_MS: u64 = 10_000;

/// Alert visual toggle period while the wearable is alerting. Cosmetic only.
pub const FLASH_INTERVAL_MS: u64 = 500;

/// Period of the companion's pull-mode anomaly probe.
pub const ANOMALY_POLL_INTERVAL_MS: u64 = 1_000;

/// Taps to confirm-dismiss (wearable Confirmed) or acknowledge (companion
/// Active).
pub const ACKNOWLEDGE_TAPS: u8 = 2;

/// Taps to cancel an alert (wearable Alerting) or resolve an incident
/// (companion Acknowledged).
pub const CANCEL_TAPS: u8 = 3;

pub const EVENT_QUEUE_DEPTH: usize = 8;
pub const TIMER_COMMAND_DEPTH: usize = 2;
pub const MAX_TRACKED_NODES: usize = 8;

#[derive(Clone, Copy, Debug)]
pub struct WearableConfig {
    pub confirm_timeout: Duration,
    pub debounce_window: Duration,
    pub cancel_taps: u8,
    pub dismiss_taps: u8,
}

impl Default for WearableConfig {
    fn default() -> Self {
        Self {
            confirm_timeout: Duration::from_millis(CONFIRM_TIMEOUT_MS),
            debounce_window: Duration::from_millis(DEBOUNCE_WINDOW_MS),
            cancel_taps: CANCEL_TAPS,
            dismiss_taps: ACKNOWLEDGE_TAPS,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CompanionConfig {
    pub resend_interval: Duration,
    pub debounce_window: Duration,
    pub acknowledge_taps: u8,
    pub resolve_taps: u8,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            resend_interval: Duration::from_millis(RESEND_INTERVAL_MS),
            debounce_window: Duration::from_millis(DEBOUNCE_WINDOW_MS),
            acknowledge_taps: ACKNOWLEDGE_TAPS,
            resolve_taps: CANCEL_TAPS,
        }
    }
}
