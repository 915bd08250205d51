use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Instant, Timer};

use crate::anomaly::AnomalySignal;
use crate::companion::CompanionEvent;
use crate::config::EVENT_QUEUE_DEPTH;

/// Pause flag for the pull-mode anomaly probe. The dispatcher flips it on
/// PausePolling/ResumePolling actions; the poller checks it every cycle, so
/// detection resumes on the next tick after the incident closes.
pub struct PollGate {
    paused: AtomicBool,
}

impl PollGate {
    pub const fn new() -> Self {
        Self {
            paused: AtomicBool::new(false),
        }
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }
}

impl Default for PollGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull-mode detection backend. Push-mode backends skip this entirely and
/// send `CompanionEvent::Anomaly` into the event channel themselves.
#[allow(async_fn_in_trait)]
pub trait AnomalySource {
    /// One poll of the backend; None when nothing anomalous was seen.
    async fn sample(&mut self) -> Option<AnomalySignal>;
}

/// Periodically probes the backend and feeds anomalies into the companion's
/// event queue, honoring the pause gate.
pub async fn run_anomaly_poller<S: AnomalySource>(
    mut source: S,
    gate: &PollGate,
    events: Sender<'_, CriticalSectionRawMutex, CompanionEvent, EVENT_QUEUE_DEPTH>,
    interval: Duration,
) -> ! {
    loop {
        Timer::after(interval).await;
        if gate.is_paused() {
            continue;
        }
        if let Some(signal) = source.sample().await {
            events
                .send(CompanionEvent::Anomaly {
                    signal,
                    at: Instant::now(),
                })
                .await;
        }
    }
}
