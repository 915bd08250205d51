//! Cancellable single-shot escalation countdown.
//!
//! Split in two halves. [`EscalationTimer`] is the pure bookkeeping owned by a
//! state machine: at most one armed episode, each with a fresh generation
//! number. [`run_escalation_timer`] is the runtime task that actually waits
//! out the deadline and feeds a fired event back into the device's event
//! queue. A fire is only honored when its generation still matches the armed
//! episode, so a cancel that races an in-flight fire wins deterministically
//! instead of by last-write order.

#[cfg(test)]
mod tests;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Receiver, Sender};
use embassy_time::{Duration, Instant, Timer};

use embassy_futures::select::{select, Either};

use crate::config::TIMER_COMMAND_DEPTH;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// Arming while an episode is live is a programming error in the owning
    /// machine; callers cancel first.
    #[error("escalation timer already armed")]
    AlreadyArmed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArmedEpisode {
    pub generation: u32,
    pub deadline: Instant,
}

/// Pure armed-timer state. One live episode at most.
#[derive(Debug, Default)]
pub struct EscalationTimer {
    armed: Option<ArmedEpisode>,
    next_generation: u32,
}

impl EscalationTimer {
    pub const fn new() -> Self {
        Self {
            armed: None,
            next_generation: 0,
        }
    }

    pub fn arm(&mut self, now: Instant, after: Duration) -> Result<ArmedEpisode, TimerError> {
        if self.armed.is_some() {
            return Err(TimerError::AlreadyArmed);
        }
        let episode = ArmedEpisode {
            generation: self.next_generation,
            deadline: now + after,
        };
        self.next_generation = self.next_generation.wrapping_add(1);
        self.armed = Some(episode);
        Ok(episode)
    }

    /// Disarms. Safe to call when nothing is armed, and safe to call after a
    /// fire has been requested but not yet observed: the pending fire's
    /// generation will no longer match and gets refused.
    pub fn cancel(&mut self) -> Option<u32> {
        self.armed.take().map(|episode| episode.generation)
    }

    /// Honors a fire event if and only if `generation` is the live episode.
    /// Consumes the episode on success; the timer never fires twice.
    pub fn take_fire(&mut self, generation: u32) -> bool {
        match self.armed {
            Some(episode) if episode.generation == generation => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn armed(&self) -> Option<ArmedEpisode> {
        self.armed
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerCommand {
    Arm { generation: u32, after: Duration },
    Cancel,
}

/// Runtime half: owns at most one pending deadline, re-armed or cancelled
/// through the command channel. On expiry it emits `fired(generation)` into
/// the event queue and goes idle. An `Arm` while a deadline is pending
/// replaces it; the stale generation is left to the engine's fire check.
pub async fn run_escalation_timer<E, F, const N: usize>(
    commands: Receiver<'_, CriticalSectionRawMutex, TimerCommand, TIMER_COMMAND_DEPTH>,
    events: Sender<'_, CriticalSectionRawMutex, E, N>,
    fired: F,
) -> !
where
    F: Fn(u32) -> E,
{
    let mut pending: Option<(u32, Instant)> = None;
    loop {
        match pending {
            None => match commands.receive().await {
                TimerCommand::Arm { generation, after } => {
                    pending = Some((generation, Instant::now() + after));
                }
                TimerCommand::Cancel => {}
            },
            Some((generation, deadline)) => {
                match select(commands.receive(), Timer::at(deadline)).await {
                    Either::First(TimerCommand::Arm { generation, after }) => {
                        pending = Some((generation, Instant::now() + after));
                    }
                    Either::First(TimerCommand::Cancel) => {
                        pending = None;
                    }
                    Either::Second(()) => {
                        pending = None;
                        events.send(fired(generation)).await;
                    }
                }
            }
        }
    }
}
