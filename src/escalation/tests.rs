use embassy_time::{Duration, Instant};

use super::{EscalationTimer, TimerError};

fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

const T_CONFIRM: Duration = Duration::from_millis(5_000);

#[test]
fn arm_records_deadline_and_generation() {
    let mut timer = EscalationTimer::new();
    let episode = timer.arm(at(1_000), T_CONFIRM).unwrap();
    assert_eq!(episode.deadline, at(6_000));
    assert!(timer.is_armed());
    assert_eq!(timer.armed(), Some(episode));
}

#[test]
fn double_arm_fails_fast() {
    let mut timer = EscalationTimer::new();
    let _ = timer.arm(at(0), T_CONFIRM).unwrap();
    assert_eq!(timer.arm(at(10), T_CONFIRM), Err(TimerError::AlreadyArmed));
}

#[test]
fn cancel_then_arm_is_allowed() {
    let mut timer = EscalationTimer::new();
    let first = timer.arm(at(0), T_CONFIRM).unwrap();
    assert_eq!(timer.cancel(), Some(first.generation));
    let second = timer.arm(at(100), T_CONFIRM).unwrap();
    assert_ne!(first.generation, second.generation);
}

#[test]
fn fire_with_live_generation_consumes_episode() {
    let mut timer = EscalationTimer::new();
    let episode = timer.arm(at(0), T_CONFIRM).unwrap();
    assert!(timer.take_fire(episode.generation));
    assert!(!timer.is_armed());
    // Never twice.
    assert!(!timer.take_fire(episode.generation));
}

#[test]
fn fire_after_cancel_is_refused() {
    let mut timer = EscalationTimer::new();
    let episode = timer.arm(at(0), T_CONFIRM).unwrap();
    timer.cancel();
    assert!(!timer.take_fire(episode.generation));
}

#[test]
fn stale_fire_from_previous_episode_is_refused() {
    let mut timer = EscalationTimer::new();
    let first = timer.arm(at(0), T_CONFIRM).unwrap();
    timer.cancel();
    let second = timer.arm(at(100), T_CONFIRM).unwrap();
    assert!(!timer.take_fire(first.generation));
    assert!(timer.is_armed());
    assert!(timer.take_fire(second.generation));
}

#[test]
fn cancel_when_idle_is_a_no_op() {
    let mut timer = EscalationTimer::new();
    assert_eq!(timer.cancel(), None);
}
