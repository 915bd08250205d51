use embassy_time::Duration;

use crate::transport::StateMessage;
use crate::types::{ActionBuffer, VibrationPattern};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompanionAction {
    Vibrate(VibrationPattern),
    StopVibration,
    StartAlarm,
    StopAlarm,
    Send(StateMessage),
    /// Stop feeding anomaly polls while an incident is in flight.
    PausePolling,
    /// Mandatory on every return to Idle so the next incident is detected.
    ResumePolling,
    ArmWaitTimer { generation: u32, after: Duration },
    CancelWaitTimer,
}

/// Busiest transition (Idle entering WaitingForWearable) emits four actions.
pub const ACTION_MAX: usize = 6;

pub type CompanionActions = ActionBuffer<CompanionAction, ACTION_MAX>;
