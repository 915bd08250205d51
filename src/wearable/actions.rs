use embassy_time::Duration;

use crate::transport::StateMessage;
use crate::types::{ActionBuffer, VibrationPattern};

/// Side effects the dispatcher performs on the wearable's behalf. The visual
/// alert is not here: the flash ticker derives it from the published state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WearableAction {
    Vibrate(VibrationPattern),
    StopVibration,
    Send(StateMessage),
    ArmConfirmTimer { generation: u32, after: Duration },
    CancelConfirmTimer,
}

/// Busiest transition (triple-tap cancel) emits three actions.
pub const ACTION_MAX: usize = 4;

pub type WearableActions = ActionBuffer<WearableAction, ACTION_MAX>;
