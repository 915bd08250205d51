use crate::types::StateRepr;

/// Responder-facing state on the companion device. Process lifetime, never
/// persisted; restarts reset to Idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponderState {
    Idle,
    /// An anomaly went out to the wearable; waiting for the wearer to cancel
    /// or for the incident to come back confirmed.
    WaitingForWearable,
    /// Confirmed emergency, alarm sounding.
    Active,
    /// A responder acknowledged the alarm but the incident is not closed yet.
    Acknowledged,
}

impl StateRepr for ResponderState {
    fn as_u8(self) -> u8 {
        match self {
            ResponderState::Idle => 0,
            ResponderState::WaitingForWearable => 1,
            ResponderState::Active => 2,
            ResponderState::Acknowledged => 3,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => ResponderState::WaitingForWearable,
            2 => ResponderState::Active,
            3 => ResponderState::Acknowledged,
            _ => ResponderState::Idle,
        }
    }
}
