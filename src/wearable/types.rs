use crate::types::StateRepr;

/// Wearer-facing incident state. Exactly one value per session, held for the
/// process lifetime; a restart comes back up Idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncidentState {
    Idle,
    Alerting,
    Confirmed,
}

impl StateRepr for IncidentState {
    fn as_u8(self) -> u8 {
        match self {
            IncidentState::Idle => 0,
            IncidentState::Alerting => 1,
            IncidentState::Confirmed => 2,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => IncidentState::Alerting,
            2 => IncidentState::Confirmed,
            _ => IncidentState::Idle,
        }
    }
}
