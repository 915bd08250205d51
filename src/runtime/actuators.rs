use crate::types::{VibrationPattern, VisualState};

#[derive(Debug, thiserror::Error)]
pub enum ActuatorError {
    #[error("actuator unavailable: {0}")]
    Unavailable(&'static str),
    #[error("actuator rejected command: {0}")]
    Rejected(&'static str),
}

/// Haptic and audible outputs. Implementations wrap the platform drivers;
/// calls must return promptly and never block the dispatcher.
pub trait Actuators {
    fn vibrate(&mut self, pattern: VibrationPattern) -> Result<(), ActuatorError>;
    fn stop_vibration(&mut self) -> Result<(), ActuatorError>;
    fn start_alarm(&mut self) -> Result<(), ActuatorError>;
    fn stop_alarm(&mut self) -> Result<(), ActuatorError>;
}

/// The alert visual, owned by the flash ticker rather than the dispatcher.
pub trait VisualActuator {
    fn set_visual(&mut self, visual: VisualState) -> Result<(), ActuatorError>;
}

/// A failed actuator must never prevent a state transition: log and move on.
pub(crate) fn drive(result: Result<(), ActuatorError>, what: &str) {
    if let Err(err) = result {
        log::warn!("{what} failed: {err}");
    }
}
