use embassy_time::{Duration, Timer};

use crate::types::{StateCell, VisualState};
use crate::wearable::IncidentState;

use super::actuators::{drive, VisualActuator};

/// Cosmetic alert visual, kept out of the state machine entirely. Toggles on
/// a fixed interval while the published state is Alerting, holds solid while
/// Confirmed, stays dark while Idle.
pub async fn run_flash_ticker<V: VisualActuator>(
    published: &StateCell<IncidentState>,
    mut visual: V,
    interval: Duration,
) -> ! {
    let mut lit = false;
    let mut last_sent: Option<VisualState> = None;
    loop {
        Timer::after(interval).await;
        let target = match published.read() {
            IncidentState::Idle => {
                lit = false;
                VisualState::Off
            }
            IncidentState::Alerting => {
                lit = !lit;
                if lit {
                    VisualState::Alert
                } else {
                    VisualState::Off
                }
            }
            IncidentState::Confirmed => {
                lit = true;
                VisualState::Alert
            }
        };
        if last_sent != Some(target) {
            drive(visual.set_visual(target), "set visual");
            last_sent = Some(target);
        }
    }
}
