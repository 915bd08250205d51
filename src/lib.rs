//! Incident confirmation protocol for a paired wearable and companion device.
//!
//! Escalates a detected physiological/visual anomaly into a confirmed
//! emergency across two intermittently connected devices using best-effort
//! messages, local timers and debounced tap gestures, so an incapacitated
//! wearer still reaches emergency response without touching anything.
//!
//! The core is a pair of single-owner state machines ([`WearableEngine`],
//! [`CompanionEngine`]) that consume timestamped events and emit side-effect
//! actions, plus the runtime tasks in [`runtime`] that wire them to timers,
//! transport and actuators. Detection, sensors, auth and rendering live
//! outside this crate behind the traits in [`runtime`] and [`transport`].

pub mod anomaly;
pub mod companion;
pub mod config;
pub mod escalation;
pub mod gesture;
pub mod runtime;
pub mod transport;
pub mod types;
pub mod wearable;

pub use anomaly::{AnomalyKind, AnomalySignal};
pub use companion::{CompanionEngine, CompanionEvent, CompanionOutput, ResponderState};
pub use config::{CompanionConfig, WearableConfig};
pub use transport::{MessageSender, Node, StateMessage, TransportError};
pub use wearable::{IncidentState, WearableEngine, WearableEvent, WearableOutput};
