//! Wearer-facing half of the incident confirmation protocol.

pub(crate) mod actions;
pub(crate) mod engine;
pub(crate) mod events;
mod machine;
pub(crate) mod types;

pub use actions::WearableAction;
pub use engine::{WearableEngine, WearableOutput};
pub use events::WearableEvent;
pub use types::IncidentState;
