//! Responder-facing half of the incident confirmation protocol.

pub(crate) mod actions;
pub(crate) mod engine;
pub(crate) mod events;
mod machine;
pub(crate) mod types;

pub use actions::CompanionAction;
pub use engine::{CompanionEngine, CompanionOutput};
pub use events::CompanionEvent;
pub use types::ResponderState;
