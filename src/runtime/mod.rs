//! Async glue: per-device serialized dispatchers plus the cooperative tasks
//! that feed them (escalation timer, anomaly poller) and the cosmetic flash
//! ticker. Everything here is runtime-agnostic async; the host provides the
//! executor and the platform actuator/transport implementations.

pub(crate) mod actuators;
mod dispatch;
mod poller;
mod ticker;

pub use actuators::{ActuatorError, Actuators, VisualActuator};
pub use dispatch::{CompanionRuntime, WearableRuntime};
pub use poller::{run_anomaly_poller, AnomalySource, PollGate};
pub use ticker::run_flash_ticker;
