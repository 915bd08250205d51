//! Message contract between the wearable and the companion device.
//!
//! Delivery is best-effort, at-most-once, no acknowledgment: a dropped
//! message is logged and forgotten, local timers are the safety net. The wire
//! shape is a path literal plus a bare UTF-8 payload; no version field, no
//! message id.

pub mod discovery;
#[cfg(test)]
mod tests;

use crate::config::MAX_TRACKED_NODES;

pub const STATE_UPDATE_PATH: &str = "/state_update";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("no reachable peer node")]
    NoReachableNode,
    #[error("transport backend unavailable: {0}")]
    Unavailable(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateMessage {
    Idle,
    IncidentDetected,
    IncidentConfirmed,
}

impl StateMessage {
    pub const fn payload(self) -> &'static [u8] {
        match self {
            StateMessage::Idle => b"IDLE",
            StateMessage::IncidentDetected => b"INCIDENT_DETECTED",
            StateMessage::IncidentConfirmed => b"INCIDENT_CONFIRMED",
        }
    }

    /// Decodes an inbound (path, payload) pair. Unknown paths and payloads
    /// yield None and are ignored by callers; malformed traffic never reaches
    /// a state machine.
    pub fn decode(path: &str, payload: &[u8]) -> Option<Self> {
        if path != STATE_UPDATE_PATH {
            return None;
        }
        match payload {
            b"IDLE" => Some(StateMessage::Idle),
            b"INCIDENT_DETECTED" => Some(StateMessage::IncidentDetected),
            b"INCIDENT_CONFIRMED" => Some(StateMessage::IncidentConfirmed),
            _ => None,
        }
    }
}

pub type NodeList = heapless::Vec<Node, MAX_TRACKED_NODES>;

/// A peer device discovered by the transport layer. Read-only input to
/// message delivery; the state machines never own or mutate nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub display_name: String,
    pub is_nearby: bool,
}

impl Node {
    pub fn new(id: &str, display_name: &str, is_nearby: bool) -> Self {
        Self {
            id: id.to_owned(),
            display_name: display_name.to_owned(),
            is_nearby,
        }
    }
}

/// Target selection policy: prefer a nearby node, else any connected node,
/// else fall back to the capability-based lookup when the primary listing is
/// empty or exhausted.
pub fn select_target<F>(connected: &[Node], capability_lookup: F) -> Option<Node>
where
    F: FnOnce() -> NodeList,
{
    if let Some(node) = connected.iter().find(|node| node.is_nearby) {
        return Some(node.clone());
    }
    if let Some(node) = connected.first() {
        return Some(node.clone());
    }
    capability_lookup().first().cloned()
}

/// Outbound half of the transport collaborator. Implementations wrap the
/// platform messaging client; tests use an in-memory loopback.
pub trait MessageSender {
    fn connected_nodes(&mut self) -> NodeList;

    /// Secondary discovery: nodes advertising the incident capability even if
    /// missing from the connected listing.
    fn capability_nodes(&mut self) -> NodeList;

    fn send_to(&mut self, node: &Node, message: StateMessage) -> Result<(), TransportError>;
}

/// Fire-and-forget send. Failure is logged at the boundary and swallowed; a
/// lost message must never stall a state machine. Delivery is at most once
/// and local escalation covers the loss.
pub fn send_best_effort<S: MessageSender>(sender: &mut S, message: StateMessage) {
    let connected = sender.connected_nodes();
    let Some(target) = select_target(&connected, || sender.capability_nodes()) else {
        log::warn!("dropping {message:?}: no reachable peer node");
        return;
    };
    if let Err(err) = sender.send_to(&target, message) {
        log::warn!("dropping {message:?} to {}: {err}", target.id);
    }
}
