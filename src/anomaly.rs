//! Anomaly signal model shared with the detection backend.
//!
//! Detection itself (pose inference, classification) is an external
//! collaborator; the protocol core only consumes its typed output, delivered
//! either pushed over a stream or pulled by the poller task.

/// Anomaly classes emitted by the detection backend, wire literals included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnomalyKind {
    Fall,
    Collapse,
    ErraticMotion,
    StationaryDown,
    Fainting,
    /// Backend reported something this build does not know about. Still an
    /// anomaly; escalated like any other.
    Unknown,
}

impl AnomalyKind {
    pub fn as_wire(self) -> &'static str {
        match self {
            AnomalyKind::Fall => "FALL",
            AnomalyKind::Collapse => "COLLAPSE",
            AnomalyKind::ErraticMotion => "ERRATIC_MOTION",
            AnomalyKind::StationaryDown => "STATIONARY_DOWN",
            AnomalyKind::Fainting => "FAINTING",
            AnomalyKind::Unknown => "UNKNOWN",
        }
    }

    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "FALL" => AnomalyKind::Fall,
            "COLLAPSE" => AnomalyKind::Collapse,
            "ERRATIC_MOTION" => AnomalyKind::ErraticMotion,
            "STATIONARY_DOWN" => AnomalyKind::StationaryDown,
            "FAINTING" => AnomalyKind::Fainting,
            _ => AnomalyKind::Unknown,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnomalySignal {
    pub kind: AnomalyKind,
    /// Backend confidence, 0..=100.
    pub confidence: u8,
}

impl AnomalySignal {
    pub fn new(kind: AnomalyKind, confidence: u8) -> Self {
        Self {
            kind,
            confidence: confidence.min(100),
        }
    }
}
