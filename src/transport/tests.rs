use super::discovery::{estimate_distance_m, is_nearby, trimmed_mean_rssi};
use super::{select_target, Node, NodeList, StateMessage, STATE_UPDATE_PATH};

#[test]
fn payload_literals_match_the_wire_contract() {
    assert_eq!(StateMessage::Idle.payload(), b"IDLE");
    assert_eq!(
        StateMessage::IncidentDetected.payload(),
        b"INCIDENT_DETECTED"
    );
    assert_eq!(
        StateMessage::IncidentConfirmed.payload(),
        b"INCIDENT_CONFIRMED"
    );
}

#[test]
fn decode_accepts_known_payloads_on_the_state_path() {
    assert_eq!(
        StateMessage::decode(STATE_UPDATE_PATH, b"IDLE"),
        Some(StateMessage::Idle)
    );
    assert_eq!(
        StateMessage::decode(STATE_UPDATE_PATH, b"INCIDENT_CONFIRMED"),
        Some(StateMessage::IncidentConfirmed)
    );
}

#[test]
fn decode_ignores_unknown_path() {
    assert_eq!(StateMessage::decode("/battery", b"IDLE"), None);
}

#[test]
fn decode_ignores_unknown_payload() {
    assert_eq!(StateMessage::decode(STATE_UPDATE_PATH, b"PANIC"), None);
    assert_eq!(StateMessage::decode(STATE_UPDATE_PATH, b""), None);
}

fn node(id: &str, nearby: bool) -> Node {
    Node::new(id, id, nearby)
}

fn no_fallback() -> NodeList {
    NodeList::new()
}

#[test]
fn selection_prefers_nearby_node() {
    let connected = [node("far", false), node("close", true)];
    let target = select_target(&connected, no_fallback).unwrap();
    assert_eq!(target.id, "close");
}

#[test]
fn selection_falls_back_to_first_connected() {
    let connected = [node("a", false), node("b", false)];
    let target = select_target(&connected, no_fallback).unwrap();
    assert_eq!(target.id, "a");
}

#[test]
fn selection_uses_capability_lookup_when_listing_is_empty() {
    let mut fallback = NodeList::new();
    fallback.push(node("capable", false)).unwrap();
    let target = select_target(&[], move || fallback).unwrap();
    assert_eq!(target.id, "capable");
}

#[test]
fn selection_yields_none_when_nothing_is_reachable() {
    assert_eq!(select_target(&[], no_fallback), None);
}

#[test]
fn distance_at_reference_rssi_is_one_meter() {
    let distance = estimate_distance_m(-59.0);
    assert!((distance - 1.0).abs() < 1e-3);
}

#[test]
fn distance_is_clamped_to_model_range() {
    assert_eq!(estimate_distance_m(0.0), 0.1);
    assert_eq!(estimate_distance_m(-120.0), 30.0);
}

#[test]
fn trimmed_mean_drops_extremes_with_enough_rounds() {
    // With more than three rounds the min and max are dropped.
    assert_eq!(trimmed_mean_rssi(&[-90, -60, -61, -59]), Some(-60.5));
    // Three or fewer: plain mean.
    assert_eq!(trimmed_mean_rssi(&[-60, -62]), Some(-61.0));
    assert_eq!(trimmed_mean_rssi(&[]), None);
}

#[test]
fn nearby_verdict_tracks_distance_threshold() {
    assert!(is_nearby(&[-59, -60, -58]));
    assert!(!is_nearby(&[-100, -101, -99]));
    assert!(!is_nearby(&[]));
}
