//! Proximity estimation for discovered nodes.
//!
//! The transport layer scans for the paired device and reports per-round RSSI
//! readings; this module turns them into a distance estimate via a
//! log-distance path loss model and decides whether the node counts as
//! nearby for target selection.

/// Measured RSSI at one meter.
pub const TX_POWER_DBM: f32 = -59.0;

/// Path loss exponent, indoor environments run roughly 2 to 3.
pub const PATH_LOSS_EXPONENT: f32 = 2.5;

pub const MIN_DISTANCE_M: f32 = 0.1;
pub const MAX_DISTANCE_M: f32 = 30.0;

/// Nodes at or under this estimated distance are flagged nearby.
pub const NEARBY_DISTANCE_M: f32 = 5.0;

/// Converts one RSSI reading to meters, clamped to the model's usable range.
pub fn estimate_distance_m(rssi_dbm: f32) -> f32 {
    let distance = 10f32.powf((TX_POWER_DBM - rssi_dbm) / (10.0 * PATH_LOSS_EXPONENT));
    distance.clamp(MIN_DISTANCE_M, MAX_DISTANCE_M)
}

/// Averages scan-round readings with the extremes trimmed once enough rounds
/// landed, smoothing single-round multipath spikes.
pub fn trimmed_mean_rssi(readings: &[i16]) -> Option<f32> {
    if readings.is_empty() {
        return None;
    }
    let mut sorted = readings.to_vec();
    sorted.sort_unstable();
    let trimmed: &[i16] = if sorted.len() > 3 {
        &sorted[1..sorted.len() - 1]
    } else {
        &sorted
    };
    let sum: i32 = trimmed.iter().map(|&r| i32::from(r)).sum();
    Some(sum as f32 / trimmed.len() as f32)
}

/// Nearby verdict for a node from its raw scan readings. No readings means
/// not nearby; the selection policy then falls back to any connected node.
pub fn is_nearby(readings: &[i16]) -> bool {
    trimmed_mean_rssi(readings)
        .map(|rssi| estimate_distance_m(rssi) <= NEARBY_DISTANCE_M)
        .unwrap_or(false)
}
