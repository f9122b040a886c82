//! Lap filtering and reduction

use crate::error::{AppError, Result};
use crate::models::session::{LapRecord, RankedList};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Duration;

/// Drop laps slower than the reference time scaled by the threshold factor
///
/// A lap survives when `time <= reference * threshold_factor` (inclusive).
/// Input order is preserved; an empty input yields an empty output. The
/// reference must be positive and the factor finite and positive.
pub fn filter_meaningful(
    laps: &[LapRecord],
    reference: Duration,
    threshold_factor: f64,
) -> Result<Vec<LapRecord>> {
    if reference.is_zero() {
        return Err(AppError::validation(
            "Reference lap time must be positive",
        ));
    }
    if !threshold_factor.is_finite() || threshold_factor <= 0.0 {
        return Err(AppError::validation(format!(
            "Threshold factor must be finite and positive, got {}",
            threshold_factor
        )));
    }

    let threshold = reference.mul_f64(threshold_factor);
    Ok(laps
        .iter()
        .filter(|lap| lap.time <= threshold)
        .cloned()
        .collect())
}

/// Fastest lap per driver, ordered ascending by lap time
///
/// For each distinct driver only the minimum-time lap survives; within one
/// driver the earliest of equal laps wins. Drivers with exactly equal fastest
/// times keep their first-seen input order (stable sort). Idempotent.
pub fn fastest_per_driver(laps: &[LapRecord]) -> Vec<LapRecord> {
    let mut best_index: HashMap<&str, usize> = HashMap::new();
    let mut driver_order: Vec<&str> = Vec::new();

    for (idx, lap) in laps.iter().enumerate() {
        match best_index.entry(lap.driver.as_str()) {
            Entry::Occupied(mut entry) => {
                if laps[*entry.get()].time > lap.time {
                    entry.insert(idx);
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(idx);
                driver_order.push(lap.driver.as_str());
            }
        }
    }

    let mut fastest: Vec<LapRecord> = driver_order
        .iter()
        .map(|driver| laps[best_index[driver]].clone())
        .collect();
    fastest.sort_by_key(|lap| lap.time);
    fastest
}

/// Ranking of drivers implied by a fastest-lap sequence
pub fn ranking_from(fastest: &[LapRecord]) -> Result<RankedList> {
    RankedList::new(fastest.iter().map(|lap| lap.driver.clone()).collect())
}

/// Mean lap time, `None` for empty input
pub fn mean_lap_time(laps: &[LapRecord]) -> Option<Duration> {
    if laps.is_empty() {
        return None;
    }
    let total: Duration = laps.iter().map(|lap| lap.time).sum();
    Some(total / laps.len() as u32)
}
