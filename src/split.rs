//! Advisory even-workload split across drivers.
//!
//! Computes target order counts for an even distribution and reports the
//! delta per driver. Purely descriptive: nothing is reassigned here, the UI
//! decides what to do with the suggestions.

use std::cmp::Ordering;

use serde::Serialize;

use crate::model::{Driver, DriverId, Order};

/// What a driver would need to do to reach its target count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitAction {
    Add,
    Remove,
    Keep,
}

/// Per-driver workload suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct SplitSuggestion {
    pub driver_id: DriverId,
    /// Active orders currently assigned to this driver.
    pub current_count: usize,
    /// Target count under an even split.
    pub suggested_count: usize,
    pub action: SplitAction,
    /// Orders to move to reach the target.
    pub transfer_count: usize,
}

/// Suggests an even distribution of the active orders over `drivers`.
///
/// The remainder of `total / drivers` goes to the first drivers in input
/// order, one extra each, so the suggested counts always sum to the active
/// total. Deterministic for a fixed input ordering.
pub fn calculate_even_split(orders: &[Order], drivers: &[Driver]) -> Vec<SplitSuggestion> {
    if drivers.is_empty() {
        return Vec::new();
    }

    let active: Vec<&Order> = orders
        .iter()
        .filter(|order| !order.status.is_terminal())
        .collect();
    let base = active.len() / drivers.len();
    let remainder = active.len() % drivers.len();

    drivers
        .iter()
        .enumerate()
        .map(|(i, driver)| {
            let suggested = base + usize::from(i < remainder);
            let current = active
                .iter()
                .filter(|order| order.driver_id.as_ref() == Some(&driver.id))
                .count();
            let action = match current.cmp(&suggested) {
                Ordering::Less => SplitAction::Add,
                Ordering::Greater => SplitAction::Remove,
                Ordering::Equal => SplitAction::Keep,
            };
            SplitSuggestion {
                driver_id: driver.id.clone(),
                current_count: current,
                suggested_count: suggested,
                action,
                transfer_count: current.abs_diff(suggested),
            }
        })
        .collect()
}
