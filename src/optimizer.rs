//! Route optimizer: driver assignment and per-driver stop sequencing.
//!
//! Three phases over an in-memory snapshot:
//!
//! 1. greedy nearest-driver assignment with a per-order load surcharge,
//! 2. per-driver sequencing via time-window-sorted nearest-neighbor with a
//!    bounded look-ahead,
//! 3. 2-opt segment-reversal refinement per route.
//!
//! The optimizer never performs I/O and never mutates its inputs. Its output
//! is the active subset only: delivered and cancelled orders are filtered out
//! up front and do not reappear, so callers persist the returned subset and
//! leave terminal records untouched.

use std::cmp::Ordering;
use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::geo::{haversine_km, route_length_km};
use crate::model::{Driver, DriverId, Order, OrderStatus};

#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    /// Orders farther than this from every driver stay unassigned rather
    /// than being forced onto the nearest-but-too-far driver.
    pub max_assignment_distance_km: f64,
    /// Distance surcharge per order already on a driver, biasing new work
    /// toward less-loaded drivers.
    pub load_penalty_km: f64,
    /// How many unrouted stops, in time-window order, the sequencer
    /// considers when picking the nearest next stop. Smaller windows follow
    /// delivery windows more closely; larger windows travel less.
    pub lookahead_window: usize,
    /// Cap on full 2-opt passes per route. Convergence usually stops the
    /// scan much earlier; the cap bounds worst-case runtime on large routes.
    pub max_refine_passes: usize,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            max_assignment_distance_km: 2500.0,
            load_penalty_km: 10.0,
            lookahead_window: 12,
            max_refine_passes: 50,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptimizeSummary {
    /// Sum of all route lengths: origin to first stop plus consecutive legs.
    pub total_distance_km: f64,
    /// Orders left without a driver.
    pub unassigned_count: usize,
}

#[derive(Debug, Clone)]
pub struct OptimizeResult {
    /// The active orders, sequenced per driver, unassigned orders last.
    pub orders: Vec<Order>,
    pub summary: OptimizeSummary,
}

/// Per-run accumulator for one driver. Local to a single optimizer call.
#[derive(Debug, Clone)]
struct DriverState {
    /// Resolved scoring/origin position: live GPS, home base, or the first
    /// locked order with coordinates. `None` marks the driver invalid for
    /// new assignments.
    position: Option<(f64, f64)>,
    /// Running order count, seeded with the driver's locked orders.
    load: usize,
}

/// One driver's orders awaiting sequencing.
struct RouteGroup {
    driver_id: DriverId,
    origin: Option<(f64, f64)>,
    orders: Vec<Order>,
}

/// Assigns available orders to drivers and sequences every driver's route.
///
/// Locked orders keep their driver and are only re-sequenced. Orders or
/// drivers with unusable coordinates are silently excluded from geographic
/// decisions; nothing here panics or errors on malformed data.
pub fn optimize_route(
    orders: &[Order],
    drivers: &[Driver],
    options: &OptimizeOptions,
) -> OptimizeResult {
    let mut active: Vec<Order> = orders
        .iter()
        .filter(|order| !order.status.is_terminal())
        .cloned()
        .collect();

    let mut states = driver_states(&active, drivers);

    assign_orders(&mut active, drivers, &mut states, options);

    let mut groups = route_groups(active, &states);
    let mut unassigned: Vec<Order> = Vec::new();
    let mut routed: Vec<RouteGroup> = Vec::new();
    for entry in groups.drain(..) {
        match entry {
            GroupEntry::Routed(group) => routed.push(group),
            GroupEntry::Unassigned(order) => unassigned.push(order),
        }
    }

    routed
        .par_iter_mut()
        .for_each(|group| sequence_group(group, options));

    let total_distance_km: f64 = routed
        .iter()
        .map(|group| {
            let stops: Vec<Option<(f64, f64)>> =
                group.orders.iter().map(Order::position).collect();
            route_length_km(group.origin, &stops)
        })
        .sum();

    debug!(
        routes = routed.len(),
        unassigned = unassigned.len(),
        total_distance_km,
        "routes sequenced"
    );

    let mut result_orders =
        Vec::with_capacity(routed.iter().map(|g| g.orders.len()).sum::<usize>() + unassigned.len());
    for group in routed {
        result_orders.extend(group.orders);
    }
    let unassigned_count = unassigned.len();
    result_orders.extend(unassigned);

    OptimizeResult {
        orders: result_orders,
        summary: OptimizeSummary {
            total_distance_km,
            unassigned_count,
        },
    }
}

/// Resolve each driver's scoring position and seed its load with the locked
/// orders already pinned to it.
fn driver_states(active: &[Order], drivers: &[Driver]) -> HashMap<DriverId, DriverState> {
    let mut locked_load: HashMap<&DriverId, usize> = HashMap::new();
    let mut locked_position: HashMap<&DriverId, (f64, f64)> = HashMap::new();
    for order in active {
        if !order.is_locked() {
            continue;
        }
        if let Some(driver_id) = order.driver_id.as_ref() {
            *locked_load.entry(driver_id).or_insert(0) += 1;
            if let Some(position) = order.position() {
                locked_position.entry(driver_id).or_insert(position);
            }
        }
    }

    drivers
        .iter()
        .map(|driver| {
            let position = driver
                .start_position()
                .or_else(|| locked_position.get(&driver.id).copied());
            let load = locked_load.get(&driver.id).copied().unwrap_or(0);
            (driver.id.clone(), DriverState { position, load })
        })
        .collect()
}

/// Greedy nearest-driver pass over the available orders, in input order.
///
/// No backtracking and no global optimization: each order takes the driver
/// with the lowest score at that moment, where
/// `score = distance + load * load_penalty_km`.
fn assign_orders(
    active: &mut [Order],
    drivers: &[Driver],
    states: &mut HashMap<DriverId, DriverState>,
    options: &OptimizeOptions,
) {
    let mut assigned = 0usize;
    let mut candidates = 0usize;

    for order in active.iter_mut() {
        if order.is_locked() {
            continue;
        }
        // Available orders start the pass unassigned; one that finds no
        // driver ends the run unassigned instead of keeping a stale driver.
        order.driver_id = None;
        order.route_index = None;

        let Some(order_position) = order.position() else {
            continue;
        };
        candidates += 1;

        let mut best_driver: Option<&DriverId> = None;
        let mut best_score = f64::INFINITY;
        for driver in drivers {
            let Some(state) = states.get(&driver.id) else {
                continue;
            };
            let Some(driver_position) = state.position else {
                continue;
            };
            let distance = haversine_km(driver_position, order_position);
            if distance > options.max_assignment_distance_km {
                continue;
            }
            let score = distance + state.load as f64 * options.load_penalty_km;
            if score < best_score {
                best_score = score;
                best_driver = Some(&driver.id);
            }
        }

        if let Some(driver_id) = best_driver {
            order.driver_id = Some(driver_id.clone());
            order.status = OrderStatus::Assigned;
            order.locked_to_driver = false;
            if let Some(state) = states.get_mut(driver_id) {
                state.load += 1;
            }
            assigned += 1;
        }
    }

    debug!(candidates, assigned, "assignment pass complete");
}

enum GroupEntry {
    Routed(RouteGroup),
    Unassigned(Order),
}

/// Group assigned orders by driver, keeping the drivers in first-appearance
/// order, and pass unassigned orders through.
///
/// Locked orders whose driver is not in the input driver list still form a
/// group; their origin falls back to the first order with coordinates.
fn route_groups(active: Vec<Order>, states: &HashMap<DriverId, DriverState>) -> Vec<GroupEntry> {
    let mut group_index: HashMap<DriverId, usize> = HashMap::new();
    let mut entries: Vec<GroupEntry> = Vec::new();

    for order in active {
        let Some(driver_id) = order.driver_id.clone() else {
            entries.push(GroupEntry::Unassigned(order));
            continue;
        };
        match group_index.get(&driver_id) {
            Some(&index) => {
                if let GroupEntry::Routed(group) = &mut entries[index] {
                    group.orders.push(order);
                }
            }
            None => {
                group_index.insert(driver_id.clone(), entries.len());
                entries.push(GroupEntry::Routed(RouteGroup {
                    driver_id,
                    origin: None,
                    orders: vec![order],
                }));
            }
        }
    }

    for entry in entries.iter_mut() {
        if let GroupEntry::Routed(group) = entry {
            group.origin = states
                .get(&group.driver_id)
                .and_then(|state| state.position)
                .or_else(|| group.orders.iter().find_map(Order::position));
        }
    }

    entries
}

/// Sequence one driver's route: sort by delivery window, chain stops via
/// bounded nearest-neighbor, uncross with 2-opt, then number the stops.
fn sequence_group(group: &mut RouteGroup, options: &OptimizeOptions) {
    sort_by_time_window(&mut group.orders);
    nearest_neighbor_chain(group, options.lookahead_window);
    two_opt(group, options.max_refine_passes);

    for (i, order) in group.orders.iter_mut().enumerate() {
        order.route_index = Some(i as u32 + 1);
    }
}

/// Stable sort by `time_window_start`; orders without a window go last.
fn sort_by_time_window(orders: &mut [Order]) {
    orders.sort_by(|a, b| match (&a.time_window_start, &b.time_window_start) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Nearest-neighbor chaining constrained to a look-ahead window.
///
/// At each step only the first `lookahead` unrouted stops, in current
/// time-window order, are candidates; the geographically nearest one wins.
/// The bounded window keeps early delivery windows near the front of the
/// route where an unconstrained nearest-neighbor would ignore them. When no
/// candidate has coordinates the first unrouted stop is taken as-is.
fn nearest_neighbor_chain(group: &mut RouteGroup, lookahead: usize) {
    let mut remaining = std::mem::take(&mut group.orders);
    let mut routed = Vec::with_capacity(remaining.len());
    let mut position = group.origin;
    let lookahead = lookahead.max(1);

    while !remaining.is_empty() {
        let mut pick = 0usize;
        if let Some(current) = position {
            let mut best = f64::INFINITY;
            for (i, order) in remaining.iter().take(lookahead).enumerate() {
                if let Some(stop) = order.position() {
                    let distance = haversine_km(current, stop);
                    if distance < best {
                        best = distance;
                        pick = i;
                    }
                }
            }
        }

        let order = remaining.remove(pick);
        if let Some(stop) = order.position() {
            position = Some(stop);
        }
        routed.push(order);
    }

    group.orders = routed;
}

/// 2-opt local search over the node sequence `[origin, stop 1, .., stop N]`.
///
/// Reverses the segment between two edges whenever the reconnection is
/// strictly shorter. Edge pairs touching a node without coordinates are
/// skipped, so coordinate-less stops ride along without breaking the scan.
/// Runs full passes until a pass finds no improvement or `max_passes` is
/// reached.
fn two_opt(group: &mut RouteGroup, max_passes: usize) {
    let n = group.orders.len();
    if n < 2 {
        return;
    }

    // Node 0 is the route origin; node k (k >= 1) is stop k - 1.
    let origin = group.origin;
    let point = |orders: &[Order], node: usize| -> Option<(f64, f64)> {
        if node == 0 {
            origin
        } else {
            orders[node - 1].position()
        }
    };

    for _ in 0..max_passes {
        let mut improved = false;
        // Edges are (node, node + 1); the pair (i, j) must be disjoint and
        // j + 1 must still be a stop, so j ranges up to n - 1.
        for i in 0..n.saturating_sub(2) {
            for j in (i + 2)..n {
                let (Some(a), Some(b), Some(c), Some(d)) = (
                    point(&group.orders, i),
                    point(&group.orders, i + 1),
                    point(&group.orders, j),
                    point(&group.orders, j + 1),
                ) else {
                    continue;
                };

                let before = haversine_km(a, b) + haversine_km(c, d);
                let after = haversine_km(a, c) + haversine_km(b, d);
                if after + 1e-9 < before {
                    // Reverse nodes i+1..=j, i.e. stops i..j.
                    group.orders[i..j].reverse();
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }
}
