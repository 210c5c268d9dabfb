//! Domain value types for dispatch planning.
//!
//! Orders and drivers are snapshots the caller loads from its own storage.
//! The optimizer reads them and returns a fresh projection of the assignment
//! fields (`driver_id`, `route_index`, `status`, `locked_to_driver`);
//! persisting that projection is the caller's job.

use serde::{Deserialize, Serialize};

/// Unique identifier of a delivery order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier of a driver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(String);

impl DriverId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Assigned,
    InProgress,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Delivered and cancelled orders are frozen; they never re-enter
    /// planning.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// Lifecycle state of a driver.
///
/// The optimizer does not filter on this; callers pass active drivers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Active,
    Inactive,
}

/// A delivery task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Geocoded coordinates. Orders without both are excluded from
    /// geographic assignment and sequencing but still reported unassigned.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: OrderStatus,
    /// `None` means unassigned.
    pub driver_id: Option<DriverId>,
    /// 1-based position within the driver's route, reset every run.
    pub route_index: Option<u32>,
    /// Pinned by a dispatcher: the current `driver_id` is authoritative and
    /// the order is excluded from reassignment, but it is still sequenced
    /// and counted toward that driver's load.
    pub locked_to_driver: bool,
    /// Zero-padded `HH:MM` time of day. Soft ordering preference only.
    pub time_window_start: Option<String>,
    pub time_window_end: Option<String>,
}

impl Order {
    /// Usable coordinates, or `None` when either component is missing or
    /// non-finite.
    pub fn position(&self) -> Option<(f64, f64)> {
        finite_pair(self.latitude, self.longitude)
    }

    /// True when the order is pinned to a concrete driver.
    pub fn is_locked(&self) -> bool {
        self.locked_to_driver && self.driver_id.is_some()
    }
}

/// An assignable delivery agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    /// Live GPS position, preferred as the route origin.
    pub current_lat: Option<f64>,
    pub current_lng: Option<f64>,
    /// Home base, used when no live position is known.
    pub default_start_lat: Option<f64>,
    pub default_start_lng: Option<f64>,
    pub status: DriverStatus,
}

impl Driver {
    /// Route origin: live position, falling back to the home base.
    pub fn start_position(&self) -> Option<(f64, f64)> {
        finite_pair(self.current_lat, self.current_lng)
            .or_else(|| finite_pair(self.default_start_lat, self.default_start_lng))
    }
}

fn finite_pair(lat: Option<f64>, lng: Option<f64>) -> Option<(f64, f64)> {
    match (lat, lng) {
        (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
        _ => None,
    }
}
