//! Test fixtures for dispatch-optimizer.
//!
//! Provides real Seattle-area locations for realistic dispatch scenarios.

pub mod seattle_locations;

pub use seattle_locations::*;
