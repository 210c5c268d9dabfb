//! Great-circle geometry helpers.
//!
//! Straight-line distance is a deliberate approximation: the planner ranks
//! candidates and compares route variants, it does not promise road-accurate
//! travel estimates.

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two (lat, lng) points in kilometers.
///
/// Deterministic and symmetric. Non-finite input yields non-finite output;
/// callers guard coordinates before calling.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Total length of a route that starts at `origin` and visits `stops` in
/// order, in kilometers.
///
/// A leg with a missing endpoint contributes nothing; the previous known
/// position carries over to the next leg.
pub fn route_length_km(origin: Option<(f64, f64)>, stops: &[Option<(f64, f64)>]) -> f64 {
    let mut total = 0.0;
    let mut previous = origin;
    for stop in stops {
        if let (Some(from), Some(to)) = (previous, *stop) {
            total += haversine_km(from, to);
        }
        if stop.is_some() {
            previous = *stop;
        }
    }
    total
}
