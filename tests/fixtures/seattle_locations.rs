//! Real Seattle-area locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. Spread across downtown, the
//! north end, the Eastside and South King County so multi-driver scenarios
//! get geographically distinct clusters.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Depots / driver start points
// ============================================================================

pub const DEPOTS: &[Location] = &[
    Location::new("SoDo Warehouse", 47.5801, -122.3340),
    Location::new("Interbay Hub", 47.6420, -122.3790),
    Location::new("Bellevue Depot", 47.6101, -122.1885),
];

// ============================================================================
// Downtown / central Seattle stops
// ============================================================================

pub const DOWNTOWN_STOPS: &[Location] = &[
    Location::new("Pike Place Market", 47.6097, -122.3422),
    Location::new("Seattle Central Library", 47.6067, -122.3325),
    Location::new("Columbia Center", 47.6045, -122.3308),
    Location::new("Amazon Spheres", 47.6155, -122.3391),
    Location::new("Space Needle", 47.6205, -122.3493),
    Location::new("Climate Pledge Arena", 47.6221, -122.3540),
    Location::new("Kerry Park", 47.6295, -122.3599),
    Location::new("Cal Anderson Park", 47.6174, -122.3190),
    Location::new("T-Mobile Park", 47.5914, -122.3325),
    Location::new("Lumen Field", 47.5952, -122.3316),
];

// ============================================================================
// North end stops
// ============================================================================

pub const NORTH_STOPS: &[Location] = &[
    Location::new("Gas Works Park", 47.6456, -122.3344),
    Location::new("Fremont Troll", 47.6510, -122.3473),
    Location::new("Ballard Locks", 47.6655, -122.3976),
    Location::new("Woodland Park Zoo", 47.6685, -122.3536),
    Location::new("Green Lake", 47.6806, -122.3293),
    Location::new("University of Washington", 47.6553, -122.3035),
    Location::new("Northgate Station", 47.7062, -122.3283),
    Location::new("Lake City", 47.7195, -122.2950),
];

// ============================================================================
// Eastside stops
// ============================================================================

pub const EASTSIDE_STOPS: &[Location] = &[
    Location::new("Bellevue Square", 47.6158, -122.2040),
    Location::new("Microsoft Campus", 47.6423, -122.1391),
    Location::new("Kirkland Waterfront", 47.6769, -122.2060),
    Location::new("Renton Landing", 47.5031, -122.2003),
];

// ============================================================================
// South / west stops
// ============================================================================

pub const SOUTH_STOPS: &[Location] = &[
    Location::new("Georgetown", 47.5480, -122.3230),
    Location::new("Columbia City", 47.5595, -122.2870),
    Location::new("Beacon Hill", 47.5790, -122.3110),
    Location::new("West Seattle Junction", 47.5612, -122.3871),
    Location::new("Alki Beach", 47.5812, -122.4088),
    Location::new("Westfield Southcenter", 47.4590, -122.2576),
];

/// Every delivery stop (depots excluded).
pub fn all_stops() -> Vec<Location> {
    let mut all = Vec::with_capacity(30);
    all.extend_from_slice(DOWNTOWN_STOPS);
    all.extend_from_slice(NORTH_STOPS);
    all.extend_from_slice(EASTSIDE_STOPS);
    all.extend_from_slice(SOUTH_STOPS);
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_in_seattle_area() {
        for loc in all_stops() {
            assert!(loc.lat > 47.3 && loc.lat < 47.8, "{} lat out of range: {}", loc.name, loc.lat);
            assert!(loc.lng > -122.5 && loc.lng < -122.0, "{} lng out of range: {}", loc.name, loc.lng);
        }
    }
}
