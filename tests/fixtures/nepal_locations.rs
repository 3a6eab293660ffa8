//! Nepal locations for realistic test fixtures.
//!
//! Coordinates are town centres along the Prithvi and Mahendra highways.
//! Straight-line distances between them are what the planner sees.

#![allow(dead_code)]

use ev_route_planner::{ChargingStationRef, GeoCoordinate, VehicleProfile};

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

    pub fn coords(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.lat, self.lng)
    }

    /// An available station at this location, named after it.
    pub fn station(&self, charging_rate_kw: f64, price_per_kwh: f64) -> ChargingStationRef {
        ChargingStationRef::new(self.name, self.coords(), charging_rate_kw, price_per_kwh)
    }
}

// ============================================================================
// Trip endpoints
// ============================================================================

pub const KATHMANDU: Location = Location::new("Kathmandu", 27.7172, 85.3240);
pub const POKHARA: Location = Location::new("Pokhara", 28.2096, 83.9856);
pub const NEPALGUNJ: Location = Location::new("Nepalgunj", 28.0500, 81.6167);

/// Halfway between Kathmandu and Pokhara (~71 km from each).
pub const KTM_PKR_MIDPOINT: Location = Location::new("Midpoint", 27.9634, 84.6548);

// ============================================================================
// Highway towns heading west from Kathmandu, in travel order
// ============================================================================

pub const WESTBOUND_TOWNS: &[Location] = &[
    Location::new("Hetauda", 27.4167, 85.0333),
    Location::new("Mugling", 27.8553, 84.5594),
    Location::new("Damauli", 27.9667, 84.2667),
    Location::new("Pokhara", 28.2096, 83.9856),
    Location::new("Butwal", 27.7006, 83.4483),
    Location::new("Lamahi", 27.8700, 82.5300),
];

/// DC fast chargers at every westbound town, all priced the same.
pub fn westbound_stations() -> Vec<ChargingStationRef> {
    WESTBOUND_TOWNS
        .iter()
        .map(|town| town.station(50.0, 12.0))
        .collect()
}

/// Vehicle with exactly `range_km` of range at full charge (20 kWh/100 km).
pub fn vehicle_with_range(range_km: f64) -> VehicleProfile {
    VehicleProfile::new(range_km * 0.2, 20.0)
}
