//! Seams between the planner and its collaborators.
//!
//! The planner only needs distances and a snapshot of the station catalog.
//! Concrete apps implement these for their own storage and geometry.

use crate::model::{ChargingStationRef, GeoCoordinate};

/// Provides the distance in kilometers between two coordinates.
pub trait DistanceProvider {
    fn distance_km(&self, from: GeoCoordinate, to: GeoCoordinate) -> f64;
}

/// Storage for the charging station catalog.
///
/// Mutations happen here, never inside the planner, which works on
/// [`StationRepository::snapshot`].
pub trait StationRepository {
    fn load(&self, id: &str) -> Option<ChargingStationRef>;

    /// Insert a station, or replace the one with the same id.
    fn save(&mut self, station: ChargingStationRef);

    /// All stations in catalog order.
    fn snapshot(&self) -> Vec<ChargingStationRef>;
}
