//! Polyline representation for route geometries.
//!
//! A planned route's waypoints as an ordered coordinate sequence, ready for
//! a map overlay. Encoding to a compact wire format belongs to the display
//! layer, not the planner.

use serde::{Deserialize, Serialize};

use crate::haversine::distance_km;
use crate::model::GeoCoordinate;

/// Ordered points of a route geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<GeoCoordinate>,
}

impl Polyline {
    /// Wraps `points` as-is.
    pub fn new(points: Vec<GeoCoordinate>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[GeoCoordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<GeoCoordinate> {
        self.points
    }

    /// Sum of great-circle distances between consecutive points.
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|leg| distance_km(leg[0], leg[1]))
            .sum()
    }

    /// Latitude/longitude pairs, the shape most map widgets accept.
    pub fn lat_lng_pairs(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|point| (point.latitude, point.longitude))
            .collect()
    }
}

impl From<Vec<(f64, f64)>> for Polyline {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points.into_iter().map(GeoCoordinate::from).collect())
    }
}
