//! Plain data consumed and produced by the planner.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::polyline::Polyline;

/// A point on the Earth's surface in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Build a coordinate without validating it.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both components are finite and within their valid ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(PlannerError::invalid(format!(
                "latitude must be within -90..=90, got {}",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(PlannerError::invalid(format!(
                "longitude must be within -180..=180, got {}",
                self.longitude
            )));
        }
        Ok(())
    }
}

impl From<(f64, f64)> for GeoCoordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Battery profile of the vehicle making the trip.
///
/// Range is derived from the other fields on every read, so it always
/// reflects the current capacity, efficiency and charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub battery_capacity_kwh: f64,
    pub efficiency_kwh_per_100km: f64,
    pub state_of_charge_percent: f64,
}

impl VehicleProfile {
    /// A fully charged vehicle.
    pub fn new(battery_capacity_kwh: f64, efficiency_kwh_per_100km: f64) -> Self {
        Self {
            battery_capacity_kwh,
            efficiency_kwh_per_100km,
            state_of_charge_percent: 100.0,
        }
    }

    /// Same vehicle at `percent` state of charge.
    pub fn with_state_of_charge(mut self, percent: f64) -> Self {
        self.state_of_charge_percent = percent;
        self
    }

    /// Distance travelable at the current state of charge.
    pub fn range_km(&self) -> f64 {
        self.battery_capacity_kwh * self.state_of_charge_percent / 100.0
            / (self.efficiency_kwh_per_100km / 100.0)
    }

    /// Energy added by a charging session that targets `target_fraction` of capacity.
    pub fn required_charge_kwh(&self, target_fraction: f64) -> f64 {
        self.battery_capacity_kwh * target_fraction
    }

    /// Check capacity and efficiency are positive and that some range remains.
    pub fn validate(&self) -> Result<()> {
        if !self.battery_capacity_kwh.is_finite() || self.battery_capacity_kwh <= 0.0 {
            return Err(PlannerError::invalid(format!(
                "battery capacity must be positive, got {}",
                self.battery_capacity_kwh
            )));
        }
        if !self.efficiency_kwh_per_100km.is_finite() || self.efficiency_kwh_per_100km <= 0.0 {
            return Err(PlannerError::invalid(format!(
                "efficiency must be positive, got {}",
                self.efficiency_kwh_per_100km
            )));
        }
        if !self.state_of_charge_percent.is_finite() || self.state_of_charge_percent < 0.0 {
            return Err(PlannerError::invalid(format!(
                "state of charge must be a non-negative percentage, got {}",
                self.state_of_charge_percent
            )));
        }
        let range = self.range_km();
        if range <= 0.0 {
            return Err(PlannerError::invalid(format!(
                "vehicle range must be positive, got {range}"
            )));
        }
        Ok(())
    }
}

/// Snapshot of a charging station as seen by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingStationRef {
    pub id: String,
    pub coordinate: GeoCoordinate,
    pub charging_rate_kw: f64,
    pub price_per_kwh: f64,
    pub is_available: bool,
}

impl ChargingStationRef {
    /// An available station.
    pub fn new(
        id: impl Into<String>,
        coordinate: GeoCoordinate,
        charging_rate_kw: f64,
        price_per_kwh: f64,
    ) -> Self {
        Self {
            id: id.into(),
            coordinate,
            charging_rate_kw,
            price_per_kwh,
            is_available: true,
        }
    }

    /// Same station marked out of service.
    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }

    /// Price of buying `kwh` here.
    pub fn charging_cost(&self, kwh: f64) -> f64 {
        kwh * self.price_per_kwh
    }

    /// Check the id, coordinate, rate and price.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(PlannerError::invalid("station id must not be empty"));
        }
        self.coordinate
            .validate()
            .map_err(|err| err.with_context(&format!("station {}", self.id)))?;
        if !self.charging_rate_kw.is_finite() || self.charging_rate_kw <= 0.0 {
            return Err(PlannerError::invalid(format!(
                "station {}: charging rate must be positive, got {}",
                self.id, self.charging_rate_kw
            )));
        }
        if !self.price_per_kwh.is_finite() || self.price_per_kwh < 0.0 {
            return Err(PlannerError::invalid(format!(
                "station {}: price per kWh must be non-negative, got {}",
                self.id, self.price_per_kwh
            )));
        }
        Ok(())
    }
}

/// Trip cost split into base energy and charging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Home/base electricity cost, zero unless supplied with the trip conditions.
    pub energy: f64,
    /// Cost of all charging sessions along the route.
    pub charging: f64,
    pub total: f64,
}

impl CostBreakdown {
    /// Breakdown whose total is the sum of both parts.
    pub fn new(energy: f64, charging: f64) -> Self {
        Self {
            energy,
            charging,
            total: energy + charging,
        }
    }
}

/// Lifecycle state of a trip. The planner only ever produces `Planned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

/// Result of a successful planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRoute {
    start: GeoCoordinate,
    end: GeoCoordinate,
    ordered_stops: Vec<ChargingStationRef>,
    waypoints: Vec<GeoCoordinate>,
    total_distance_km: f64,
    estimated_energy_kwh: f64,
    estimated_time_hours: f64,
    cost_breakdown: CostBreakdown,
    energy_efficiency_kwh_per_km: f64,
    status: RouteStatus,
}

/// Trip-level figures attached to a route once its stops are final.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RouteFigures {
    pub energy_kwh: f64,
    pub time_hours: f64,
    pub cost: CostBreakdown,
    pub efficiency_kwh_per_km: f64,
}

impl PlannedRoute {
    pub(crate) fn new(
        ordered_stops: Vec<ChargingStationRef>,
        waypoints: Vec<GeoCoordinate>,
        total_distance_km: f64,
        figures: RouteFigures,
    ) -> Self {
        debug_assert_eq!(waypoints.len(), ordered_stops.len() + 2);
        Self {
            start: waypoints[0],
            end: waypoints[waypoints.len() - 1],
            ordered_stops,
            waypoints,
            total_distance_km,
            estimated_energy_kwh: figures.energy_kwh,
            estimated_time_hours: figures.time_hours,
            cost_breakdown: figures.cost,
            energy_efficiency_kwh_per_km: figures.efficiency_kwh_per_km,
            status: RouteStatus::Planned,
        }
    }

    pub fn start(&self) -> GeoCoordinate {
        self.start
    }

    pub fn end(&self) -> GeoCoordinate {
        self.end
    }

    pub fn ordered_stops(&self) -> &[ChargingStationRef] {
        &self.ordered_stops
    }

    /// Start, each charging stop, then end.
    pub fn waypoints(&self) -> &[GeoCoordinate] {
        &self.waypoints
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn estimated_energy_kwh(&self) -> f64 {
        self.estimated_energy_kwh
    }

    pub fn estimated_time_hours(&self) -> f64 {
        self.estimated_time_hours
    }

    pub fn cost_breakdown(&self) -> CostBreakdown {
        self.cost_breakdown
    }

    /// Zero when the route has no length.
    pub fn energy_efficiency_kwh_per_km(&self) -> f64 {
        self.energy_efficiency_kwh_per_km
    }

    pub fn status(&self) -> RouteStatus {
        self.status
    }

    /// Geometry for a map overlay.
    pub fn polyline(&self) -> Polyline {
        Polyline::new(self.waypoints.clone())
    }
}
