//! Trip-level energy, time and cost derived from a finished stop sequence.

use crate::conditions::TripConditions;
use crate::model::{ChargingStationRef, CostBreakdown, RouteFigures, VehicleProfile};
use crate::planner::PlannerOptions;
use crate::selector::charging_time_hours;

/// Derives the figures attached to a [`crate::model::PlannedRoute`].
#[derive(Debug, Clone, Copy)]
pub struct TripMetrics<'a> {
    vehicle: &'a VehicleProfile,
    conditions: &'a TripConditions,
    options: &'a PlannerOptions,
}

impl<'a> TripMetrics<'a> {
    /// Metrics for `vehicle` under `conditions`.
    pub fn new(
        vehicle: &'a VehicleProfile,
        conditions: &'a TripConditions,
        options: &'a PlannerOptions,
    ) -> Self {
        Self {
            vehicle,
            conditions,
            options,
        }
    }

    /// Consumption over the whole distance, scaled by elevation and weather.
    pub fn energy_kwh(&self, total_distance_km: f64) -> f64 {
        total_distance_km
            * (self.vehicle.efficiency_kwh_per_100km / 100.0)
            * self.conditions.elevation_factor()
            * self.conditions.weather_factor()
    }

    /// Driving time at the assumed average speed plus every charging session.
    pub fn time_hours(&self, total_distance_km: f64, stops: &[ChargingStationRef]) -> f64 {
        let driving = total_distance_km / self.options.average_speed_kmh;
        let charging: f64 = stops
            .iter()
            .map(|stop| charging_time_hours(self.vehicle, stop, self.options))
            .sum();
        driving + charging
    }

    /// Charging cost at every stop plus the base energy cost.
    pub fn cost(&self, stops: &[ChargingStationRef]) -> CostBreakdown {
        let required_kwh = self
            .vehicle
            .required_charge_kwh(self.options.target_charge_fraction);
        let charging = stops
            .iter()
            .map(|stop| stop.charging_cost(required_kwh))
            .sum();
        CostBreakdown::new(self.conditions.base_energy_cost, charging)
    }

    pub(crate) fn figures(
        &self,
        total_distance_km: f64,
        stops: &[ChargingStationRef],
    ) -> RouteFigures {
        let energy_kwh = self.energy_kwh(total_distance_km);
        let efficiency_kwh_per_km = if total_distance_km > 0.0 {
            energy_kwh / total_distance_km
        } else {
            0.0
        };

        RouteFigures {
            energy_kwh,
            time_hours: self.time_hours(total_distance_km, stops),
            cost: self.cost(stops),
            efficiency_kwh_per_km,
        }
    }
}
