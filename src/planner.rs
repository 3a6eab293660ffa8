//! Range-constrained route planner (greedy charging stop insertion).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::conditions::TripConditions;
use crate::error::{InfeasibleReason, PlannerError, Result};
use crate::haversine::HaversineDistance;
use crate::metrics::TripMetrics;
use crate::model::{ChargingStationRef, GeoCoordinate, PlannedRoute, VehicleProfile};
use crate::selector::{OptimizeFor, StopSelector};
use crate::traits::{DistanceProvider, StationRepository};

/// Tunables for scoring and trip estimates. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerOptions {
    /// Speed used to turn charging hours into a distance penalty when optimizing for time.
    pub time_penalty_speed_kmh: f64,
    /// Weight of price per kWh against distance when optimizing for cost.
    pub price_weight: f64,
    /// Fraction of battery capacity added at every charging stop.
    pub target_charge_fraction: f64,
    /// Average driving speed for the trip duration estimate.
    pub average_speed_kmh: f64,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            time_penalty_speed_kmh: 50.0,
            price_weight: 10.0,
            target_charge_fraction: 0.8,
            average_speed_kmh: 60.0,
        }
    }
}

impl PlannerOptions {
    /// Check speeds are positive, the price weight is non-negative and the charge
    /// fraction lies within (0, 1].
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("time_penalty_speed_kmh", self.time_penalty_speed_kmh),
            ("average_speed_kmh", self.average_speed_kmh),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlannerError::invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.price_weight.is_finite() || self.price_weight < 0.0 {
            return Err(PlannerError::invalid(format!(
                "price_weight must be non-negative, got {}",
                self.price_weight
            )));
        }
        if !self.target_charge_fraction.is_finite()
            || self.target_charge_fraction <= 0.0
            || self.target_charge_fraction > 1.0
        {
            return Err(PlannerError::invalid(format!(
                "target_charge_fraction must be within (0, 1], got {}",
                self.target_charge_fraction
            )));
        }
        Ok(())
    }
}

/// Where a trip starts and ends, and what to optimize along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: GeoCoordinate,
    pub end: GeoCoordinate,
    pub optimize_for: OptimizeFor,
    #[serde(default)]
    pub conditions: TripConditions,
}

impl RouteRequest {
    /// A request with neutral trip conditions.
    pub fn new(
        start: impl Into<GeoCoordinate>,
        end: impl Into<GeoCoordinate>,
        optimize_for: impl Into<OptimizeFor>,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            optimize_for: optimize_for.into(),
            conditions: TripConditions::default(),
        }
    }

    /// Attach terrain and weather context to the energy estimate.
    pub fn with_conditions(mut self, conditions: TripConditions) -> Self {
        self.conditions = conditions;
        self
    }
}

/// One independent planning request for [`RoutePlanner::plan_routes`].
#[derive(Debug, Clone)]
pub struct PlanJob<'a> {
    pub request: RouteRequest,
    pub vehicle: VehicleProfile,
    pub stations: &'a [ChargingStationRef],
}

/// Greedy charging-stop planner over a pluggable distance source.
#[derive(Debug, Clone, Default)]
pub struct RoutePlanner<D = HaversineDistance> {
    options: PlannerOptions,
    distances: D,
}

impl RoutePlanner<HaversineDistance> {
    /// A planner using great-circle distances.
    pub fn new(options: PlannerOptions) -> Self {
        Self::with_distance_provider(options, HaversineDistance)
    }
}

impl<D: DistanceProvider> RoutePlanner<D> {
    /// A planner that measures every leg with `distances`.
    pub fn with_distance_provider(options: PlannerOptions, distances: D) -> Self {
        Self { options, distances }
    }

    /// Options this planner was built with.
    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    /// Plan a trip, inserting charging stops until the destination is in range.
    ///
    /// Every stop is reachable from the previous waypoint and lies strictly
    /// closer to the destination than it. At most `candidates.len() + 1` stops
    /// are inserted before the route is declared infeasible. Neither the
    /// vehicle nor the candidates are modified.
    pub fn plan_route(
        &self,
        request: &RouteRequest,
        vehicle: &VehicleProfile,
        candidates: &[ChargingStationRef],
    ) -> Result<PlannedRoute> {
        self.validate(request, vehicle, candidates)?;

        let end = request.end;
        let range_km = vehicle.range_km();
        let selector = StopSelector::new(vehicle, &self.options, &self.distances);
        let stop_limit = candidates.len() + 1;

        let mut remaining_km = range_km;
        let mut current = request.start;
        let mut stops: Vec<ChargingStationRef> = Vec::new();
        let mut waypoints = vec![request.start];

        loop {
            let to_go_km = self.distances.distance_km(current, end);
            if to_go_km <= remaining_km {
                break;
            }

            if stops.len() >= stop_limit {
                warn!(limit = stop_limit, "charging stop limit reached");
                return Err(PlannerError::RouteInfeasible {
                    reason: InfeasibleReason::StopLimitReached { limit: stop_limit },
                });
            }

            let progressing = candidates.iter().filter(|candidate| {
                self.distances.distance_km(candidate.coordinate, end) < to_go_km
            });

            let Some(next) =
                selector.select_next(current, end, remaining_km, progressing, request.optimize_for)
            else {
                warn!(
                    stops = stops.len(),
                    to_go_km,
                    remaining_km,
                    "no reachable charging stop"
                );
                return Err(PlannerError::RouteInfeasible {
                    reason: InfeasibleReason::NoReachableStop {
                        stops_planned: stops.len(),
                        remaining_distance_km: to_go_km,
                        range_km: remaining_km,
                    },
                });
            };

            debug!(
                station_id = %next.id,
                leg_km = self.distances.distance_km(current, next.coordinate),
                stop = stops.len() + 1,
                "inserted charging stop"
            );

            stops.push(next.clone());
            waypoints.push(next.coordinate);
            // charging restores the full planning range
            remaining_km = range_km;
            current = next.coordinate;
        }

        waypoints.push(end);

        let total_distance_km: f64 = waypoints
            .windows(2)
            .map(|leg| self.distances.distance_km(leg[0], leg[1]))
            .sum();

        let figures = TripMetrics::new(vehicle, &request.conditions, &self.options)
            .figures(total_distance_km, &stops);

        info!(
            stops = stops.len(),
            distance_km = total_distance_km,
            energy_kwh = figures.energy_kwh,
            time_hours = figures.time_hours,
            "route planned"
        );

        Ok(PlannedRoute::new(stops, waypoints, total_distance_km, figures))
    }

    /// Plan against a snapshot of the repository's catalog.
    pub fn plan_from_repository<R: StationRepository>(
        &self,
        request: &RouteRequest,
        vehicle: &VehicleProfile,
        repository: &R,
    ) -> Result<PlannedRoute> {
        let snapshot = repository.snapshot();
        self.plan_route(request, vehicle, &snapshot)
    }

    fn validate(
        &self,
        request: &RouteRequest,
        vehicle: &VehicleProfile,
        candidates: &[ChargingStationRef],
    ) -> Result<()> {
        self.options.validate()?;
        request.start.validate().map_err(|err| err.with_context("start"))?;
        request.end.validate().map_err(|err| err.with_context("end"))?;
        request.conditions.validate()?;
        vehicle.validate()?;
        candidates.iter().try_for_each(ChargingStationRef::validate)
    }
}

impl<D: DistanceProvider + Sync> RoutePlanner<D> {
    /// Plan independent jobs in parallel. Results are returned in job order.
    pub fn plan_routes(&self, jobs: &[PlanJob<'_>]) -> Vec<Result<PlannedRoute>> {
        jobs.par_iter()
            .map(|job| self.plan_route(&job.request, &job.vehicle, job.stations))
            .collect()
    }
}

/// Plan a trip with default options and haversine distances.
pub fn plan_route(
    start: GeoCoordinate,
    end: GeoCoordinate,
    vehicle: &VehicleProfile,
    candidates: &[ChargingStationRef],
    optimize_for_time: bool,
) -> Result<PlannedRoute> {
    RoutePlanner::new(PlannerOptions::default()).plan_route(
        &RouteRequest::new(start, end, optimize_for_time),
        vehicle,
        candidates,
    )
}
