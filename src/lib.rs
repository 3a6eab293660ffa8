//! ev-route-planner core
//!
//! Range-constrained route planning for electric vehicles: great-circle
//! distances, greedy charging stop insertion, and trip metrics.

pub mod analytics;
pub mod conditions;
pub mod error;
pub mod haversine;
pub mod metrics;
pub mod model;
pub mod planner;
pub mod polyline;
pub mod repository;
pub mod selector;
pub mod traits;

pub use error::{InfeasibleReason, PlannerError, Result};
pub use model::{
    ChargingStationRef, CostBreakdown, GeoCoordinate, PlannedRoute, RouteStatus, VehicleProfile,
};
pub use planner::{plan_route, PlanJob, PlannerOptions, RoutePlanner, RouteRequest};
pub use selector::OptimizeFor;
