mod fixtures;

use ev_route_planner::analytics::{AnalyticsRates, TripHistory};
use ev_route_planner::conditions::{TripConditions, Weather, WeatherCondition};
use ev_route_planner::repository::InMemoryStationRepository;
use ev_route_planner::traits::StationRepository;
use ev_route_planner::{PlanJob, PlannerOptions, RoutePlanner, RouteRequest};

use fixtures::{vehicle_with_range, westbound_stations, KATHMANDU, NEPALGUNJ, POKHARA};

#[test]
fn test_batch_planning_matches_sequential_planning() {
    let planner = RoutePlanner::new(PlannerOptions::default());
    let stations = westbound_stations();

    let jobs: Vec<PlanJob<'_>> = [40.0, 80.0, 100.0, 150.0, 400.0]
        .into_iter()
        .flat_map(|range| {
            let stations = stations.as_slice();
            [true, false].into_iter().map(move |time| PlanJob {
                request: RouteRequest::new(KATHMANDU.coords(), NEPALGUNJ.coords(), time),
                vehicle: vehicle_with_range(range),
                stations,
            })
        })
        .collect();

    let parallel = planner.plan_routes(&jobs);
    assert_eq!(parallel.len(), jobs.len());

    for (job, result) in jobs.iter().zip(parallel) {
        let sequential = planner.plan_route(&job.request, &job.vehicle, job.stations);
        match (result, sequential) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
            (a, b) => panic!("parallel {a:?} disagrees with sequential {b:?}"),
        }
    }
}

#[test]
fn test_repository_snapshot_reflects_availability_changes() {
    let planner = RoutePlanner::new(PlannerOptions::default());
    let vehicle = vehicle_with_range(100.0);
    let request = RouteRequest::new(KATHMANDU.coords(), NEPALGUNJ.coords(), true);
    let mut repository: InMemoryStationRepository = westbound_stations().into_iter().collect();

    assert!(planner.plan_from_repository(&request, &vehicle, &repository).is_ok());

    let lamahi = repository.load("Lamahi").expect("fixture station");
    repository.save(lamahi.unavailable());
    let err = planner
        .plan_from_repository(&request, &vehicle, &repository)
        .unwrap_err();
    assert!(err.is_infeasible());
}

#[test]
fn test_harsh_conditions_raise_energy_but_not_distance() {
    let planner = RoutePlanner::new(PlannerOptions::default());
    let vehicle = vehicle_with_range(150.0);
    let calm = RouteRequest::new(KATHMANDU.coords(), POKHARA.coords(), true);
    let harsh = calm.clone().with_conditions(TripConditions {
        elevation_gain_m: 1000.0,
        weather: Some(Weather::new(WeatherCondition::Snowy, -2.0, 0.0)),
        base_energy_cost: 40.0,
    });

    let calm_route = planner.plan_route(&calm, &vehicle, &[]).unwrap();
    let harsh_route = planner.plan_route(&harsh, &vehicle, &[]).unwrap();

    assert_eq!(calm_route.total_distance_km(), harsh_route.total_distance_km());
    let expected = calm_route.estimated_energy_kwh() * 1.1 * 1.2 * 1.3;
    assert!((harsh_route.estimated_energy_kwh() - expected).abs() < 1e-9);
    assert_eq!(harsh_route.cost_breakdown().energy, 40.0);
    assert_eq!(harsh_route.cost_breakdown().total, 40.0);
}

#[test]
fn test_planned_route_serializes_for_display_layers() {
    let planner = RoutePlanner::new(PlannerOptions::default());
    let route = planner
        .plan_route(
            &RouteRequest::new(KATHMANDU.coords(), NEPALGUNJ.coords(), false),
            &vehicle_with_range(100.0),
            &westbound_stations(),
        )
        .unwrap();

    let json = serde_json::to_value(&route).unwrap();
    assert_eq!(json["status"], "PLANNED");
    assert_eq!(
        json["waypoints"].as_array().map(Vec::len),
        Some(route.ordered_stops().len() + 2)
    );
    assert_eq!(route.polyline().points(), route.waypoints());
    assert!((route.polyline().length_km() - route.total_distance_km()).abs() < 1e-9);
}

#[test]
fn test_trip_history_aggregates_planned_routes() {
    let options = PlannerOptions::default();
    let planner = RoutePlanner::new(options.clone());
    let vehicle = vehicle_with_range(100.0);
    let stations = westbound_stations();

    let long = planner
        .plan_route(
            &RouteRequest::new(KATHMANDU.coords(), NEPALGUNJ.coords(), true),
            &vehicle,
            &stations,
        )
        .unwrap();
    let short = planner
        .plan_route(
            &RouteRequest::new(POKHARA.coords(), fixtures::WESTBOUND_TOWNS[2].coords(), true),
            &vehicle,
            &stations,
        )
        .unwrap();

    let mut history = TripHistory::new(AnalyticsRates::default()).unwrap();
    history.add_trip(&long, &vehicle, &options);
    history.add_trip(&short, &vehicle, &options);

    let summary = history.summary();
    assert_eq!(summary.usage.total_trips, 2);
    let distance = long.total_distance_km() + short.total_distance_km();
    assert!((summary.usage.total_distance_km - distance).abs() < 1e-9);
    assert_eq!(summary.charging.sessions, long.ordered_stops().len());
    // 16 kWh per session at 50 kW
    assert!((summary.charging.average_hours - 0.32).abs() < 1e-9);
    assert!(summary.cost.savings > 0.0);
}
