//! Scoring and selection of the next charging stop.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{ChargingStationRef, GeoCoordinate, VehicleProfile};
use crate::planner::PlannerOptions;
use crate::traits::DistanceProvider;

/// What the planner minimizes when choosing between stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizeFor {
    #[default]
    Time,
    Cost,
}

impl From<bool> for OptimizeFor {
    /// `true` selects time optimization.
    fn from(optimize_for_time: bool) -> Self {
        if optimize_for_time {
            Self::Time
        } else {
            Self::Cost
        }
    }
}

/// Score of a qualifying candidate. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopScore {
    /// Position of the candidate in the slice it was ranked from.
    pub index: usize,
    pub distance_km: f64,
    pub score: f64,
}

/// Hours needed to charge `vehicle` to the target fraction at `station`.
pub fn charging_time_hours(
    vehicle: &VehicleProfile,
    station: &ChargingStationRef,
    options: &PlannerOptions,
) -> f64 {
    vehicle.required_charge_kwh(options.target_charge_fraction) / station.charging_rate_kw
}

/// Picks the best next charging stop from the current position.
#[derive(Debug, Clone, Copy)]
pub struct StopSelector<'a, D> {
    vehicle: &'a VehicleProfile,
    options: &'a PlannerOptions,
    distances: &'a D,
}

impl<'a, D: DistanceProvider> StopSelector<'a, D> {
    pub fn new(
        vehicle: &'a VehicleProfile,
        options: &'a PlannerOptions,
        distances: &'a D,
    ) -> Self {
        Self {
            vehicle,
            options,
            distances,
        }
    }

    /// Score a candidate that lies `distance_km` away.
    pub fn score(
        &self,
        distance_km: f64,
        candidate: &ChargingStationRef,
        mode: OptimizeFor,
    ) -> f64 {
        match mode {
            // charging hours expressed as a distance-equivalent penalty
            OptimizeFor::Time => {
                distance_km
                    + charging_time_hours(self.vehicle, candidate, self.options)
                        * self.options.time_penalty_speed_kmh
            }
            OptimizeFor::Cost => distance_km + candidate.price_per_kwh * self.options.price_weight,
        }
    }

    /// Score every qualifying candidate, in input order.
    ///
    /// A candidate qualifies when it is available and no farther than
    /// `remaining_range_km` from `current`.
    pub fn rank<'c, I>(
        &self,
        current: GeoCoordinate,
        remaining_range_km: f64,
        candidates: I,
        mode: OptimizeFor,
    ) -> Vec<StopScore>
    where
        I: IntoIterator<Item = &'c ChargingStationRef>,
    {
        candidates
            .into_iter()
            .enumerate()
            .filter(|(_, candidate)| candidate.is_available)
            .filter_map(|(index, candidate)| {
                let distance_km = self.distances.distance_km(current, candidate.coordinate);
                (distance_km <= remaining_range_km).then(|| StopScore {
                    index,
                    distance_km,
                    score: self.score(distance_km, candidate, mode),
                })
            })
            .collect()
    }

    /// Best qualifying stop among `candidates`, or `None` if nothing qualifies.
    ///
    /// Ties go to the candidate that comes first.
    pub fn select_next<'c, I>(
        &self,
        current: GeoCoordinate,
        destination: GeoCoordinate,
        remaining_range_km: f64,
        candidates: I,
        mode: OptimizeFor,
    ) -> Option<&'c ChargingStationRef>
    where
        I: IntoIterator<Item = &'c ChargingStationRef>,
    {
        let candidates: Vec<&ChargingStationRef> = candidates.into_iter().collect();
        let scores = self.rank(current, remaining_range_km, candidates.iter().copied(), mode);

        let mut best: Option<StopScore> = None;
        for score in scores {
            // strict comparison keeps the earliest of equal scores
            if best.is_none_or(|b| score.score < b.score) {
                best = Some(score);
            }
        }

        let best = best?;
        let station = candidates[best.index];
        debug!(
            station_id = %station.id,
            score = best.score,
            distance_km = best.distance_km,
            to_destination_km = self.distances.distance_km(station.coordinate, destination),
            remaining_km = remaining_range_km,
            ?mode,
            "selected charging stop"
        );
        Some(station)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haversine::HaversineDistance;

    /// Longitude difference read directly as kilometers.
    struct LineDistance;

    impl DistanceProvider for LineDistance {
        fn distance_km(&self, from: GeoCoordinate, to: GeoCoordinate) -> f64 {
            (to.longitude - from.longitude).abs()
        }
    }

    fn at(km: f64) -> GeoCoordinate {
        GeoCoordinate::new(0.0, km)
    }

    fn station(id: &str, km: f64, rate: f64, price: f64) -> ChargingStationRef {
        ChargingStationRef::new(id, at(km), rate, price)
    }

    #[test]
    fn test_charging_time_uses_eighty_percent() {
        let vehicle = VehicleProfile::new(50.0, 20.0);
        let options = PlannerOptions::default();
        let s = station("s", 0.0, 40.0, 1.0);
        assert!((charging_time_hours(&vehicle, &s, &options) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_time_score() {
        let vehicle = VehicleProfile::new(50.0, 20.0);
        let options = PlannerOptions::default();
        let selector = StopSelector::new(&vehicle, &options, &LineDistance);
        // 40 kWh at 40 kW = 1h -> 50 km penalty
        let score = selector.score(10.0, &station("s", 10.0, 40.0, 1.0), OptimizeFor::Time);
        assert!((score - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_cost_score() {
        let vehicle = VehicleProfile::new(50.0, 20.0);
        let options = PlannerOptions::default();
        let selector = StopSelector::new(&vehicle, &options, &LineDistance);
        let score = selector.score(10.0, &station("s", 10.0, 40.0, 2.5), OptimizeFor::Cost);
        assert!((score - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_skips_unavailable_and_out_of_range() {
        let vehicle = VehicleProfile::new(50.0, 20.0);
        let options = PlannerOptions::default();
        let selector = StopSelector::new(&vehicle, &options, &LineDistance);
        let candidates = vec![
            station("closed", 5.0, 100.0, 0.0).unavailable(),
            station("far", 80.0, 100.0, 0.0),
            station("ok", 50.0, 50.0, 1.0),
        ];

        let picked = selector.select_next(at(0.0), at(200.0), 50.0, &candidates, OptimizeFor::Time);
        assert_eq!(picked.map(|s| s.id.as_str()), Some("ok"));

        let ranked = selector.rank(at(0.0), 50.0, &candidates, OptimizeFor::Time);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].index, 2);
    }

    #[test]
    fn test_none_when_nothing_qualifies() {
        let vehicle = VehicleProfile::new(50.0, 20.0);
        let options = PlannerOptions::default();
        let selector = StopSelector::new(&vehicle, &options, &LineDistance);
        let candidates = vec![station("far", 80.0, 100.0, 0.0)];
        let picked = selector.select_next(at(0.0), at(200.0), 50.0, &candidates, OptimizeFor::Cost);
        assert!(picked.is_none());
        let empty: Vec<ChargingStationRef> = Vec::new();
        let picked = selector.select_next(at(0.0), at(200.0), 50.0, &empty, OptimizeFor::Cost);
        assert!(picked.is_none());
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        let vehicle = VehicleProfile::new(50.0, 20.0);
        let options = PlannerOptions::default();
        let selector = StopSelector::new(&vehicle, &options, &LineDistance);
        let candidates = vec![
            station("first", 20.0, 50.0, 1.0),
            station("second", 20.0, 50.0, 1.0),
        ];
        let picked = selector.select_next(at(0.0), at(100.0), 40.0, &candidates, OptimizeFor::Time);
        assert_eq!(picked.map(|s| s.id.as_str()), Some("first"));

        let reversed: Vec<_> = candidates.iter().rev().cloned().collect();
        let picked = selector.select_next(at(0.0), at(100.0), 40.0, &reversed, OptimizeFor::Time);
        assert_eq!(picked.map(|s| s.id.as_str()), Some("second"));
    }

    #[test]
    fn test_mode_changes_choice() {
        let vehicle = VehicleProfile::new(50.0, 20.0);
        let options = PlannerOptions::default();
        let selector = StopSelector::new(&vehicle, &options, &LineDistance);
        // fast but pricey vs slow but cheap, same distance
        let candidates = vec![
            station("fast", 30.0, 150.0, 20.0),
            station("cheap", 30.0, 7.0, 5.0),
        ];
        let time = selector.select_next(at(0.0), at(100.0), 40.0, &candidates, OptimizeFor::Time);
        let cost = selector.select_next(at(0.0), at(100.0), 40.0, &candidates, OptimizeFor::Cost);
        assert_eq!(time.map(|s| s.id.as_str()), Some("fast"));
        assert_eq!(cost.map(|s| s.id.as_str()), Some("cheap"));
    }

    #[test]
    fn test_works_with_haversine() {
        let vehicle = VehicleProfile::new(50.0, 20.0);
        let options = PlannerOptions::default();
        let selector = StopSelector::new(&vehicle, &options, &HaversineDistance);
        let here = GeoCoordinate::new(27.7172, 85.3240);
        let candidates = vec![ChargingStationRef::new("ktm", here, 50.0, 10.0)];
        let picked = selector.select_next(here, here, 1.0, &candidates, OptimizeFor::Cost);
        assert!(picked.is_some());
    }

    #[test]
    fn test_optimize_for_from_flag() {
        assert_eq!(OptimizeFor::from(true), OptimizeFor::Time);
        assert_eq!(OptimizeFor::from(false), OptimizeFor::Cost);
    }
}
