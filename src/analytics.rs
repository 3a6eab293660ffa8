//! Trip-history aggregation over planned routes.
//!
//! Feeds usage, efficiency, environmental and cost-comparison figures to a
//! reporting layer. Nothing here affects planning.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::model::{PlannedRoute, VehicleProfile};
use crate::planner::PlannerOptions;
use crate::selector::charging_time_hours;

/// Conversion rates used for the environmental and cost comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsRates {
    /// CO2 avoided per kilometer driven electric instead of on petrol.
    pub carbon_saved_kg_per_km: f64,
    /// CO2 absorbed by one tree per year.
    pub tree_absorption_kg_per_year: f64,
    pub electricity_price_per_kwh: f64,
    pub petrol_litres_per_km: f64,
    pub petrol_price_per_litre: f64,
    /// CO2 released by burning one litre of petrol.
    pub petrol_co2_kg_per_litre: f64,
    /// CO2 released per kWh drawn from the grid.
    pub grid_co2_kg_per_kwh: f64,
    /// Scale from the recorded history to a yearly projection. The history is
    /// read as one month of driving.
    pub yearly_multiplier: f64,
}

impl Default for AnalyticsRates {
    fn default() -> Self {
        Self {
            carbon_saved_kg_per_km: 0.2,
            tree_absorption_kg_per_year: 21.7,
            electricity_price_per_kwh: 15.0,
            petrol_litres_per_km: 0.1,
            petrol_price_per_litre: 180.0,
            petrol_co2_kg_per_litre: 2.31,
            grid_co2_kg_per_kwh: 0.85,
            yearly_multiplier: 12.0,
        }
    }
}

impl AnalyticsRates {
    /// Check every rate is finite and non-negative, and that the divisors are positive.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("carbon_saved_kg_per_km", self.carbon_saved_kg_per_km),
            ("electricity_price_per_kwh", self.electricity_price_per_kwh),
            ("petrol_litres_per_km", self.petrol_litres_per_km),
            ("petrol_price_per_litre", self.petrol_price_per_litre),
            ("petrol_co2_kg_per_litre", self.petrol_co2_kg_per_litre),
            ("grid_co2_kg_per_kwh", self.grid_co2_kg_per_kwh),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PlannerError::invalid(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        let positive = [
            ("tree_absorption_kg_per_year", self.tree_absorption_kg_per_year),
            ("yearly_multiplier", self.yearly_multiplier),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlannerError::invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Tailpipe versus grid emissions for a single journey.
    ///
    /// `ev_kwh_per_km` and `petrol_litres_per_km` describe the two vehicles
    /// being compared.
    pub fn sustainability_impact(
        &self,
        distance_km: f64,
        ev_kwh_per_km: f64,
        petrol_litres_per_km: f64,
    ) -> SustainabilityImpact {
        self.emissions(distance_km * petrol_litres_per_km, distance_km * ev_kwh_per_km)
    }

    fn emissions(&self, petrol_litres: f64, ev_kwh: f64) -> SustainabilityImpact {
        let petrol_co2_kg = petrol_litres * self.petrol_co2_kg_per_litre;
        let ev_co2_kg = ev_kwh * self.grid_co2_kg_per_kwh;
        SustainabilityImpact {
            petrol_co2_kg,
            ev_co2_kg,
            co2_savings_kg: petrol_co2_kg - ev_co2_kg,
        }
    }
}

/// CO2 of the same distance driven on petrol and on grid electricity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityImpact {
    pub petrol_co2_kg: f64,
    pub ev_co2_kg: f64,
    /// Negative when the grid is dirtier than the petrol alternative.
    pub co2_savings_kg: f64,
}

/// The figures of one trip that the history keeps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub distance_km: f64,
    pub energy_kwh: f64,
    pub charging_sessions: usize,
    pub charging_hours: f64,
}

impl TripRecord {
    /// Extract the figures of a planned route, charging at every stop for `vehicle`.
    pub fn from_route(
        route: &PlannedRoute,
        vehicle: &VehicleProfile,
        options: &PlannerOptions,
    ) -> Self {
        Self {
            distance_km: route.total_distance_km(),
            energy_kwh: route.estimated_energy_kwh(),
            charging_sessions: route.ordered_stops().len(),
            charging_hours: route
                .ordered_stops()
                .iter()
                .map(|stop| charging_time_hours(vehicle, stop, options))
                .sum(),
        }
    }

    fn energy_per_km(&self) -> Option<f64> {
        (self.distance_km > 0.0).then(|| self.energy_kwh / self.distance_km)
    }
}

/// Totals over every recorded trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    pub total_trips: usize,
    pub total_distance_km: f64,
    pub total_energy_kwh: f64,
    pub average_trip_km: f64,
}

/// Consumption of the latest trip against the best one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyStats {
    /// kWh/km of the most recent trip with a non-zero distance.
    pub latest_kwh_per_km: f64,
    pub best_kwh_per_km: f64,
    /// How far the latest trip is above the best one, in percent.
    pub improvement_potential_percent: f64,
}

/// Emissions avoided by driving electric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalImpact {
    /// Flat per-kilometer estimate of CO2 avoided.
    pub carbon_saved_kg: f64,
    pub trees_equivalent: f64,
    /// Cumulative energy delivered electrically instead of from fuel.
    pub energy_saved_kwh: f64,
    /// Grid-aware comparison over the whole history.
    pub emissions: SustainabilityImpact,
}

/// EV versus petrol running cost, for the history and projected over a year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostComparison {
    pub ev_cost: f64,
    pub petrol_cost: f64,
    pub savings: f64,
    pub ev_cost_yearly: f64,
    pub petrol_cost_yearly: f64,
}

/// Charging sessions across the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargingStats {
    pub sessions: usize,
    pub total_hours: f64,
    pub average_hours: f64,
}

/// Everything a reporting layer shows for a trip history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub usage: UsageStats,
    pub efficiency: EfficiencyStats,
    pub environment: EnvironmentalImpact,
    pub cost: CostComparison,
    pub charging: ChargingStats,
}

/// Append-only record of completed trips.
#[derive(Debug, Clone, Default)]
pub struct TripHistory {
    rates: AnalyticsRates,
    trips: Vec<TripRecord>,
}

impl TripHistory {
    /// An empty history. Fails if `rates` does not validate.
    pub fn new(rates: AnalyticsRates) -> Result<Self> {
        rates.validate()?;
        Ok(Self {
            rates,
            trips: Vec::new(),
        })
    }

    /// Rates the summary is computed with.
    pub fn rates(&self) -> &AnalyticsRates {
        &self.rates
    }

    /// Record a planned route as a completed trip.
    pub fn add_trip(
        &mut self,
        route: &PlannedRoute,
        vehicle: &VehicleProfile,
        options: &PlannerOptions,
    ) {
        self.add_record(TripRecord::from_route(route, vehicle, options));
    }

    /// Record a trip from its figures alone.
    pub fn add_record(&mut self, record: TripRecord) {
        self.trips.push(record);
    }

    pub fn trips(&self) -> &[TripRecord] {
        &self.trips
    }

    /// Aggregate every recorded trip. An empty history yields all zeros.
    pub fn summary(&self) -> TripSummary {
        let rates = &self.rates;
        let total_trips = self.trips.len();
        let total_distance_km: f64 = self.trips.iter().map(|t| t.distance_km).sum();
        let total_energy_kwh: f64 = self.trips.iter().map(|t| t.energy_kwh).sum();

        let usage = UsageStats {
            total_trips,
            total_distance_km,
            total_energy_kwh,
            average_trip_km: if total_trips > 0 {
                total_distance_km / total_trips as f64
            } else {
                0.0
            },
        };

        let efficiency = self.efficiency();

        let petrol_litres = total_distance_km * rates.petrol_litres_per_km;
        let carbon_saved_kg = total_distance_km * rates.carbon_saved_kg_per_km;
        let environment = EnvironmentalImpact {
            carbon_saved_kg,
            trees_equivalent: carbon_saved_kg / rates.tree_absorption_kg_per_year,
            energy_saved_kwh: total_energy_kwh,
            emissions: rates.emissions(petrol_litres, total_energy_kwh),
        };

        let ev_cost = total_energy_kwh * rates.electricity_price_per_kwh;
        let petrol_cost = petrol_litres * rates.petrol_price_per_litre;
        let cost = CostComparison {
            ev_cost,
            petrol_cost,
            savings: petrol_cost - ev_cost,
            ev_cost_yearly: ev_cost * rates.yearly_multiplier,
            petrol_cost_yearly: petrol_cost * rates.yearly_multiplier,
        };

        let sessions: usize = self.trips.iter().map(|t| t.charging_sessions).sum();
        let total_hours: f64 = self.trips.iter().map(|t| t.charging_hours).sum();
        let charging = ChargingStats {
            sessions,
            total_hours,
            average_hours: if sessions > 0 {
                total_hours / sessions as f64
            } else {
                0.0
            },
        };

        TripSummary {
            usage,
            efficiency,
            environment,
            cost,
            charging,
        }
    }

    fn efficiency(&self) -> EfficiencyStats {
        let per_km: Vec<f64> = self
            .trips
            .iter()
            .filter_map(TripRecord::energy_per_km)
            .collect();

        let Some(&latest) = per_km.last() else {
            return EfficiencyStats::default();
        };
        let best = per_km.iter().copied().fold(f64::INFINITY, f64::min);
        let improvement_potential_percent = if latest > 0.0 {
            (latest - best) / latest * 100.0
        } else {
            0.0
        };

        EfficiencyStats {
            latest_kwh_per_km: latest,
            best_kwh_per_km: best,
            improvement_potential_percent,
        }
    }
}
