//! Terrain and weather context that scales a trip's energy estimate.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Sky and precipitation state. Anything not listed drives like `Clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    #[default]
    Clear,
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Windy,
}

impl WeatherCondition {
    fn energy_multiplier(self) -> f64 {
        match self {
            Self::Clear | Self::Sunny | Self::Cloudy => 1.0,
            Self::Rainy => 1.1,
            Self::Snowy => 1.3,
            Self::Windy => 1.2,
        }
    }
}

/// Weather observed for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub condition: WeatherCondition,
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
}

impl Weather {
    /// Weather from its condition, temperature and wind speed.
    pub fn new(condition: WeatherCondition, temperature_c: f64, wind_speed_kmh: f64) -> Self {
        Self {
            condition,
            temperature_c,
            wind_speed_kmh,
        }
    }

    /// Multiplier on consumption: cold and heat cost more, as do wind and precipitation.
    pub fn energy_factor(&self) -> f64 {
        let mut factor = 1.0;
        if self.temperature_c < 10.0 {
            factor *= 1.2;
        } else if self.temperature_c > 30.0 {
            factor *= 1.15;
        }
        factor *= 1.0 + self.wind_speed_kmh / 100.0;
        factor * self.condition.energy_multiplier()
    }
}

/// Optional trip context. The default leaves the energy estimate unscaled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripConditions {
    /// Net elevation gain along the trip in meters.
    pub elevation_gain_m: f64,
    pub weather: Option<Weather>,
    /// Home/base electricity cost reported as the energy component of the trip cost.
    pub base_energy_cost: f64,
}

impl TripConditions {
    /// Ten percent more energy per kilometer of climb.
    pub fn elevation_factor(&self) -> f64 {
        1.0 + (self.elevation_gain_m / 1000.0) * 0.1
    }

    /// 1.0 when no weather was supplied.
    pub fn weather_factor(&self) -> f64 {
        self.weather.map_or(1.0, |weather| weather.energy_factor())
    }

    /// Reject non-finite figures, negative costs and negative wind speeds.
    pub fn validate(&self) -> Result<()> {
        if !self.elevation_gain_m.is_finite() {
            return Err(PlannerError::invalid("elevation gain must be finite"));
        }
        if !self.base_energy_cost.is_finite() || self.base_energy_cost < 0.0 {
            return Err(PlannerError::invalid(format!(
                "base energy cost must be non-negative, got {}",
                self.base_energy_cost
            )));
        }
        if let Some(weather) = self.weather {
            if !weather.temperature_c.is_finite() {
                return Err(PlannerError::invalid("temperature must be finite"));
            }
            if !weather.wind_speed_kmh.is_finite() || weather.wind_speed_kmh < 0.0 {
                return Err(PlannerError::invalid(format!(
                    "wind speed must be non-negative, got {}",
                    weather.wind_speed_kmh
                )));
            }
        }
        Ok(())
    }
}
