//! Efficiency prediction and battery advice derived from weather.

pub mod advisor;
pub mod efficiency;

use serde::{Deserialize, Serialize};

pub use advisor::{BatteryAction, DEFAULT_OPTIMAL_CHARGE, optimal_charge};

use crate::sensors::IoTSensorSample;
use crate::weather::{SeasonProfile, WeatherSample};

/// Per-tick energy outlook derived from one weather sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyPrediction {
    /// Solar efficiency, 0-1.
    pub solar_efficiency: f32,
    /// Wind efficiency, 0-1.
    pub wind_efficiency: f32,
    /// Site load multiplier, 0.3-2.5.
    pub load_multiplier: f32,
    /// Recommended battery state of charge (%), 5-100.
    pub battery_optimal_charge: f32,
    pub recommendation: BatteryAction,
}

impl EnergyPrediction {
    /// Neutral prediction paired with the fallback record.
    pub fn fallback() -> Self {
        Self {
            solar_efficiency: 0.5,
            wind_efficiency: 0.25,
            load_multiplier: 1.0,
            battery_optimal_charge: DEFAULT_OPTIMAL_CHARGE,
            recommendation: BatteryAction::Maintain,
        }
    }
}

/// Maps weather (and optional sensor readings) to an [`EnergyPrediction`].
///
/// # Examples
///
/// ```
/// use campus_energy_sim::predict::predict;
/// use campus_energy_sim::weather::{Season, WeatherSample};
///
/// let p = predict(&WeatherSample::fallback(), &Season::Winter.profile(), None);
/// assert!((0.0..=1.0).contains(&p.solar_efficiency));
/// ```
pub fn predict(
    weather: &WeatherSample,
    season: &SeasonProfile,
    sensors: Option<&IoTSensorSample>,
) -> EnergyPrediction {
    let solar_efficiency = efficiency::solar_efficiency(weather, season, sensors);
    let wind_efficiency = efficiency::wind_efficiency(weather.wind_speed, weather.temperature);
    let load_multiplier = efficiency::load_multiplier(weather, season);

    EnergyPrediction {
        solar_efficiency,
        wind_efficiency,
        load_multiplier,
        battery_optimal_charge: optimal_charge(&weather.forecast, season),
        recommendation: BatteryAction::select(solar_efficiency, wind_efficiency, load_multiplier),
    }
}
