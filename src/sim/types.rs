//! Core simulation types: operating mode, energy records, and tick output.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::predict::EnergyPrediction;
use crate::sensors::IoTSensorSample;
use crate::weather::WeatherSample;

/// Where the predictor's inputs come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Weather only (optionally fed by an external weather service).
    #[default]
    Online,
    /// Weather refined by synthesized on-site sensor readings.
    Offline,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Online => "online",
            Mode::Offline => "offline",
        }
    }
}

impl FromStr for Mode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Mode::Online),
            "offline" => Ok(Mode::Offline),
            other => Err(EngineError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short-term balance label derived from the tick's energy balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastLabel {
    Surplus,
    Deficit,
    Balanced,
}

impl ForecastLabel {
    /// `Surplus` above +20 kW, `Deficit` below -20 kW, otherwise `Balanced`.
    pub fn from_balance(balance_kw: f32) -> Self {
        if balance_kw > 20.0 {
            ForecastLabel::Surplus
        } else if balance_kw < -20.0 {
            ForecastLabel::Deficit
        } else {
            ForecastLabel::Balanced
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ForecastLabel::Surplus => "Surplus",
            ForecastLabel::Deficit => "Deficit",
            ForecastLabel::Balanced => "Balanced",
        }
    }
}

/// Complete record of one simulation tick. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    pub timestamp: NaiveDateTime,
    /// Solar generation (kW).
    #[serde(rename = "solar_gen_kW")]
    pub solar_gen_kw: f32,
    /// Wind generation (kW).
    #[serde(rename = "wind_gen_kW")]
    pub wind_gen_kw: f32,
    /// Site demand (kW).
    #[serde(rename = "load_demand_kW")]
    pub load_demand_kw: f32,
    /// Battery state of charge after this tick (%).
    pub battery_soc_percent: f32,
    /// Power drawn from the grid (kW, >= 0).
    #[serde(rename = "grid_import_kW")]
    pub grid_import_kw: f32,
    /// Power exported to the grid (kW, >= 0).
    #[serde(rename = "grid_export_kW")]
    pub grid_export_kw: f32,
    /// Weather condition name, e.g. `"sunny"`.
    pub weather: String,
    pub forecast: ForecastLabel,
    /// Air temperature (°C).
    pub temperature: f32,
    /// CO2 avoided by renewable generation this tick (kg).
    pub carbon_saved_kg: f32,
}

impl EnergyRecord {
    /// Total renewable generation (kW).
    pub fn generation_kw(&self) -> f32 {
        self.solar_gen_kw + self.wind_gen_kw
    }

    /// Signed balance, generation minus demand (kW).
    pub fn balance_kw(&self) -> f32 {
        self.generation_kw() - self.load_demand_kw
    }
}

impl fmt::Display for EnergyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | solar={:>7.2} kW  wind={:>6.2} kW  load={:>7.2} kW | \
             import={:>6.2}  export={:>6.2} | SoC={:>5.1}% | {:<13} {:>5.1}°C | {:<8} CO2={:.2} kg",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.solar_gen_kw,
            self.wind_gen_kw,
            self.load_demand_kw,
            self.grid_import_kw,
            self.grid_export_kw,
            self.battery_soc_percent,
            self.weather,
            self.temperature,
            self.forecast.as_str(),
            self.carbon_saved_kg,
        )
    }
}

/// Everything one tick produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickOutput {
    pub energy_record: EnergyRecord,
    pub weather_sample: WeatherSample,
    pub prediction: EnergyPrediction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_sample: Option<IoTSensorSample>,
    pub mode: Mode,
    /// `true` when the tick failed and fixed fallback values were returned.
    pub fallback: bool,
}
