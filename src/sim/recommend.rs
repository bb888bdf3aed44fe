//! Human-readable operator advisories derived from a tick's output.

use serde::Serialize;

use super::types::{EnergyRecord, ForecastLabel};
use crate::predict::{BatteryAction, EnergyPrediction};
use crate::weather::{WeatherCondition, WeatherSample};

/// Advisory urgency. Orders high before low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One advisory shown to operators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub message: String,
    pub priority: Priority,
    /// Icon identifier for the UI.
    pub icon: &'static str,
    /// Suggested operator action, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
    /// Whether the advisory is driven by weather conditions.
    pub weather_based: bool,
}

impl Recommendation {
    fn new(priority: Priority, icon: &'static str, message: String) -> Self {
        Self {
            message,
            priority,
            icon,
            action: None,
            weather_based: false,
        }
    }

    fn action(mut self, action: &'static str) -> Self {
        self.action = Some(action);
        self
    }

    fn weather(mut self) -> Self {
        self.weather_based = true;
        self
    }
}

/// Builds the ordered advisory list for one tick.
///
/// Entries are sorted high → medium → low, keeping rule order within a
/// priority. At least one entry is always returned.
pub fn recommendations(
    record: &EnergyRecord,
    weather: &WeatherSample,
    prediction: &EnergyPrediction,
) -> Vec<Recommendation> {
    let battery = record.battery_soc_percent;
    let optimal = prediction.battery_optimal_charge;
    let mut out = Vec::new();

    if weather.cloud_cover > 70.0 && battery < 60.0 {
        out.push(
            Recommendation::new(
                Priority::High,
                "battery-charging",
                format!(
                    "Heavy cloud cover ({:.0}%) with battery at {battery:.0}%: charge batteries now",
                    weather.cloud_cover
                ),
            )
            .action("charge_now")
            .weather(),
        );
    }

    if prediction.recommendation == BatteryAction::PrepareForPeak {
        out.push(
            Recommendation::new(
                Priority::High,
                "trending-up",
                format!("Peak demand expected: pre-charge batteries to {optimal:.0}%"),
            )
            .action("prepare_for_peak"),
        );
    }

    if record.forecast == ForecastLabel::Deficit && battery < 30.0 {
        out.push(
            Recommendation::new(
                Priority::High,
                "alert-triangle",
                format!(
                    "Energy deficit of {:.1} kW with battery at {battery:.0}%: shed non-essential loads",
                    record.grid_import_kw
                ),
            )
            .action("reduce_load"),
        );
    }

    if prediction.wind_efficiency > 0.8 && battery < optimal {
        out.push(
            Recommendation::new(
                Priority::Medium,
                "wind",
                format!(
                    "Strong winds ({:.1} m/s): use wind generation to charge towards {optimal:.0}%",
                    weather.wind_speed
                ),
            )
            .action("charge_now")
            .weather(),
        );
    }

    if weather.condition == WeatherCondition::Dusty {
        out.push(
            Recommendation::new(
                Priority::Medium,
                "cloud-fog",
                "Dust is reducing solar output: schedule panel cleaning".to_string(),
            )
            .action("clean_panels")
            .weather(),
        );
    }

    if weather.temperature > 38.0 {
        out.push(
            Recommendation::new(
                Priority::Medium,
                "thermometer",
                format!(
                    "High temperature ({:.1}°C): pre-cool buildings before the afternoon peak",
                    weather.temperature
                ),
            )
            .action("precool")
            .weather(),
        );
    }

    if weather.condition == WeatherCondition::Rainy {
        out.push(
            Recommendation::new(
                Priority::Low,
                "cloud-rain",
                "Rain expected to limit solar generation".to_string(),
            )
            .weather(),
        );
    }

    if prediction.solar_efficiency > 0.8 {
        out.push(
            Recommendation::new(
                Priority::Low,
                "sun",
                format!(
                    "Excellent solar conditions ({:.0}% efficiency): run deferrable loads now",
                    prediction.solar_efficiency * 100.0
                ),
            )
            .action("shift_load")
            .weather(),
        );
    }

    if record.forecast == ForecastLabel::Surplus && battery >= 95.0 {
        out.push(Recommendation::new(
            Priority::Low,
            "zap",
            format!(
                "Battery full: exporting {:.1} kW surplus to the grid",
                record.grid_export_kw
            ),
        ));
    }

    if out.is_empty() {
        out.push(Recommendation::new(
            Priority::Low,
            "check-circle",
            "All systems operating normally".to_string(),
        ));
    }

    // stable: rule order is kept within a priority
    out.sort_by_key(|r| r.priority);
    out
}
