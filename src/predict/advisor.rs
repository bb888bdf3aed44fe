//! Battery target and action selection from current and forecast conditions.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::efficiency::{cloud_factor, temperature_derating, thermal_load_multiplier, wind_efficiency};
use crate::error::{EngineError, finite};
use crate::weather::{Forecast, SeasonProfile};

/// SOC target used when the forecast evaluation fails.
pub const DEFAULT_OPTIMAL_CHARGE: f32 = 60.0;

/// Recommended battery action for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryAction {
    ChargeNow,
    DischargeNow,
    Maintain,
    PrepareForPeak,
}

impl BatteryAction {
    /// Picks the action from current efficiencies and load multiplier.
    ///
    /// Rules are checked in priority order; the first match wins.
    pub fn select(solar_eff: f32, wind_eff: f32, load_multiplier: f32) -> Self {
        let renewable_share = (solar_eff + wind_eff) / 2.0;
        if renewable_share > 0.7 && load_multiplier < 1.2 {
            BatteryAction::ChargeNow
        } else if renewable_share < 0.3 || load_multiplier > 1.5 {
            BatteryAction::PrepareForPeak
        } else if renewable_share < load_multiplier * 0.6 {
            BatteryAction::DischargeNow
        } else {
            BatteryAction::Maintain
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BatteryAction::ChargeNow => "charge_now",
            BatteryAction::DischargeNow => "discharge_now",
            BatteryAction::Maintain => "maintain",
            BatteryAction::PrepareForPeak => "prepare_for_peak",
        }
    }
}

/// Averages generation and load expectations over the forecast horizons.
///
/// Horizons are evaluated with the reduced model: cloud, temperature and
/// season only. UV, visibility, humidity and sensor refinements are not part
/// of the forecast samples.
///
/// # Errors
///
/// Returns [`EngineError::NonFiniteValue`] if any horizon yields NaN or infinity.
pub fn forecast_outlook(
    forecast: &Forecast,
    season: &SeasonProfile,
) -> Result<(f32, f32), EngineError> {
    let mut gen_sum = 0.0_f32;
    let mut load_sum = 0.0_f32;
    let horizons = forecast.horizons();

    for f in horizons {
        let solar = (cloud_factor(f.cloud_cover)
            * temperature_derating(f.temperature)
            * season.solar_boost)
            .clamp(0.0, 1.0);
        let wind = wind_efficiency(f.wind_speed, f.temperature);
        gen_sum += finite("forecast generation", (solar + wind) / 2.0)?;
        load_sum += finite(
            "forecast load",
            thermal_load_multiplier(f.temperature, season),
        )?;
    }

    let n = horizons.len() as f32;
    Ok((gen_sum / n, load_sum / n))
}

/// Optimal battery state of charge (%) given the forecast outlook.
///
/// # Errors
///
/// Propagates non-finite forecast values from [`forecast_outlook`].
pub fn try_optimal_charge(forecast: &Forecast, season: &SeasonProfile) -> Result<f32, EngineError> {
    let (avg_gen, avg_load) = forecast_outlook(forecast, season)?;

    let target = if avg_gen < 0.4 {
        (70.0 + (1.0 - avg_gen) * 25.0).min(95.0)
    } else if avg_load > 1.3 {
        (60.0 + (avg_load - 1.0) * 30.0).min(90.0)
    } else {
        (60.0 + (avg_gen - avg_load) * 20.0).clamp(40.0, 80.0)
    };

    Ok(finite("optimal charge", target)?.clamp(5.0, 100.0))
}

/// Like [`try_optimal_charge`] but falls back to [`DEFAULT_OPTIMAL_CHARGE`].
pub fn optimal_charge(forecast: &Forecast, season: &SeasonProfile) -> f32 {
    try_optimal_charge(forecast, season).unwrap_or_else(|e| {
        warn!(error = %e, "optimal charge evaluation failed, using default");
        DEFAULT_OPTIMAL_CHARGE
    })
}
