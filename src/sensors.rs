//! Simulated on-site IoT sensor readings for offline mode.

use rand::Rng;
use serde::Serialize;

use crate::math::{round_dp, uniform};
use crate::weather::season::day_curve;
use crate::weather::{WeatherCondition, WeatherSample, is_daylight};

/// Fixed panel mounting angle (degrees).
pub const PANEL_TILT_DEG: f32 = 25.0;
/// Ambient illuminance under a clear noon sky (lux).
const CLEAR_NOON_LUX: f32 = 110_000.0;
/// Panel heating above ambient under full clear-sky irradiance (°C).
const MAX_IRRADIANCE_HEATING_C: f32 = 25.0;
/// Turbine cut-in wind speed (m/s).
const CUT_IN_MS: f32 = 3.0;
const MAX_ROTOR_RPM: f32 = 300.0;

/// One reading from the site's sensor array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IoTSensorSample {
    /// Panel back-sheet temperature (°C).
    pub panel_temperature: f32,
    /// Panel tilt (degrees), fixed.
    pub panel_tilt: f32,
    #[serde(rename = "windTurbineRPM")]
    pub wind_turbine_rpm: f32,
    /// Ambient light (lux).
    pub ambient_light: f32,
    /// Battery bus voltage (V).
    pub battery_voltage: f32,
    /// Inverter efficiency (%).
    pub inverter_efficiency: f32,
    pub load_power_factor: f32,
}

/// Derives a sensor reading consistent with `weather` at `hour`.
pub fn synthesize_sensors<R: Rng>(
    weather: &WeatherSample,
    hour: u32,
    rng: &mut R,
) -> IoTSensorSample {
    let sun = if is_daylight(hour) {
        day_curve(hour).max(0.0)
    } else {
        0.0
    };
    let clear_fraction = (100.0 - weather.cloud_cover) / 100.0;

    let panel_temperature = weather.temperature
        + MAX_IRRADIANCE_HEATING_C * sun * clear_fraction
        + uniform(rng, -2.0, 2.0);

    let wind_turbine_rpm = if weather.wind_speed < CUT_IN_MS {
        0.0
    } else {
        (weather.wind_speed * 18.0).min(MAX_ROTOR_RPM)
    };

    let mut ambient_light = CLEAR_NOON_LUX * sun * (1.0 - 0.75 * weather.cloud_cover / 100.0);
    if weather.condition == WeatherCondition::Dusty {
        ambient_light *= 0.6;
    }

    let battery_voltage = uniform(rng, 48.0, 54.0);
    let heat_loss = (weather.temperature - 35.0).max(0.0) * 0.1;
    let inverter_efficiency = (96.0 - heat_loss + uniform(rng, -0.5, 0.5)).clamp(85.0, 99.0);
    let load_power_factor = uniform(rng, 0.85, 0.98);

    IoTSensorSample {
        panel_temperature: round_dp(panel_temperature, 1),
        panel_tilt: PANEL_TILT_DEG,
        wind_turbine_rpm: round_dp(wind_turbine_rpm, 1),
        ambient_light: round_dp(ambient_light.max(0.0), 1),
        battery_voltage: round_dp(battery_voltage, 1),
        inverter_efficiency: round_dp(inverter_efficiency, 1),
        load_power_factor: round_dp(load_power_factor, 2),
    }
}
