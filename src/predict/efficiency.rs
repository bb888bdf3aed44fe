//! Weather-to-efficiency mapping for solar, wind, and site load.

use crate::sensors::IoTSensorSample;
use crate::weather::{SeasonProfile, WeatherSample};

/// Panels lose output above this cell-ambient temperature (°C).
const SOLAR_OPTIMAL_TEMP_C: f32 = 25.0;
/// Fractional output loss per °C above the optimum.
const SOLAR_TEMP_COEFF: f32 = 0.004;
/// Floor on thermal derating.
const SOLAR_MIN_DERATE: f32 = 0.7;

const WIND_CUT_IN_MS: f32 = 3.0;
const WIND_CUT_OUT_MS: f32 = 15.0;
const WIND_RATED_MS: f32 = 12.0;
/// Output below cut-in speed.
const WIND_SUB_CUT_IN_EFF: f32 = 0.1;
/// De-rated output above cut-out speed.
const WIND_DERATED_EFF: f32 = 0.3;

pub const LOAD_MULTIPLIER_MIN: f32 = 0.3;
pub const LOAD_MULTIPLIER_MAX: f32 = 2.5;

/// `max(0.7, 1 - max(0, T - 25) * 0.004)`.
pub fn temperature_derating(temperature_c: f32) -> f32 {
    let excess = (temperature_c - SOLAR_OPTIMAL_TEMP_C).max(0.0);
    (1.0 - excess * SOLAR_TEMP_COEFF).max(SOLAR_MIN_DERATE)
}

/// `(100 - cloud) / 100`.
pub fn cloud_factor(cloud_cover_pct: f32) -> f32 {
    (100.0 - cloud_cover_pct) / 100.0
}

/// Solar efficiency from a full weather sample, refined by sensors when present.
pub fn solar_efficiency(
    weather: &WeatherSample,
    season: &SeasonProfile,
    sensors: Option<&IoTSensorSample>,
) -> f32 {
    let mut eff = cloud_factor(weather.cloud_cover)
        * temperature_derating(weather.temperature)
        * (weather.uv_index / 8.0).min(1.0)
        * (weather.visibility / 10.0).min(1.0)
        * season.solar_boost;

    if let Some(s) = sensors {
        if s.panel_temperature > 60.0 {
            eff *= 0.9;
        }
        if s.ambient_light < 20_000.0 {
            eff *= 0.8;
        }
    }

    eff.clamp(0.0, 1.0)
}

/// Wind efficiency from a simplified turbine power curve.
///
/// Below cut-in and above cut-out the output is a fixed fraction regardless of
/// temperature; in between `(v/12)^2` is scaled by an air-density proxy.
pub fn wind_efficiency(wind_speed_ms: f32, temperature_c: f32) -> f32 {
    if wind_speed_ms < WIND_CUT_IN_MS {
        return WIND_SUB_CUT_IN_EFF;
    }
    if wind_speed_ms > WIND_CUT_OUT_MS {
        return WIND_DERATED_EFF;
    }
    let curve = (wind_speed_ms / WIND_RATED_MS).powi(2).min(1.0);
    let air_density = 1.0 + (25.0 - temperature_c) * 0.005;
    (curve * air_density).clamp(0.0, 1.0)
}

/// Load multiplier from temperature alone (cooling above 30 °C, heating below 15 °C).
pub fn thermal_load_multiplier(temperature_c: f32, season: &SeasonProfile) -> f32 {
    let m = if temperature_c > 30.0 {
        1.0 + ((temperature_c - 30.0) / 10.0).powf(1.5) * season.heat_load
    } else if temperature_c < 15.0 {
        1.0 + (15.0 - temperature_c) * 0.1 * season.heat_load
    } else {
        1.0
    };
    m.clamp(LOAD_MULTIPLIER_MIN, LOAD_MULTIPLIER_MAX)
}

/// Load multiplier including the humidity penalty above 70 %.
pub fn load_multiplier(weather: &WeatherSample, season: &SeasonProfile) -> f32 {
    let mut m = thermal_load_multiplier(weather.temperature, season);
    if weather.humidity > 70.0 {
        m *= 1.0 + (weather.humidity - 70.0) * 0.005;
    }
    m.clamp(LOAD_MULTIPLIER_MIN, LOAD_MULTIPLIER_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::Season;

    fn summer() -> SeasonProfile {
        Season::Summer.profile()
    }

    fn sample() -> WeatherSample {
        WeatherSample {
            temperature: 25.0,
            humidity: 40.0,
            wind_speed: 6.0,
            cloud_cover: 0.0,
            uv_index: 10.0,
            visibility: 12.0,
            ..WeatherSample::fallback()
        }
    }

    #[test]
    fn derating_thresholds() {
        assert_eq!(temperature_derating(20.0), 1.0);
        assert_eq!(temperature_derating(25.0), 1.0);
        assert!((temperature_derating(35.0) - 0.96).abs() < 1e-6);
        assert_eq!(temperature_derating(120.0), 0.7);
    }

    #[test]
    fn overcast_kills_solar() {
        let w = WeatherSample {
            cloud_cover: 100.0,
            ..sample()
        };
        assert_eq!(solar_efficiency(&w, &summer(), None), 0.0);
    }

    #[test]
    fn clear_summer_solar_saturates_at_one() {
        assert_eq!(solar_efficiency(&sample(), &summer(), None), 1.0);
    }

    #[test]
    fn uv_and_visibility_reduce_solar() {
        let w = WeatherSample {
            uv_index: 4.0,
            visibility: 5.0,
            ..sample()
        };
        let winter = Season::Winter.profile();
        let expected = 0.5 * 0.5 * winter.solar_boost;
        assert!((solar_efficiency(&w, &winter, None) - expected).abs() < 1e-6);
    }

    #[test]
    fn sensor_adjustments_compound() {
        let winter = Season::Winter.profile();
        let base = solar_efficiency(&sample(), &winter, None);
        let sensors = IoTSensorSample {
            panel_temperature: 65.0,
            panel_tilt: 25.0,
            wind_turbine_rpm: 100.0,
            ambient_light: 10_000.0,
            battery_voltage: 50.0,
            inverter_efficiency: 96.0,
            load_power_factor: 0.9,
        };
        let adjusted = solar_efficiency(&sample(), &winter, Some(&sensors));
        assert!((adjusted - base * 0.9 * 0.8).abs() < 1e-6);
    }

    #[test]
    fn wind_sub_cut_in_is_fixed() {
        for t in [-10.0, 0.0, 25.0, 45.0] {
            assert_eq!(wind_efficiency(2.0, t), 0.1);
        }
    }

    #[test]
    fn wind_above_cut_out_is_derated() {
        assert_eq!(wind_efficiency(20.0, 10.0), 0.3);
    }

    #[test]
    fn wind_power_curve_with_air_density() {
        // (6/12)^2 = 0.25 at reference temperature
        assert!((wind_efficiency(6.0, 25.0) - 0.25).abs() < 1e-6);
        // colder air is denser
        assert!(wind_efficiency(6.0, 5.0) > wind_efficiency(6.0, 35.0));
        assert_eq!(wind_efficiency(12.0, 0.0), 1.0);
    }

    #[test]
    fn load_rises_with_heat_and_cold() {
        let p = Season::PostMonsoon.profile();
        assert_eq!(thermal_load_multiplier(22.0, &p), 1.0);
        // (10/10)^1.5 * 1.0
        assert!((thermal_load_multiplier(40.0, &p) - 2.0).abs() < 1e-5);
        // (15-5) * 0.1 * 1.0
        assert!((thermal_load_multiplier(5.0, &p) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn humidity_penalty() {
        let p = Season::PostMonsoon.profile();
        let w = WeatherSample {
            temperature: 22.0,
            humidity: 90.0,
            ..sample()
        };
        assert!((load_multiplier(&w, &p) - 1.1).abs() < 1e-5);
    }

    #[test]
    fn load_is_capped() {
        let w = WeatherSample {
            temperature: 60.0,
            humidity: 100.0,
            ..sample()
        };
        assert_eq!(load_multiplier(&w, &summer()), LOAD_MULTIPLIER_MAX);
    }
}
