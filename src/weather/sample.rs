//! Weather sample types produced by the synthesizer or an external feed.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::synth::is_daylight;
use crate::error::EngineError;
use crate::math::round_dp;

/// Sky condition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Dusty,
    Rainy,
    ClearNight,
}

impl WeatherCondition {
    /// Wire name of the condition, e.g. `"partly_cloudy"`.
    pub fn as_str(self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::PartlyCloudy => "partly_cloudy",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Dusty => "dusty",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::ClearNight => "clear_night",
        }
    }

    /// Fraction of the clear-sky UV index that reaches the ground.
    pub fn uv_factor(self) -> f32 {
        match self {
            WeatherCondition::Sunny => 1.0,
            WeatherCondition::PartlyCloudy => 0.7,
            WeatherCondition::Cloudy => 0.4,
            WeatherCondition::Dusty => 0.6,
            WeatherCondition::Rainy => 0.3,
            WeatherCondition::ClearNight => 0.0,
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduced sample used for forecast horizons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSample {
    pub condition: WeatherCondition,
    /// Air temperature (°C).
    pub temperature: f32,
    /// Wind speed (m/s).
    pub wind_speed: f32,
    /// Cloud cover (%).
    pub cloud_cover: f32,
}

impl ForecastSample {
    fn settled_at(self, hour: u32) -> Self {
        Self {
            condition: night_aware(self.condition, hour),
            temperature: round_dp(self.temperature, 1),
            wind_speed: round_dp(self.wind_speed, 1),
            cloud_cover: round_dp(self.cloud_cover, 1),
        }
    }
}

/// Forecasts at the three fixed horizons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub next1h: ForecastSample,
    pub next6h: ForecastSample,
    pub next24h: ForecastSample,
}

impl Forecast {
    /// The three horizons in ascending order.
    pub fn horizons(&self) -> [&ForecastSample; 3] {
        [&self.next1h, &self.next6h, &self.next24h]
    }
}

/// Full weather observation for one tick.
///
/// `forecast` is not optional: every sample carries all three horizons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    pub condition: WeatherCondition,
    /// Air temperature (°C).
    pub temperature: f32,
    /// Relative humidity (%).
    pub humidity: f32,
    /// Wind speed (m/s).
    pub wind_speed: f32,
    /// Cloud cover (%), 0-100.
    pub cloud_cover: f32,
    /// UV index, 0-11.
    pub uv_index: f32,
    /// Horizontal visibility (km).
    pub visibility: f32,
    pub forecast: Forecast,
}

impl WeatherSample {
    /// Checks that every field is finite and within its physical range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidWeather`] naming the first bad field.
    pub fn validate(&self) -> Result<(), EngineError> {
        check("temperature", self.temperature, -60.0, 70.0)?;
        check("humidity", self.humidity, 0.0, 100.0)?;
        check("windSpeed", self.wind_speed, 0.0, 80.0)?;
        check("cloudCover", self.cloud_cover, 0.0, 100.0)?;
        check("uvIndex", self.uv_index, 0.0, 11.0)?;
        check("visibility", self.visibility, 0.0, 100.0)?;
        for (name, f) in ["next1h", "next6h", "next24h"]
            .into_iter()
            .zip(self.forecast.horizons())
        {
            check_forecast(name, f)?;
        }
        Ok(())
    }

    /// Applies the sample invariants for a tick at `hour`.
    ///
    /// Conditions outside daylight become [`WeatherCondition::ClearNight`],
    /// each forecast horizon judged at its own shifted hour, and every
    /// numeric field is rounded to one decimal.
    pub fn settled_at(self, hour: u32) -> Self {
        let [h1, h6, h24] = [1, 6, 24].map(|ahead| (hour + ahead) % 24);
        Self {
            condition: night_aware(self.condition, hour),
            temperature: round_dp(self.temperature, 1),
            humidity: round_dp(self.humidity, 1),
            wind_speed: round_dp(self.wind_speed, 1),
            cloud_cover: round_dp(self.cloud_cover, 1),
            uv_index: round_dp(self.uv_index, 1),
            visibility: round_dp(self.visibility, 1),
            forecast: Forecast {
                next1h: self.forecast.next1h.settled_at(h1),
                next6h: self.forecast.next6h.settled_at(h6),
                next24h: self.forecast.next24h.settled_at(h24),
            },
        }
    }

    /// Safe sample used when nothing better is available: a sunny 30 °C day.
    pub fn fallback() -> Self {
        let reduced = ForecastSample {
            condition: WeatherCondition::Sunny,
            temperature: 30.0,
            wind_speed: 5.0,
            cloud_cover: 20.0,
        };
        Self {
            condition: WeatherCondition::Sunny,
            temperature: 30.0,
            humidity: 40.0,
            wind_speed: 5.0,
            cloud_cover: 20.0,
            uv_index: 6.0,
            visibility: 10.0,
            forecast: Forecast {
                next1h: reduced,
                next6h: reduced,
                next24h: reduced,
            },
        }
    }
}

fn night_aware(condition: WeatherCondition, hour: u32) -> WeatherCondition {
    if is_daylight(hour) {
        condition
    } else {
        WeatherCondition::ClearNight
    }
}

fn check(field: &str, value: f32, min: f32, max: f32) -> Result<(), EngineError> {
    if !value.is_finite() || value < min || value > max {
        return Err(EngineError::InvalidWeather(format!(
            "{field}={value} outside [{min}, {max}]"
        )));
    }
    Ok(())
}

fn check_forecast(horizon: &str, f: &ForecastSample) -> Result<(), EngineError> {
    check(&format!("{horizon}.temperature"), f.temperature, -60.0, 70.0)?;
    check(&format!("{horizon}.windSpeed"), f.wind_speed, 0.0, 80.0)?;
    check(&format!("{horizon}.cloudCover"), f.cloud_cover, 0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_valid() {
        assert!(WeatherSample::fallback().validate().is_ok());
    }

    #[test]
    fn validate_rejects_nan_cloud_cover() {
        let mut s = WeatherSample::fallback();
        s.cloud_cover = f32::NAN;
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("cloudCover"));
    }

    #[test]
    fn validate_rejects_bad_forecast_horizon() {
        let mut s = WeatherSample::fallback();
        s.forecast.next24h.cloud_cover = 140.0;
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("next24h.cloudCover"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(WeatherSample::fallback()).unwrap();
        assert_eq!(json["condition"], "sunny");
        assert!(json.get("windSpeed").is_some());
        assert!(json["forecast"]["next6h"].get("cloudCover").is_some());
    }

    #[test]
    fn missing_forecast_does_not_deserialize() {
        let json = r#"{"condition":"sunny","temperature":30.0,"humidity":40.0,
            "windSpeed":5.0,"cloudCover":20.0,"uvIndex":6.0,"visibility":10.0}"#;
        assert!(serde_json::from_str::<WeatherSample>(json).is_err());
    }

    #[test]
    fn settling_at_night_clears_sky_and_rounds() {
        let mut s = WeatherSample::fallback();
        s.temperature = 30.123;
        s.forecast.next6h.wind_speed = 4.46;
        let settled = s.settled_at(0);
        assert_eq!(settled.condition, WeatherCondition::ClearNight);
        assert_eq!(settled.temperature, 30.1);
        assert_eq!(settled.forecast.next6h.wind_speed, 4.5);
        // 01:00 and 00:00 are night, 06:00 is daylight
        assert_eq!(settled.forecast.next1h.condition, WeatherCondition::ClearNight);
        assert_eq!(settled.forecast.next6h.condition, WeatherCondition::Sunny);
        assert_eq!(settled.forecast.next24h.condition, WeatherCondition::ClearNight);
    }

    #[test]
    fn settling_in_daylight_keeps_condition() {
        let s = WeatherSample::fallback();
        assert_eq!(s.settled_at(12), s);
    }

    #[test]
    fn condition_names() {
        assert_eq!(WeatherCondition::PartlyCloudy.to_string(), "partly_cloudy");
        assert_eq!(WeatherCondition::ClearNight.as_str(), "clear_night");
    }
}
