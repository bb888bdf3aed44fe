use rand::Rng;

use super::sample::{Forecast, ForecastSample, WeatherCondition, WeatherSample};
use super::season::{Season, day_curve};
use crate::math::{chance, round_dp, uniform};

/// Maximum temperature jitter around the seasonal curve (°C).
const TEMP_JITTER_C: f32 = 1.5;
/// UV index ceiling.
const UV_MAX: f32 = 11.0;
/// Forecast horizons in hours.
const HORIZONS: [u32; 3] = [1, 6, 24];

/// Returns `true` for hours 06:00 through 19:00 inclusive.
pub fn is_daylight(hour: u32) -> bool {
    (6..=19).contains(&hour)
}

/// Synthesizes plausible weather for a hot semi-arid region.
///
/// Stateless: every draw comes from the caller's random source, so a seeded
/// `StdRng` reproduces the same sequence of samples.
///
/// # Examples
///
/// ```
/// use campus_energy_sim::weather::{Season, WeatherCondition, WeatherSynthesizer};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let sample = WeatherSynthesizer.synthesize(2, Season::Summer, &mut rng);
/// assert_eq!(sample.condition, WeatherCondition::ClearNight);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct WeatherSynthesizer;

impl WeatherSynthesizer {
    /// Produces a current sample plus 1h/6h/24h forecasts for `hour` (0-23).
    pub fn synthesize<R: Rng>(&self, hour: u32, season: Season, rng: &mut R) -> WeatherSample {
        let hour = hour % 24;

        let temperature =
            season.curve_temperature_c(hour) + uniform(rng, -TEMP_JITTER_C, TEMP_JITTER_C);
        let (cloud_cover, drawn) = draw_sky(season, rng);
        let condition = if is_daylight(hour) {
            drawn
        } else {
            WeatherCondition::ClearNight
        };

        let wind_speed = draw_wind(season, rng);
        let humidity = match season {
            Season::Monsoon => uniform(rng, 70.0, 95.0),
            Season::Summer => uniform(rng, 20.0, 50.0),
            _ => uniform(rng, 40.0, 75.0),
        };

        let uv_index = (day_curve(hour).max(0.0) * UV_MAX * condition.uv_factor()).min(UV_MAX);
        let visibility = match condition {
            WeatherCondition::Dusty => uniform(rng, 2.0, 5.0),
            WeatherCondition::Rainy => uniform(rng, 1.0, 3.0),
            _ => uniform(rng, 8.0, 15.0),
        };

        let [h1, h6, h24] = HORIZONS.map(|h| forecast_at((hour + h) % 24, season, rng));

        WeatherSample {
            condition,
            temperature: round_dp(temperature, 1),
            humidity: round_dp(humidity, 1),
            wind_speed: round_dp(wind_speed, 1),
            cloud_cover: round_dp(cloud_cover, 1),
            uv_index: round_dp(uv_index, 1),
            visibility: round_dp(visibility, 1),
            forecast: Forecast {
                next1h: h1,
                next6h: h6,
                next24h: h24,
            },
        }
    }
}

/// Draws cloud cover and the matching daytime condition for the season.
fn draw_sky<R: Rng>(season: Season, rng: &mut R) -> (f32, WeatherCondition) {
    match season {
        Season::Monsoon => {
            let cloud = uniform(rng, 60.0, 100.0);
            let condition = if chance(rng, 0.4) {
                WeatherCondition::Rainy
            } else if cloud > 80.0 {
                WeatherCondition::Cloudy
            } else {
                WeatherCondition::PartlyCloudy
            };
            (cloud, condition)
        }
        Season::Summer => {
            let cloud = uniform(rng, 0.0, 30.0);
            let condition = if chance(rng, 0.25) {
                WeatherCondition::Dusty
            } else if cloud < 15.0 {
                WeatherCondition::Sunny
            } else {
                WeatherCondition::PartlyCloudy
            };
            (cloud, condition)
        }
        Season::Winter | Season::PostMonsoon => {
            let cloud = uniform(rng, 0.0, 50.0);
            let condition = if cloud < 20.0 {
                WeatherCondition::Sunny
            } else if cloud < 40.0 {
                WeatherCondition::PartlyCloudy
            } else {
                WeatherCondition::Cloudy
            };
            (cloud, condition)
        }
    }
}

fn draw_wind<R: Rng>(season: Season, rng: &mut R) -> f32 {
    match season {
        Season::Summer => uniform(rng, 3.0, 11.0),
        _ => uniform(rng, 2.0, 7.0),
    }
}

fn draw_cloud<R: Rng>(season: Season, rng: &mut R) -> f32 {
    match season {
        Season::Monsoon => uniform(rng, 60.0, 100.0),
        Season::Summer => uniform(rng, 0.0, 30.0),
        _ => uniform(rng, 0.0, 50.0),
    }
}

/// Builds the reduced sample for the absolute forecast hour `hour`.
fn forecast_at<R: Rng>(hour: u32, season: Season, rng: &mut R) -> ForecastSample {
    let drawn = match season {
        Season::Monsoon if chance(rng, 0.4) => WeatherCondition::Rainy,
        Season::Monsoon => WeatherCondition::Cloudy,
        Season::Summer if chance(rng, 0.7) => WeatherCondition::Sunny,
        Season::Summer => WeatherCondition::Dusty,
        Season::Winter if chance(rng, 0.6) => WeatherCondition::Sunny,
        Season::PostMonsoon if chance(rng, 0.5) => WeatherCondition::Sunny,
        Season::Winter | Season::PostMonsoon => WeatherCondition::PartlyCloudy,
    };
    let condition = if is_daylight(hour) {
        drawn
    } else {
        WeatherCondition::ClearNight
    };

    ForecastSample {
        condition,
        temperature: round_dp(season.curve_temperature_c(hour), 1),
        wind_speed: round_dp(draw_wind(season, rng), 1),
        cloud_cover: round_dp(draw_cloud(season, rng), 1),
    }
}
