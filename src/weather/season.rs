//! Calendar season buckets for a hot semi-arid climate.

use serde::Serialize;

/// One of four fixed calendar-month groupings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// December, January, February.
    Winter,
    /// March through June.
    Summer,
    /// July, August, September.
    Monsoon,
    /// October and November.
    PostMonsoon,
}

/// Climate parameters attached to a season.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonProfile {
    /// Multiplier applied to solar efficiency.
    pub solar_boost: f32,
    /// Multiplier applied to heating/cooling load increments.
    pub heat_load: f32,
    /// Mean daily temperature (°C).
    pub base_temp_c: f32,
    /// Amplitude of the daily temperature curve (°C).
    pub temp_range_c: f32,
}

impl Season {
    /// Maps a calendar month (1-12) to its season bucket.
    ///
    /// Months outside 1-12 wrap modulo 12, so 0 and 12 both mean December.
    pub fn from_month(month: u32) -> Self {
        match month % 12 {
            0 | 1 | 2 => Season::Winter,
            3..=6 => Season::Summer,
            7..=9 => Season::Monsoon,
            _ => Season::PostMonsoon,
        }
    }

    /// Returns the fixed climate profile for this season.
    pub fn profile(self) -> SeasonProfile {
        match self {
            Season::Winter => SeasonProfile {
                solar_boost: 0.85,
                heat_load: 0.8,
                base_temp_c: 18.0,
                temp_range_c: 8.0,
            },
            Season::Summer => SeasonProfile {
                solar_boost: 1.10,
                heat_load: 1.4,
                base_temp_c: 35.0,
                temp_range_c: 12.0,
            },
            Season::Monsoon => SeasonProfile {
                solar_boost: 0.75,
                heat_load: 1.1,
                base_temp_c: 28.0,
                temp_range_c: 6.0,
            },
            Season::PostMonsoon => SeasonProfile {
                solar_boost: 0.95,
                heat_load: 1.0,
                base_temp_c: 25.0,
                temp_range_c: 9.0,
            },
        }
    }

    /// Temperature on the seasonal daily curve at `hour`, without jitter.
    pub fn curve_temperature_c(self, hour: u32) -> f32 {
        let p = self.profile();
        p.base_temp_c + day_curve(hour) * p.temp_range_c
    }
}

/// `sin((hour - 6) / 12 * pi)`: zero at 06:00 and 18:00, peak at noon.
pub fn day_curve(hour: u32) -> f32 {
    ((hour as f32 - 6.0) / 12.0 * std::f32::consts::PI).sin()
}
