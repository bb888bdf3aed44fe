//! Weather synthesis for a hot semi-arid climate.

pub mod sample;
/// Calendar season buckets and their climate parameters.
pub mod season;
mod synth;

pub use sample::{Forecast, ForecastSample, WeatherCondition, WeatherSample};
pub use season::{Season, SeasonProfile};
pub use synth::{WeatherSynthesizer, is_daylight};
