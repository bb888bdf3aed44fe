//! Common types and traits for plant components.

use crate::predict::EnergyPrediction;

/// Contextual information passed to devices during power calculations.
/// # Fields
/// * `hour` - Hour of day (0-23) of the current tick
/// * `solar_efficiency` - Predicted solar efficiency (0-1)
/// * `wind_efficiency` - Predicted wind efficiency (0-1)
/// * `load_multiplier` - Predicted site load multiplier
#[derive(Debug, Clone, Copy)]
pub struct DeviceContext {
    pub hour: u32,
    pub solar_efficiency: f32,
    pub wind_efficiency: f32,
    pub load_multiplier: f32,
}

impl DeviceContext {
    /// Creates a context for `hour` carrying the prediction's efficiencies.
    pub fn new(hour: u32, prediction: &EnergyPrediction) -> Self {
        Self {
            hour: hour % 24,
            solar_efficiency: prediction.solar_efficiency,
            wind_efficiency: prediction.wind_efficiency,
            load_multiplier: prediction.load_multiplier,
        }
    }
}

/// Trait defining a device that produces or consumes electricity.
///
/// Every device reports a non-negative magnitude; the integrator knows which
/// devices generate and which consume.
pub trait Device {
    /// Returns the power magnitude in kilowatts for the given context.
    fn power_kw(&self, context: &DeviceContext) -> f32;

    /// Returns a human-readable type name for the device.
    fn device_type(&self) -> &'static str;
}

/// Solar daytime factor: `sin((hour - 6) / 12 * pi)` between 06:00 and 18:00, else 0.
pub fn daytime_factor(hour: u32) -> f32 {
    if !(6..=18).contains(&hour) {
        return 0.0;
    }
    crate::weather::season::day_curve(hour).max(0.0)
}
