use crate::devices::types::{Device, DeviceContext, daytime_factor};

/// A solar PV array whose output follows predicted efficiency and the sun.
///
/// `SolarArray` scales its nameplate capacity by the predicted efficiency and
/// a half-sine daytime profile between 06:00 and 18:00.
#[derive(Debug, Clone)]
pub struct SolarArray {
    /// Nameplate capacity in kilowatts.
    pub capacity_kw: f32,
}

impl SolarArray {
    /// Creates a new array. Negative capacities are clamped to zero.
    pub fn new(capacity_kw: f32) -> Self {
        Self {
            capacity_kw: capacity_kw.max(0.0),
        }
    }
}

impl Device for SolarArray {
    /// `capacity × solar efficiency × daytime factor`; zero at night.
    fn power_kw(&self, context: &DeviceContext) -> f32 {
        self.capacity_kw * context.solar_efficiency * daytime_factor(context.hour)
    }

    fn device_type(&self) -> &'static str {
        "SolarPV"
    }
}
