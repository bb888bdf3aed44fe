use crate::devices::types::{Device, DeviceContext};

/// A wind turbine bank. Output is not gated by daylight.
#[derive(Debug, Clone)]
pub struct WindTurbine {
    /// Nameplate capacity in kilowatts.
    pub capacity_kw: f32,
}

impl WindTurbine {
    pub fn new(capacity_kw: f32) -> Self {
        Self {
            capacity_kw: capacity_kw.max(0.0),
        }
    }
}

impl Device for WindTurbine {
    fn power_kw(&self, context: &DeviceContext) -> f32 {
        self.capacity_kw * context.wind_efficiency
    }

    fn device_type(&self) -> &'static str {
        "WindTurbine"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_around_the_clock() {
        let wt = WindTurbine::new(100.0);
        for hour in [0, 12, 23] {
            let ctx = DeviceContext {
                hour,
                solar_efficiency: 0.0,
                wind_efficiency: 0.4,
                load_multiplier: 1.0,
            };
            assert!((wt.power_kw(&ctx) - 40.0).abs() < 1e-4);
        }
    }
}
