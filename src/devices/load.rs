use crate::devices::types::{Device, DeviceContext};

/// Campus electricity demand with a fixed hourly occupancy pattern.
///
/// `CampusLoad` scales a base demand by the weather-driven load multiplier
/// and a step profile that peaks in the afternoon teaching block.
///
/// # Examples
///
/// ```
/// use campus_energy_sim::devices::load::{CampusLoad, hourly_load_pattern};
///
/// let load = CampusLoad::new(200.0);
/// assert_eq!(hourly_load_pattern(14), 1.2);
/// assert_eq!(load.base_kw, 200.0);
/// ```
#[derive(Debug, Clone)]
pub struct CampusLoad {
    /// Base demand in kilowatts at a pattern factor of 1.0.
    pub base_kw: f32,
}

impl CampusLoad {
    pub fn new(base_kw: f32) -> Self {
        Self {
            base_kw: base_kw.max(0.0),
        }
    }
}

/// Occupancy factor for the hour of day.
///
/// | hours  | factor |
/// |--------|--------|
/// | 0-4    | 0.4    |
/// | 5-7    | 0.6    |
/// | 8-11   | 0.8    |
/// | 12-15  | 1.2    |
/// | 16-19  | 1.0    |
/// | 20-22  | 0.7    |
/// | 23     | 0.5    |
pub fn hourly_load_pattern(hour: u32) -> f32 {
    match hour {
        0..5 => 0.4,
        5..8 => 0.6,
        8..12 => 0.8,
        12..16 => 1.2,
        16..20 => 1.0,
        20..23 => 0.7,
        _ => 0.5,
    }
}

impl Device for CampusLoad {
    /// `base × load multiplier × hourly pattern`.
    fn power_kw(&self, context: &DeviceContext) -> f32 {
        self.base_kw * context.load_multiplier * hourly_load_pattern(context.hour)
    }

    fn device_type(&self) -> &'static str {
        "CampusLoad"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_steps() {
        let expected = [
            (0, 0.4),
            (4, 0.4),
            (5, 0.6),
            (7, 0.6),
            (8, 0.8),
            (11, 0.8),
            (12, 1.2),
            (15, 1.2),
            (16, 1.0),
            (19, 1.0),
            (20, 0.7),
            (22, 0.7),
            (23, 0.5),
        ];
        for (hour, factor) in expected {
            assert_eq!(hourly_load_pattern(hour), factor, "hour {hour}");
        }
    }

    #[test]
    fn afternoon_peak_demand() {
        let load = CampusLoad::new(200.0);
        let ctx = DeviceContext {
            hour: 13,
            solar_efficiency: 0.0,
            wind_efficiency: 0.0,
            load_multiplier: 1.5,
        };
        assert!((load.power_kw(&ctx) - 360.0).abs() < 1e-3);
    }
}
