use serde::Serialize;

use crate::predict::BatteryAction;

/// Lowest allowed state of charge (%).
pub const SOC_MIN: f32 = 5.0;
/// Highest allowed state of charge (%).
pub const SOC_MAX: f32 = 100.0;
/// Level at process start.
pub const INITIAL_LEVEL: f32 = 60.0;

/// The site battery bank: the engine's only persistent state.
///
/// `BatteryBank` holds a state of charge in percent and evolves it once per
/// tick through [`BatteryBank::advance`], which is the sole mutation path.
/// The level is always within `[SOC_MIN, SOC_MAX]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryBank {
    level: f32,
}

impl Default for BatteryBank {
    fn default() -> Self {
        Self::new(INITIAL_LEVEL)
    }
}

impl BatteryBank {
    /// Creates a bank at `level` percent, clamped into the allowed range.
    ///
    /// A non-finite level falls back to [`INITIAL_LEVEL`].
    pub fn new(level: f32) -> Self {
        let level = if level.is_finite() {
            level.clamp(SOC_MIN, SOC_MAX)
        } else {
            INITIAL_LEVEL
        };
        Self { level }
    }

    /// Current state of charge (%).
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Applies one tick of the charge policy and returns the new level.
    ///
    /// # Arguments
    ///
    /// * `balance_kw` - Generation minus demand this tick (kW)
    /// * `optimal_pct` - Recommended state of charge (%)
    /// * `action` - Recommended action for this tick
    pub fn advance(&mut self, balance_kw: f32, optimal_pct: f32, action: BatteryAction) -> f32 {
        if !balance_kw.is_finite() {
            return self.level;
        }

        let level = self.level;
        let delta = match action {
            BatteryAction::ChargeNow if balance_kw > 0.0 && level < optimal_pct => {
                (balance_kw * 0.1).min(2.0)
            }
            BatteryAction::DischargeNow if balance_kw < 0.0 && level > 20.0 => {
                -(balance_kw.abs() * 0.05).min(1.5)
            }
            BatteryAction::PrepareForPeak if balance_kw > 10.0 && level < 90.0 => {
                (balance_kw * 0.08).min(3.0)
            }
            BatteryAction::Maintain if balance_kw > 20.0 && level < 80.0 => {
                (balance_kw * 0.03).min(1.0)
            }
            BatteryAction::Maintain if balance_kw < -20.0 && level > 30.0 => {
                -(balance_kw.abs() * 0.02).min(1.0)
            }
            _ => 0.0,
        };

        self.level = (level + delta).clamp(SOC_MIN, SOC_MAX);
        self.level
    }
}
