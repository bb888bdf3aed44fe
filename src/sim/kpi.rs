//! Post-hoc run summary computed from emitted energy records.

use std::fmt;

use serde::Serialize;

use super::types::{EnergyRecord, ForecastLabel};

/// Aggregate indicators for a complete run.
///
/// Built from the records that were actually emitted, either post-hoc with
/// [`RunSummary::from_records`] or one tick at a time with
/// [`RunSummary::record`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Number of records summarized.
    pub ticks: usize,
    /// Solar energy generated (kWh).
    pub solar_kwh: f32,
    /// Wind energy generated (kWh).
    pub wind_kwh: f32,
    /// Energy consumed by the campus (kWh).
    pub load_kwh: f32,
    /// Energy drawn from the grid (kWh).
    pub import_kwh: f32,
    /// Energy exported to the grid (kWh).
    pub export_kwh: f32,
    /// Peak grid import (kW).
    pub peak_import_kw: f32,
    /// Peak grid export (kW).
    pub peak_export_kw: f32,
    /// Sum of per-tick carbon savings (kg).
    pub carbon_saved_kg: f32,
    /// Renewable energy as a share of demand (%).
    pub renewable_share_pct: f32,
    pub min_soc_percent: f32,
    pub max_soc_percent: f32,
    pub surplus_ticks: usize,
    pub deficit_ticks: usize,
    pub balanced_ticks: usize,
}

impl RunSummary {
    /// Computes the summary from a run's records.
    ///
    /// # Arguments
    ///
    /// * `records` - Records in emission order
    /// * `step_hours` - Tick length in hours, used to convert kW to kWh
    pub fn from_records(records: &[EnergyRecord], step_hours: f32) -> Self {
        let mut s = Self::default();
        for r in records {
            s.record(r, step_hours);
        }
        s
    }

    /// Folds one more record into the summary.
    pub fn record(&mut self, r: &EnergyRecord, step_hours: f32) {
        if self.ticks == 0 {
            self.min_soc_percent = r.battery_soc_percent;
            self.max_soc_percent = r.battery_soc_percent;
        }
        self.ticks += 1;

        self.solar_kwh += r.solar_gen_kw * step_hours;
        self.wind_kwh += r.wind_gen_kw * step_hours;
        self.load_kwh += r.load_demand_kw * step_hours;
        self.import_kwh += r.grid_import_kw * step_hours;
        self.export_kwh += r.grid_export_kw * step_hours;

        self.peak_import_kw = self.peak_import_kw.max(r.grid_import_kw);
        self.peak_export_kw = self.peak_export_kw.max(r.grid_export_kw);
        self.carbon_saved_kg += r.carbon_saved_kg;

        self.min_soc_percent = self.min_soc_percent.min(r.battery_soc_percent);
        self.max_soc_percent = self.max_soc_percent.max(r.battery_soc_percent);

        match r.forecast {
            ForecastLabel::Surplus => self.surplus_ticks += 1,
            ForecastLabel::Deficit => self.deficit_ticks += 1,
            ForecastLabel::Balanced => self.balanced_ticks += 1,
        }

        self.renewable_share_pct = if self.load_kwh > 0.0 {
            100.0 * (self.solar_kwh + self.wind_kwh) / self.load_kwh
        } else {
            0.0
        };
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Summary ({} ticks) ---", self.ticks)?;
        writeln!(f, "Solar energy:          {:.2} kWh", self.solar_kwh)?;
        writeln!(f, "Wind energy:           {:.2} kWh", self.wind_kwh)?;
        writeln!(f, "Campus demand:         {:.2} kWh", self.load_kwh)?;
        writeln!(f, "Renewable share:       {:.1}%", self.renewable_share_pct)?;
        writeln!(
            f,
            "Grid import / export:  {:.2} / {:.2} kWh",
            self.import_kwh, self.export_kwh
        )?;
        writeln!(
            f,
            "Peak import / export:  {:.2} / {:.2} kW",
            self.peak_import_kw, self.peak_export_kw
        )?;
        writeln!(
            f,
            "Battery SoC range:     {:.1}% .. {:.1}%",
            self.min_soc_percent, self.max_soc_percent
        )?;
        writeln!(f, "Carbon saved:          {:.2} kg", self.carbon_saved_kg)?;
        write!(
            f,
            "Surplus/Deficit/Balanced ticks: {}/{}/{}",
            self.surplus_ticks, self.deficit_ticks, self.balanced_ticks
        )
    }
}
