//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;

use crate::error::EngineError;
use crate::sim::clock::SimClock;
use crate::sim::types::Mode;

/// Format accepted for `simulation.start`.
pub const START_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Longest accepted tick interval: one day.
pub const MAX_TICK_MINUTES: u32 = 24 * 60;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Run length, timing, and operating mode.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Plant sizing and initial battery level.
    #[serde(default)]
    pub plant: PlantConfig,
    /// Log filter and output format.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Run length, timing, and operating mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Master random seed.
    pub seed: u64,
    /// Number of ticks a batch run executes (must be > 0).
    pub ticks: usize,
    /// Minutes between ticks (1 to [`MAX_TICK_MINUTES`]).
    pub tick_minutes: u32,
    /// Clock source: `"simulated"` or `"wall"`.
    pub clock: String,
    /// First simulated timestamp, `YYYY-MM-DDTHH:MM:SS`.
    pub start: String,
    /// Initial mode: `"online"` or `"offline"`.
    pub mode: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks: 24,
            tick_minutes: 60,
            clock: "simulated".to_string(),
            start: "2025-03-01T00:00:00".to_string(),
            mode: "online".to_string(),
        }
    }
}

/// Plant sizing and initial battery level.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlantConfig {
    /// Nameplate solar capacity (kW).
    pub max_solar_kw: f32,
    /// Nameplate wind capacity (kW).
    pub max_wind_kw: f32,
    /// Campus base load (kW).
    pub base_load_kw: f32,
    /// Battery level at start (%, 5-100).
    pub initial_battery_percent: f32,
    /// CO2 avoided per kWh of renewable generation (kg).
    pub carbon_kg_per_kwh: f32,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            max_solar_kw: 300.0,
            max_wind_kw: 100.0,
            base_load_kw: 200.0,
            initial_battery_percent: 60.0,
            carbon_kg_per_kwh: 0.82,
        }
    }
}

/// Log filter and output format.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.ticks"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: the default plant starting in early spring.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Hot-season preset: early summer start with a heavier cooling load.
    pub fn summer_peak() -> Self {
        Self {
            simulation: SimulationConfig {
                start: "2025-05-15T00:00:00".to_string(),
                ticks: 48,
                ..SimulationConfig::default()
            },
            plant: PlantConfig {
                base_load_kw: 240.0,
                initial_battery_percent: 70.0,
                ..PlantConfig::default()
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Monsoon preset: cloudy and wet, with sensors refining the outlook.
    pub fn monsoon() -> Self {
        Self {
            simulation: SimulationConfig {
                start: "2025-08-01T00:00:00".to_string(),
                ticks: 48,
                mode: "offline".to_string(),
                ..SimulationConfig::default()
            },
            plant: PlantConfig {
                max_wind_kw: 150.0,
                initial_battery_percent: 45.0,
                ..PlantConfig::default()
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Winter preset: low sun, mild demand.
    pub fn winter() -> Self {
        Self {
            simulation: SimulationConfig {
                start: "2025-01-01T00:00:00".to_string(),
                ..SimulationConfig::default()
            },
            plant: PlantConfig {
                base_load_kw: 170.0,
                ..PlantConfig::default()
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "summer_peak", "monsoon", "winter"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "summer_peak" => Ok(Self::summer_peak()),
            "monsoon" => Ok(Self::monsoon()),
            "winter" => Ok(Self::winter()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Parsed `simulation.start`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the timestamp does not match [`START_FORMAT`].
    pub fn start(&self) -> Result<NaiveDateTime, ConfigError> {
        NaiveDateTime::parse_from_str(&self.simulation.start, START_FORMAT).map_err(|e| {
            ConfigError::new(
                "simulation.start",
                format!("expected {START_FORMAT}, got \"{}\": {e}", self.simulation.start),
            )
        })
    }

    /// Parsed `simulation.mode`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the mode is neither `online` nor `offline`.
    pub fn mode(&self) -> Result<Mode, ConfigError> {
        self.simulation
            .mode
            .parse()
            .map_err(|e: EngineError| ConfigError::new("simulation.mode", e.to_string()))
    }

    /// Builds the clock described by `simulation.clock`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unknown clock source or a bad start time.
    pub fn clock(&self) -> Result<SimClock, ConfigError> {
        let step = self.simulation.tick_minutes;
        match self.simulation.clock.as_str() {
            "simulated" => Ok(SimClock::simulated(self.start()?, step)),
            "wall" => Ok(SimClock::wall(step)),
            other => Err(ConfigError::new(
                "simulation.clock",
                format!("must be \"simulated\" or \"wall\", got \"{other}\""),
            )),
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if s.ticks == 0 {
            errors.push(ConfigError::new("simulation.ticks", "must be > 0"));
        }
        if !(1..=MAX_TICK_MINUTES).contains(&s.tick_minutes) {
            errors.push(ConfigError::new(
                "simulation.tick_minutes",
                format!("must be in [1, {MAX_TICK_MINUTES}]"),
            ));
        }
        if let Err(e) = self.clock() {
            errors.push(e);
        } else if s.clock == "wall" {
            // start is unused by a wall clock but must still parse
            if let Err(e) = self.start() {
                errors.push(e);
            }
        }
        if let Err(e) = self.mode() {
            errors.push(e);
        }

        let p = &self.plant;
        for (field, value) in [
            ("plant.max_solar_kw", p.max_solar_kw),
            ("plant.max_wind_kw", p.max_wind_kw),
            ("plant.base_load_kw", p.base_load_kw),
            ("plant.carbon_kg_per_kwh", p.carbon_kg_per_kwh),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError::new(field, "must be a finite value >= 0"));
            }
        }
        if !(5.0..=100.0).contains(&p.initial_battery_percent) {
            errors.push(ConfigError::new(
                "plant.initial_battery_percent",
                "must be in [5.0, 100.0]",
            ));
        }

        errors
    }
}
