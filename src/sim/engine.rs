//! Simulation engine that orchestrates weather, prediction, and integration.

use chrono::{Datelike, NaiveDateTime, Timelike};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, ScenarioConfig};
use crate::devices::{BatteryBank, CampusLoad, Device, DeviceContext, SolarArray, WindTurbine};
use crate::error::{EngineError, finite};
use crate::math::round_dp;
use crate::predict::{EnergyPrediction, predict};
use crate::sensors::synthesize_sensors;
use crate::weather::{Season, WeatherSample, WeatherSynthesizer};

use super::clock::SimClock;
use super::power_balance::grid_exchange;
use super::types::{EnergyRecord, ForecastLabel, Mode, TickOutput};

/// Nameplate solar capacity (kW).
pub const DEFAULT_SOLAR_KW: f32 = 300.0;
/// Nameplate wind capacity (kW).
pub const DEFAULT_WIND_KW: f32 = 100.0;
/// Campus base load (kW).
pub const DEFAULT_BASE_LOAD_KW: f32 = 200.0;
/// Grid emission factor avoided per kWh of renewable generation.
pub const DEFAULT_CARBON_KG_PER_KWH: f32 = 0.82;

/// Turns efficiencies into generation, demand, and grid exchange, and
/// advances the battery bank.
#[derive(Debug, Clone)]
pub struct Integrator {
    solar: SolarArray,
    wind: WindTurbine,
    load: CampusLoad,
    carbon_kg_per_kwh: f32,
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(
            DEFAULT_SOLAR_KW,
            DEFAULT_WIND_KW,
            DEFAULT_BASE_LOAD_KW,
            DEFAULT_CARBON_KG_PER_KWH,
        )
    }
}

impl Integrator {
    /// Creates an integrator for a plant of the given size.
    ///
    /// # Arguments
    ///
    /// * `solar_kw` - Nameplate solar capacity
    /// * `wind_kw` - Nameplate wind capacity
    /// * `base_load_kw` - Campus base load
    /// * `carbon_kg_per_kwh` - CO2 avoided per unit of renewable generation
    pub fn new(solar_kw: f32, wind_kw: f32, base_load_kw: f32, carbon_kg_per_kwh: f32) -> Self {
        Self {
            solar: SolarArray::new(solar_kw),
            wind: WindTurbine::new(wind_kw),
            load: CampusLoad::new(base_load_kw),
            carbon_kg_per_kwh: carbon_kg_per_kwh.max(0.0),
        }
    }

    /// Produces the energy record for one tick and advances `battery`.
    ///
    /// All values are computed and checked before the battery is touched, so
    /// a failed tick leaves the persistent level unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NonFiniteValue`] if any computed power is NaN or infinite.
    pub fn integrate(
        &self,
        timestamp: NaiveDateTime,
        prediction: &EnergyPrediction,
        weather: &WeatherSample,
        battery: &mut BatteryBank,
    ) -> Result<EnergyRecord, EngineError> {
        let ctx = DeviceContext::new(timestamp.hour(), prediction);

        let solar_kw = finite(self.solar.device_type(), self.solar.power_kw(&ctx))?;
        let wind_kw = finite(self.wind.device_type(), self.wind.power_kw(&ctx))?;
        let load_kw = finite(self.load.device_type(), self.load.power_kw(&ctx))?;
        let optimal = finite("batteryOptimalCharge", prediction.battery_optimal_charge)?;

        let generation_kw = solar_kw + wind_kw;
        let exchange = grid_exchange(generation_kw, load_kw);

        let level = battery.advance(exchange.balance_kw, optimal, prediction.recommendation);

        Ok(EnergyRecord {
            timestamp,
            solar_gen_kw: round_dp(solar_kw, 2),
            wind_gen_kw: round_dp(wind_kw, 2),
            load_demand_kw: round_dp(load_kw, 2),
            battery_soc_percent: round_dp(level, 1),
            grid_import_kw: round_dp(exchange.import_kw, 2),
            grid_export_kw: round_dp(exchange.export_kw, 2),
            weather: weather.condition.as_str().to_string(),
            forecast: ForecastLabel::from_balance(exchange.balance_kw),
            temperature: round_dp(weather.temperature, 1),
            carbon_saved_kg: round_dp(generation_kw * self.carbon_kg_per_kwh, 2),
        })
    }
}

/// Fixed record returned when a tick cannot be computed.
pub fn fallback_record(timestamp: NaiveDateTime) -> EnergyRecord {
    EnergyRecord {
        timestamp,
        solar_gen_kw: 150.0,
        wind_gen_kw: 25.0,
        load_demand_kw: 180.0,
        battery_soc_percent: 65.0,
        grid_import_kw: 5.0,
        grid_export_kw: 0.0,
        weather: "sunny".to_string(),
        forecast: ForecastLabel::Balanced,
        temperature: 30.0,
        carbon_saved_kg: 143.5,
    }
}

/// Simulation engine owning the plant, the battery bank, the clock, and the
/// random source.
///
/// Generic over `R: Rng` so tests can inject a seeded generator. Each
/// instance is independent; any number can coexist in one process. All
/// battery mutation goes through `&mut self`, so sharing an engine across
/// threads requires wrapping it in a lock.
#[derive(Debug)]
pub struct Engine<R: Rng> {
    integrator: Integrator,
    battery: BatteryBank,
    clock: SimClock,
    rng: R,
    mode: Mode,
    api_key: Option<String>,
}

impl Engine<StdRng> {
    /// Builds a seeded engine from a validated scenario.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] if the scenario is invalid.
    pub fn from_config(cfg: &ScenarioConfig) -> Result<Self, ConfigError> {
        if let Some(e) = cfg.validate().into_iter().next() {
            return Err(e);
        }
        let p = &cfg.plant;
        let integrator = Integrator::new(
            p.max_solar_kw,
            p.max_wind_kw,
            p.base_load_kw,
            p.carbon_kg_per_kwh,
        );
        let mut engine = Engine::new(
            integrator,
            BatteryBank::new(p.initial_battery_percent),
            cfg.clock()?,
            StdRng::seed_from_u64(cfg.simulation.seed),
        );
        engine.mode = cfg.mode()?;
        Ok(engine)
    }
}

impl<R: Rng> Engine<R> {
    /// Creates a new engine in online mode.
    pub fn new(integrator: Integrator, battery: BatteryBank, clock: SimClock, rng: R) -> Self {
        Self {
            integrator,
            battery,
            clock,
            rng,
            mode: Mode::Online,
            api_key: None,
        }
    }

    /// Switches between `"online"` and `"offline"`; effective from the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMode`] for any other mode string. The
    /// current mode is left unchanged.
    pub fn set_mode(&mut self, mode: &str, api_key: Option<String>) -> Result<(), EngineError> {
        let mode: Mode = mode.parse()?;
        if mode != self.mode {
            info!(from = %self.mode, to = %mode, "switching mode");
        }
        self.mode = mode;
        if api_key.is_some() {
            self.api_key = api_key;
        }
        Ok(())
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Weather service key handed over with the last `set_mode` call, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Current persistent battery level (%).
    pub fn battery_level(&self) -> f32 {
        self.battery.level()
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Runs one tick with synthesized weather. Never fails.
    pub fn tick(&mut self) -> TickOutput {
        match self.clock.tick() {
            Some(now) => self.tick_at(now, None),
            None => self.clock_exhausted(),
        }
    }

    /// Runs one tick with weather supplied by an external feed.
    ///
    /// An invalid sample is logged and replaced by a synthesized one.
    pub fn tick_with_weather(&mut self, weather: WeatherSample) -> TickOutput {
        let Some(now) = self.clock.tick() else {
            return self.clock_exhausted();
        };
        let supplied = match weather.validate() {
            Ok(()) => Some(weather),
            Err(e) => {
                warn!(error = %e, "discarding supplied weather, synthesizing instead");
                None
            }
        };
        self.tick_at(now, supplied)
    }

    /// Executes `ticks` consecutive ticks and returns every output.
    pub fn run(&mut self, ticks: usize) -> Vec<TickOutput> {
        (0..ticks).map(|_| self.tick()).collect()
    }

    fn tick_at(&mut self, now: NaiveDateTime, supplied: Option<WeatherSample>) -> TickOutput {
        match self.try_tick(now, supplied) {
            Ok(out) => out,
            Err(e) => {
                warn!(error = %e, timestamp = %now, "tick failed, returning fallback record");
                self.fallback_output(now)
            }
        }
    }

    fn try_tick(
        &mut self,
        now: NaiveDateTime,
        supplied: Option<WeatherSample>,
    ) -> Result<TickOutput, EngineError> {
        let hour = now.hour();
        let season = Season::from_month(now.month());
        let profile = season.profile();

        let weather = match supplied {
            Some(w) => w.settled_at(hour),
            None => WeatherSynthesizer.synthesize(hour, season, &mut self.rng),
        };
        weather.validate()?;

        let sensors = match self.mode {
            Mode::Offline => Some(synthesize_sensors(&weather, hour, &mut self.rng)),
            Mode::Online => None,
        };

        let prediction = predict(&weather, &profile, sensors.as_ref());
        let record =
            self.integrator
                .integrate(now, &prediction, &weather, &mut self.battery)?;

        debug!(
            timestamp = %now,
            season = ?season,
            condition = %weather.condition,
            solar_eff = prediction.solar_efficiency,
            wind_eff = prediction.wind_efficiency,
            load_mult = prediction.load_multiplier,
            action = prediction.recommendation.as_str(),
            battery = record.battery_soc_percent,
            "tick"
        );

        Ok(TickOutput {
            energy_record: record,
            weather_sample: weather,
            prediction,
            sensor_sample: sensors,
            mode: self.mode,
            fallback: false,
        })
    }

    fn clock_exhausted(&self) -> TickOutput {
        warn!(
            ticks = self.clock.ticks(),
            "simulated clock overflowed, returning fallback record"
        );
        self.fallback_output(NaiveDateTime::MAX)
    }

    fn fallback_output(&self, now: NaiveDateTime) -> TickOutput {
        TickOutput {
            energy_record: fallback_record(now),
            weather_sample: WeatherSample::fallback(),
            prediction: EnergyPrediction::fallback(),
            sensor_sample: None,
            mode: self.mode,
            fallback: true,
        }
    }
}
