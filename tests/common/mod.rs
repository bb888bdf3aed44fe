//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use chrono::NaiveDateTime;
use rand::SeedableRng;
use rand::rngs::StdRng;

use campus_energy_sim::devices::BatteryBank;
use campus_energy_sim::predict::{BatteryAction, EnergyPrediction};
use campus_energy_sim::sim::clock::{SimClock, month_start};
use campus_energy_sim::sim::engine::{Engine, Integrator};

/// Midnight on the first of `month`, 2025.
pub fn start_of(month: u32) -> NaiveDateTime {
    month_start(2025, month).expect("valid month")
}

/// Default plant with an hourly simulated clock starting in `month`.
pub fn engine_in(month: u32, seed: u64) -> Engine<StdRng> {
    engine_with(month, seed, Integrator::default(), BatteryBank::default())
}

/// Engine with a custom plant and battery.
pub fn engine_with(
    month: u32,
    seed: u64,
    integrator: Integrator,
    battery: BatteryBank,
) -> Engine<StdRng> {
    Engine::new(
        integrator,
        battery,
        SimClock::simulated(start_of(month), 60),
        StdRng::seed_from_u64(seed),
    )
}

/// Prediction with the given efficiencies and action, optimal charge 80 %.
pub fn prediction(solar: f32, wind: f32, load: f32, action: BatteryAction) -> EnergyPrediction {
    EnergyPrediction {
        solar_efficiency: solar,
        wind_efficiency: wind,
        load_multiplier: load,
        battery_optimal_charge: 80.0,
        recommendation: action,
    }
}
