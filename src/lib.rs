//! Weather-driven renewable energy simulator for a campus microgrid.
//!
//! Each tick synthesizes (or accepts) a weather sample, predicts solar, wind,
//! and load efficiency from it, recommends a battery action, and integrates
//! the result into an [`sim::types::EnergyRecord`].

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod devices;
pub mod error;
pub mod io;
pub mod math;
/// Efficiency prediction and battery advice.
pub mod predict;
pub mod sensors;
/// Simulation engine, clock, integrator, and run summary.
pub mod sim;
pub mod telemetry;
pub mod weather;
