/// Simulation clock for tick timestamps.
pub mod clock;
pub mod engine;
pub mod kpi;
pub mod power_balance;
/// Operator advisories.
pub mod recommend;
pub mod types;
