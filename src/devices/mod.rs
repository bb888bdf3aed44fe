//! Plant components: generation, demand, and storage.

/// Battery bank state of charge and its update rule.
pub mod battery;
/// Campus demand profile.
pub mod load;
/// Solar photovoltaic array.
pub mod solar;
pub mod types;
/// Wind turbine bank.
pub mod wind;

// Re-export the main types for convenience
pub use battery::BatteryBank;
pub use load::CampusLoad;
pub use solar::SolarArray;
pub use types::Device;
pub use types::DeviceContext;
pub use wind::WindTurbine;
