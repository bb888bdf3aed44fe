/// CSV export of energy records.
pub mod export;
