//! Site energy balance and grid exchange.

/// Grid exchange resulting from one signed balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridExchange {
    /// Generation minus demand (kW).
    pub balance_kw: f32,
    /// Power drawn from the grid (kW, >= 0).
    pub import_kw: f32,
    /// Power exported to the grid (kW, >= 0).
    pub export_kw: f32,
}

/// Splits `generation - load` into grid import and export.
///
/// Import and export come from a single signed balance, so at most one of
/// them is positive.
///
/// # Arguments
///
/// * `generation_kw` - Total renewable generation (kW)
/// * `load_kw` - Site demand (kW)
pub fn grid_exchange(generation_kw: f32, load_kw: f32) -> GridExchange {
    let balance_kw = generation_kw - load_kw;
    GridExchange {
        balance_kw,
        import_kw: if balance_kw < 0.0 { -balance_kw } else { 0.0 },
        export_kw: if balance_kw > 0.0 { balance_kw } else { 0.0 },
    }
}
