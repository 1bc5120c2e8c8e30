/// Single-store constants and default parameter set.

/// The store starts at this fraction of its capacity.
pub const INIT_STORE_FRACTION: f64 = 0.5;

// -- Default parameters --

pub const DEFAULT_CAPACITY: f64 = 100.0;
pub const DEFAULT_LOSS: f64 = 0.05;
