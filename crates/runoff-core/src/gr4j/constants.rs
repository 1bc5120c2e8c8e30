/// GR4J numerical constants and default parameter set.

// -- Routing split fractions --

/// Fraction of routed water sent through UH1 to the routing store.
pub const B: f64 = 0.9;

// -- Unit hydrograph parameters --

/// S-curve exponent.
pub const D: f64 = 2.5;

/// Inline capacity of unit hydrograph buffers; longer kernels spill to the heap.
pub const UH_INLINE: usize = 20;

/// Upper limit on unit hydrograph length, reached only for X4 above 1000 days.
pub const MAX_UH_LENGTH: usize = 2000;

// -- Store constants --

/// Percolation scale: Perc uses (4/9 * S/X1)^4.
pub const PERC_RATIO: f64 = 4.0 / 9.0;

/// Exponent of the groundwater exchange term F = X2 * (R/X3)^3.5.
pub const EXCHANGE_EXPONENT: f64 = 3.5;

// -- Numerical safeguards --

/// Maximum argument for tanh in the production store.
pub const MAX_TANH_ARG: f64 = 13.0;

// -- Initial state --

/// Production store starts at this fraction of X1.
pub const INIT_PRODUCTION_FRACTION: f64 = 0.5;

/// Routing store starts at this fraction of X3.
pub const INIT_ROUTING_FRACTION: f64 = 0.5;

// -- Default parameters --

pub const DEFAULT_X1: f64 = 350.0;
pub const DEFAULT_X2: f64 = 0.0;
pub const DEFAULT_X3: f64 = 90.0;
pub const DEFAULT_X4: f64 = 1.7;

// -- Search-space transform --

/// Offset of the x4 log transform, ln(x4 - 0.4); keeps the lower bound 0.5 finite.
pub const X4_LOG_OFFSET: f64 = -0.4;
