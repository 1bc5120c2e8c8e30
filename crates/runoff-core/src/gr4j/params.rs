/// GR4J calibrated parameters.
///
/// Four parameters that define model behavior:
/// - `x1`: Production store capacity [mm]
/// - `x2`: Groundwater exchange coefficient [mm/day]
/// - `x3`: Routing store capacity [mm]
/// - `x4`: Unit hydrograph time base [days]
///
/// Values are never range-checked; the bounds only seed calibration.
use super::constants::{DEFAULT_X1, DEFAULT_X2, DEFAULT_X3, DEFAULT_X4};
use crate::ModelParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ModelParams)]
pub struct Parameters {
    #[param(min = 1.0, max = 2500.0)]
    pub x1: f64,
    #[param(min = -5.0, max = 5.0)]
    pub x2: f64,
    #[param(min = 1.0, max = 1000.0)]
    pub x3: f64,
    #[param(min = 0.5, max = 10.0)]
    pub x4: f64,
}

impl Parameters {
    /// Create new Parameters.
    pub fn new(x1: f64, x2: f64, x3: f64, x4: f64) -> Self {
        Self { x1, x2, x3, x4 }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new(DEFAULT_X1, DEFAULT_X2, DEFAULT_X3, DEFAULT_X4)
    }
}
