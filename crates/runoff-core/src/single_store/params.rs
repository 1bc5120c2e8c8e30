/// Single-store parameters.
///
/// - `capacity`: store capacity above which water spills [mm]
/// - `loss`: fraction of the stored water lost per step [-]
use super::constants::{DEFAULT_CAPACITY, DEFAULT_LOSS};
use crate::ModelParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ModelParams)]
pub struct Parameters {
    #[param(min = 1.0, max = 1000.0)]
    pub capacity: f64,
    #[param(min = 0.0, max = 1.0)]
    pub loss: f64,
}

impl Parameters {
    pub fn new(capacity: f64, loss: f64) -> Self {
        Self { capacity, loss }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_LOSS)
    }
}
