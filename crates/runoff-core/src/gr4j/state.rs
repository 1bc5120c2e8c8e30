/// GR4J model state variables.
///
/// Replaced wholesale every timestep:
/// - `production_store`: S, soil moisture store level [mm], 0 <= S <= X1
/// - `routing_store`: R, routing store level [mm], 0 <= R <= X3
/// - `uh1` / `uh2`: convolution accumulators of the two unit hydrographs
/// - `uh1_ordinates` / `uh2_ordinates`: kernels derived from X4 at construction
use smallvec::smallvec;

use super::constants::{INIT_PRODUCTION_FRACTION, INIT_ROUTING_FRACTION};
use super::params::Parameters;
use super::unit_hydrographs::{ordinates, UhVariant, UnitHydrograph};

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub production_store: f64,
    pub routing_store: f64,
    pub uh1: UnitHydrograph,
    pub uh2: UnitHydrograph,
    pub uh1_ordinates: UnitHydrograph,
    pub uh2_ordinates: UnitHydrograph,
}

impl State {
    /// Create initial state from parameters.
    ///
    /// - Production store at 50% of X1 capacity
    /// - Routing store at 50% of X3 capacity
    /// - UH1 sized ceil(X4), UH2 sized ceil(2*X4), accumulators all zero
    pub fn initialize(params: &Parameters) -> Self {
        let n1 = UhVariant::Fast.length(params.x4);
        let n2 = UhVariant::Slow.length(params.x4);
        Self {
            production_store: INIT_PRODUCTION_FRACTION * params.x1,
            routing_store: INIT_ROUTING_FRACTION * params.x3,
            uh1: smallvec![0.0; n1],
            uh2: smallvec![0.0; n2],
            uh1_ordinates: ordinates(UhVariant::Fast, n1, params.x4),
            uh2_ordinates: ordinates(UhVariant::Slow, n2, params.x4),
        }
    }

    /// Water held in the stores and still in transit through the unit
    /// hydrographs [mm].
    ///
    /// The head of each accumulator was already released on the step that
    /// produced it, so only the tails count.
    pub fn storage(&self) -> f64 {
        let tail = |uh: &UnitHydrograph| uh.iter().skip(1).sum::<f64>();
        self.production_store + self.routing_store + tail(&self.uh1) + tail(&self.uh2)
    }
}
