use crate::error::Result;
use crate::forcing::Forcing;
use crate::range::ParamRange;
use crate::simulation;

/// Flat-vector view of a model's parameter set.
///
/// Usually derived with `#[derive(ModelParams)]`; the declaration order of
/// the fields is the vector order.
pub trait ModelParams: Sized {
    const N_PARAMS: usize;
    const PARAM_NAMES: &'static [&'static str];
    const PARAM_BOUNDS: &'static [(f64, f64)];

    /// Build a parameter set from values in field order.
    ///
    /// Only the length is checked; values outside `PARAM_BOUNDS` are accepted.
    fn from_array(arr: &[f64]) -> Result<Self>;

    /// Build a parameter set by asking `f` for the value at each field index.
    fn from_fn<F: FnMut(usize) -> f64>(f: F) -> Self;

    fn to_array(&self) -> Vec<f64>;

    /// Default calibration range for this parameter set.
    fn range() -> ParamRange {
        ParamRange::new(Self::PARAM_NAMES, Self::PARAM_BOUNDS)
    }
}

/// Contract for lumped rainfall-runoff models.
///
/// Models are stateless types: parameters and state are passed explicitly and
/// `step` consumes the old state and hands back its successor, so independent
/// simulations never share a state value.
pub trait RunoffModel {
    type Params: ModelParams + Clone + Send + Sync;
    type State: Clone + Send;

    /// Create the starting state for a parameter set.
    fn init_state(params: &Self::Params) -> Self::State;

    /// Advance one timestep, returning runoff and the next state.
    fn step(rain: f64, pet: f64, state: Self::State, params: &Self::Params) -> (f64, Self::State);

    /// A reasonable parameter set to start from.
    fn default_params() -> Self::Params;

    fn params_range() -> ParamRange {
        <Self::Params as ModelParams>::range()
    }

    /// Run the model over a forcing series.
    ///
    /// Uses `init_state(params)` when no initial state is given.
    fn run(
        params: &Self::Params,
        forcing: &Forcing,
        initial_state: Option<Self::State>,
    ) -> Result<Vec<f64>> {
        let state = initial_state.unwrap_or_else(|| Self::init_state(params));
        simulation::simulate(Self::step, forcing.rain(), forcing.pet(), params, state)
    }
}

/// Skill objective over `(observed, simulated)`; lower is better.
pub type Objective = dyn Fn(&[f64], &[f64]) -> f64 + Send + Sync;
