//! Single-store state transition and model contract.

use super::constants::INIT_STORE_FRACTION;
use super::params::Parameters;
use crate::traits::RunoffModel;
use crate::transform::{FieldTransform, FieldwiseTransform};

/// Water held in the store [mm].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub store: f64,
}

impl State {
    pub fn initialize(params: &Parameters) -> Self {
        Self {
            store: INIT_STORE_FRACTION * params.capacity,
        }
    }
}

/// Execute one timestep.
///
/// Rain is added, PET is removed up to what the store holds, water above
/// `capacity` spills as runoff, then `loss` of the remainder leaves the system.
pub fn step(rain: f64, pet: f64, state: State, params: &Parameters) -> (f64, State) {
    let mut store = (state.store + rain).max(0.0);

    let evap = pet.max(0.0).min(store);
    store -= evap;

    let runoff = (store - params.capacity).max(0.0);
    store -= runoff;

    store -= params.loss * store;

    (runoff, State { store: store.max(0.0) })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SingleStore;

impl RunoffModel for SingleStore {
    type Params = Parameters;
    type State = State;

    fn init_state(params: &Parameters) -> State {
        State::initialize(params)
    }

    fn step(rain: f64, pet: f64, state: State, params: &Parameters) -> (f64, State) {
        step(rain, pet, state, params)
    }

    fn default_params() -> Parameters {
        Parameters::default()
    }
}

/// Log on `capacity`, identity on `loss`.
pub fn default_transform() -> FieldwiseTransform<Parameters> {
    FieldwiseTransform::identity().with_field("capacity", FieldTransform::Log { offset: 0.0 })
}
