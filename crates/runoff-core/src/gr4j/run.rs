/// GR4J model orchestration.
///
/// - `step()`: Execute a single timestep → (runoff, State)
/// - [`Gr4j`]: the [`RunoffModel`] implementation used by simulation and calibration
use super::constants::B;
use super::params::Parameters;
use super::processes;
use super::state::State;
use super::unit_hydrographs;
use crate::traits::RunoffModel;

/// Execute one timestep of the GR4J model.
///
/// Consumes the current state and returns total runoff with the next state.
/// The exchange term F feeds both the routing store and the direct branch.
pub fn step(rain: f64, pet: f64, state: State, params: &Parameters) -> (f64, State) {
    let State {
        production_store,
        routing_store,
        uh1,
        uh2,
        uh1_ordinates,
        uh2_ordinates,
    } = state;

    // 1. Net inputs
    let (pn, en) = processes::net_inputs(rain, pet);

    // 2. Production store update
    let (production_store, ps, _es) =
        processes::production_store_update(pn, en, production_store, params.x1);

    // 3. Percolation
    let (production_store, perc) = processes::percolation(production_store, params.x1);
    let routed = perc + (pn - ps);

    // 4. Split routed water between the unit hydrographs
    let uh1 = unit_hydrographs::update(uh1, B * routed, &uh1_ordinates);
    let uh2 = unit_hydrographs::update(uh2, (1.0 - B) * routed, &uh2_ordinates);

    // 5. Unit hydrograph outputs
    let q9 = uh1.first().copied().unwrap_or(0.0);
    let q1 = uh2.first().copied().unwrap_or(0.0);

    // 6. Groundwater exchange
    let exchange_f = processes::groundwater_exchange(routing_store, params.x2, params.x3);

    // 7. Routing store
    let (routing_store, qr) =
        processes::routing_store_update(routing_store, q9, exchange_f, params.x3);

    // 8. Direct branch
    let qd = processes::direct_branch(q1, exchange_f);

    // 9. Total runoff
    let runoff = qr + qd;

    let new_state = State {
        production_store,
        routing_store,
        uh1,
        uh2,
        uh1_ordinates,
        uh2_ordinates,
    };

    (runoff, new_state)
}

/// The GR4J model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gr4j;

impl RunoffModel for Gr4j {
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
