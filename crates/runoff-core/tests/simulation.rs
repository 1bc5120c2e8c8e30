use approx::assert_relative_eq;
use runoff_core::forcing::Forcing;
use runoff_core::gr4j::{self, Gr4j};
use runoff_core::simulation::simulate;
use runoff_core::single_store::SingleStore;
use runoff_core::traits::RunoffModel;
use runoff_core::Error;

#[test]
fn gr4j_run_matches_manual_stepping() {
    let rain = [12.0, 0.0, 3.5, 40.0, 0.0, 0.0, 1.0];
    let pet = [1.0, 2.0, 2.5, 0.5, 3.0, 3.0, 2.0];
    let params = gr4j::Parameters::new(280.0, 0.6, 70.0, 2.4);

    let forcing = Forcing::new(rain.to_vec(), pet.to_vec()).unwrap();
    let q = Gr4j::run(&params, &forcing, None).unwrap();

    let mut state = Gr4j::init_state(&params);
    for (i, (&r, &e)) in rain.iter().zip(&pet).enumerate() {
        let (qi, next) = Gr4j::step(r, e, state, &params);
        assert_relative_eq!(q[i], qi);
        state = next;
    }
}

#[test]
fn simulate_accepts_model_step_functions() {
    let params = gr4j::Parameters::default();
    let rain = vec![5.0; 30];
    let pet = vec![1.0; 30];
    let state = gr4j::State::initialize(&params);
    let q = simulate(gr4j::run::step, &rain, &pet, &params, state).unwrap();
    assert_eq!(q.len(), 30);
    assert!(q.iter().all(|v| v.is_finite() && *v >= 0.0));
}

#[test]
fn simulate_rejects_unequal_forcing() {
    let params = gr4j::Parameters::default();
    let err = simulate(
        gr4j::run::step,
        &[1.0; 10],
        &[1.0; 9],
        &params,
        gr4j::State::initialize(&params),
    )
    .unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { expected: 10, got: 9, .. }));
}

#[test]
fn zero_forcing_recession_is_monotone() {
    let forcing = Forcing::new(vec![0.0; 60], vec![0.0; 60]).unwrap();
    let q = Gr4j::run(&gr4j::Parameters::new(350.0, 0.0, 90.0, 1.7), &forcing, None).unwrap();
    assert!(q.iter().all(|v| *v >= 0.0));
    // Once the percolation pulse has reached the outlet, flow only recedes.
    for w in q[4..].windows(2) {
        assert!(w[1] <= w[0], "{} then {}", w[0], w[1]);
    }
}

#[test]
fn independent_runs_do_not_share_state() {
    let forcing = Forcing::new(vec![20.0, 0.0, 0.0, 5.0], vec![1.0; 4]).unwrap();
    let params = SingleStore::default_params();
    let a = SingleStore::run(&params, &forcing, None).unwrap();
    let b = SingleStore::run(&params, &forcing, None).unwrap();
    assert_eq!(a, b);
}
