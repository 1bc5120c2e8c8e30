use std::sync::atomic::{AtomicUsize, Ordering};

use approx::assert_relative_eq;
use runoff_core::calibration::{
    calibrate, calibrate_with, CalibrationFunctions, OptimizationOutcome, Optimizer,
    OptimizerOptions, SearchMethod, TraceMode,
};
use runoff_core::forcing::Forcing;
use runoff_core::gr4j::{self, Gr4j};
use runoff_core::metrics::nse_loss;
use runoff_core::single_store::{self, SingleStore};
use runoff_core::traits::{ModelParams, RunoffModel};
use runoff_core::transform::ParamTransform;
use runoff_core::{Error, Result};

/// Evaluates a fixed list of candidates and reports the best one.
struct Probe {
    candidates: Vec<Vec<f64>>,
    calls: AtomicUsize,
}

impl Probe {
    fn new(candidates: Vec<Vec<f64>>) -> Self {
        Self {
            candidates,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Optimizer for Probe {
    fn minimize(
        &self,
        _bounds: &[(f64, f64)],
        objective: &(dyn Fn(&[f64]) -> f64 + Sync),
    ) -> Result<OptimizationOutcome> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let mut best = (Vec::new(), f64::INFINITY);
        for c in &self.candidates {
            let score = objective(c.as_slice());
            if score < best.1 {
                best = (c.clone(), score);
            }
        }
        Ok(OptimizationOutcome {
            best: best.0,
            best_objective: best.1,
            iterations: self.candidates.len() as u64,
            termination: "candidates exhausted".into(),
        })
    }
}

/// One synthetic year: storms every few days on a seasonal PET cycle.
fn synthetic_forcing() -> Forcing {
    let mut seed: u64 = 2024;
    let rain = (0..365)
        .map(|_| {
            seed = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let u = (seed >> 33) as f64 / (1u64 << 31) as f64;
            if u > 0.7 {
                u * 40.0
            } else {
                0.0
            }
        })
        .collect();
    let pet = (0..365)
        .map(|d| 2.5 + 2.0 * (2.0 * std::f64::consts::PI * d as f64 / 365.0).sin())
        .collect();
    Forcing::new(rain, pet).unwrap()
}

fn truth() -> gr4j::Parameters {
    gr4j::Parameters::new(320.0, -0.8, 75.0, 2.2)
}

fn observed(forcing: &Forcing) -> Vec<f64> {
    Gr4j::run(&truth(), forcing, None).unwrap()
}

#[test]
fn recovers_known_parameters_without_transform() {
    let forcing = synthetic_forcing();
    let runoff = observed(&forcing);
    let functions = CalibrationFunctions::<Gr4j>::new(nse_loss);
    let probe = Probe::new(vec![
        vec![900.0, 1.0, 200.0, 4.0],
        truth().to_array(),
        vec![350.0, 0.0, 90.0, 1.7],
    ]);

    let result =
        calibrate_with(forcing.rain(), forcing.pet(), &runoff, &functions, &probe).unwrap();

    assert_eq!(result.params, truth());
    assert_eq!(result.objective, 0.0);
    assert_eq!(result.evaluations, 3);
    assert_eq!(result.iterations, 3);
    assert_eq!(result.termination, "candidates exhausted");
}

#[test]
fn recovers_known_parameters_through_transform() {
    let forcing = synthetic_forcing();
    let runoff = observed(&forcing);
    let transform = gr4j::default_transform();
    let in_search_space = transform.transform(&truth()).to_array();
    let functions = CalibrationFunctions::<Gr4j>::new(nse_loss).with_transform(transform);
    let probe = Probe::new(vec![vec![5.0, 0.0, 4.0, 0.5], in_search_space]);

    let result =
        calibrate_with(forcing.rain(), forcing.pet(), &runoff, &functions, &probe).unwrap();

    for (got, want) in result.params.to_array().iter().zip(truth().to_array()) {
        assert_relative_eq!(*got, want, epsilon = 1e-9, max_relative = 1e-9);
    }
    assert!(result.objective < 1e-9, "objective {}", result.objective);
}

#[test]
fn length_mismatch_is_rejected_before_search() {
    let forcing = synthetic_forcing();
    let runoff = observed(&forcing);
    let functions = CalibrationFunctions::<Gr4j>::new(nse_loss);
    let probe = Probe::new(vec![truth().to_array()]);

    let err = calibrate_with(forcing.rain(), forcing.pet(), &runoff[..100], &functions, &probe)
        .unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { what: "runoff", .. }));

    let err = calibrate_with(forcing.rain(), &forcing.pet()[1..], &runoff, &functions, &probe)
        .unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { what: "pet", .. }));

    assert_eq!(probe.calls.load(Ordering::Relaxed), 0);
}

#[test]
fn partial_transform_never_reaches_optimizer() {
    let forcing = synthetic_forcing();
    let runoff = observed(&forcing);
    let transform = gr4j::default_transform();
    let functions = CalibrationFunctions::<Gr4j>::new(nse_loss)
        .with_inverse_transform(move |p| transform.inverse_transform(p))
        .with_range(Gr4j::params_range);
    let probe = Probe::new(vec![truth().to_array()]);

    let err =
        calibrate_with(forcing.rain(), forcing.pet(), &runoff, &functions, &probe).unwrap_err();

    match err {
        Error::IncompleteTransformBundle { missing } => {
            assert_eq!(missing, vec!["range_transform", "range_to_tuples"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(probe.calls.load(Ordering::Relaxed), 0);
}

#[test]
fn wrong_length_candidates_score_infinity() {
    let forcing = synthetic_forcing();
    let runoff = observed(&forcing);
    let functions = CalibrationFunctions::<Gr4j>::new(nse_loss);
    let probe = Probe::new(vec![vec![1.0, 2.0], truth().to_array()]);

    let result =
        calibrate_with(forcing.rain(), forcing.pet(), &runoff, &functions, &probe).unwrap();
    assert_eq!(result.params, truth());
    assert_eq!(result.evaluations, 2);
}

#[test]
fn particle_swarm_returns_consistent_result() {
    let forcing = synthetic_forcing();
    let runoff = observed(&forcing);
    let functions =
        CalibrationFunctions::<Gr4j>::new(nse_loss).with_transform(gr4j::default_transform());
    let options = OptimizerOptions::new()
        .with_max_iterations(Some(30))
        .with_population_size(20)
        .with_trace_mode(TraceMode::Silent);

    let result = calibrate(forcing.rain(), forcing.pet(), &runoff, &functions, &options).unwrap();

    let values = result.params.to_array();
    assert!(values.iter().all(|v| v.is_finite()));
    for (v, b) in values.iter().zip(Gr4j::params_range().iter()) {
        assert!(
            *v >= b.min - 1e-6 && *v <= b.max + 1e-6,
            "{} = {v} outside [{}, {}]",
            b.name,
            b.min,
            b.max
        );
    }
    assert!(result.objective.is_finite());
    assert!(result.objective < 1.0, "objective {}", result.objective);
    assert!(result.iterations <= 30);
    assert!(result.evaluations >= 20);

    let simulated = Gr4j::run(&result.params, &forcing, None).unwrap();
    assert_relative_eq!(nse_loss(&runoff, &simulated), result.objective, epsilon = 1e-9);
}

#[test]
fn nelder_mead_recovers_truth_in_transformed_space() {
    let forcing = synthetic_forcing();
    let runoff = observed(&forcing);
    let functions =
        CalibrationFunctions::<Gr4j>::new(nse_loss).with_transform(gr4j::default_transform());
    let options = OptimizerOptions::new()
        .with_method(SearchMethod::NelderMead)
        .with_max_iterations(Some(2000))
        .with_trace_mode(TraceMode::Silent);

    let result = calibrate(forcing.rain(), forcing.pet(), &runoff, &functions, &options).unwrap();

    assert!(result.objective < 1e-6, "objective {}", result.objective);
    for ((got, want), name) in result
        .params
        .to_array()
        .iter()
        .zip(truth().to_array())
        .zip(gr4j::Parameters::PARAM_NAMES)
    {
        assert_relative_eq!(*got, want, max_relative = 1e-2);
        assert!(got.is_finite(), "{name} = {got}");
    }
    assert!(result.iterations <= 2000);
}

#[test]
fn single_store_calibrates_in_plain_space() {
    let forcing = synthetic_forcing();
    let truth = single_store::Parameters::new(40.0, 0.02);
    let runoff = SingleStore::run(&truth, &forcing, None).unwrap();
    let functions = CalibrationFunctions::<SingleStore>::new(nse_loss);
    let probe = Probe::new(vec![vec![500.0, 0.5], truth.to_array(), vec![10.0, 0.0]]);

    let result =
        calibrate_with(forcing.rain(), forcing.pet(), &runoff, &functions, &probe).unwrap();
    assert_eq!(result.params, truth);
}
