//! Fitting model parameters to observed runoff.
//!
//! A calibration run searches a box of flat parameter vectors. Each candidate
//! vector is turned into a parameter set (through the inverse transform when
//! one is configured), simulated from a fresh initial state and scored by the
//! objective. The search itself is delegated to an [`Optimizer`].

pub mod functions;
pub mod optimizer;

pub use functions::{CalibrationFunctions, TransformBundle};
pub use optimizer::{
    ArgminOptimizer, OptimizationOutcome, Optimizer, OptimizerOptions, SearchMethod, TraceMode,
};

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::simulation;
use crate::traits::{ModelParams, RunoffModel};

/// Best parameter set found by a calibration run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationResult<P> {
    /// Best parameters, in physical units.
    pub params: P,
    /// Objective value of `params`.
    pub objective: f64,
    pub iterations: u64,
    /// Objective evaluations across the whole run.
    pub evaluations: usize,
    /// Why the optimizer stopped.
    pub termination: String,
}

/// Calibrate with the `argmin`-backed optimizer configured by `options`.
pub fn calibrate<M>(
    rain: &[f64],
    pet: &[f64],
    runoff: &[f64],
    functions: &CalibrationFunctions<M>,
    options: &OptimizerOptions,
) -> Result<CalibrationResult<M::Params>>
where
    M: RunoffModel + 'static,
{
    let optimizer = ArgminOptimizer::from(options.clone());
    calibrate_with(rain, pet, runoff, functions, &optimizer)
}

/// Calibrate with any [`Optimizer`].
///
/// Fails with [`Error::LengthMismatch`] when the three series differ in length
/// and with [`Error::IncompleteTransformBundle`] when only some transform
/// capabilities were supplied; both are raised before the optimizer runs.
pub fn calibrate_with<M, O>(
    rain: &[f64],
    pet: &[f64],
    runoff: &[f64],
    functions: &CalibrationFunctions<M>,
    optimizer: &O,
) -> Result<CalibrationResult<M::Params>>
where
    M: RunoffModel + 'static,
    O: Optimizer + ?Sized,
{
    Error::check_len("pet", rain.len(), pet.len())?;
    Error::check_len("runoff", rain.len(), runoff.len())?;

    let bundle = functions.transform_bundle()?;
    let bounds = match &bundle {
        Some(bundle) => bundle.search_bounds(),
        None => M::params_range().to_tuples(),
    };
    debug!(?bounds, transformed = bundle.is_some(), "search space");

    let to_params = |candidate: &[f64]| -> Result<M::Params> {
        let params = M::Params::from_array(candidate)?;
        Ok(match &bundle {
            Some(bundle) => (bundle.inverse_transform)(&params),
            None => params,
        })
    };

    let evaluations = AtomicUsize::new(0);
    let objective = |candidate: &[f64]| -> f64 {
        evaluations.fetch_add(1, Ordering::Relaxed);
        let score = to_params(candidate).and_then(|params| {
            let state = M::init_state(&params);
            let simulated = simulation::simulate(M::step, rain, pet, &params, state)?;
            Ok((functions.objective())(runoff, &simulated))
        });
        match score {
            Ok(score) if score.is_finite() => score,
            Ok(score) => {
                trace!(?candidate, score, "non-finite objective");
                f64::INFINITY
            }
            Err(err) => {
                trace!(?candidate, %err, "candidate rejected");
                f64::INFINITY
            }
        }
    };

    info!(
        model = std::any::type_name::<M>(),
        timesteps = rain.len(),
        parameters = bounds.len(),
        "calibration started"
    );

    let outcome = optimizer.minimize(&bounds, &objective)?;
    let params = to_params(&outcome.best)?;
    let evaluations = evaluations.load(Ordering::Relaxed);

    info!(
        objective = outcome.best_objective,
        iterations = outcome.iterations,
        evaluations,
        termination = %outcome.termination,
        "calibration finished"
    );

    Ok(CalibrationResult {
        params,
        objective: outcome.best_objective,
        iterations: outcome.iterations,
        evaluations,
        termination: outcome.termination,
    })
}
