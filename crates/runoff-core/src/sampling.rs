//! Random parameter sets and parallel ensemble evaluation.

use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::forcing::Forcing;
use crate::range::ParamRange;
use crate::traits::{ModelParams, Objective, RunoffModel};

/// Draw a parameter set uniformly within each `(min, max)` entry of `range`.
///
/// `range` must have one entry per field of `P`, in field order. Infinite
/// ends give non-finite samples.
pub fn random_params<P, R>(range: &ParamRange, rng: &mut R) -> Result<P>
where
    P: ModelParams,
    R: Rng,
{
    Error::check_len("range", P::N_PARAMS, range.len())?;
    let bounds = range.to_tuples();
    Ok(P::from_fn(|i| {
        let (lo, hi) = bounds[i];
        lo + (hi - lo) * rng.gen::<f64>()
    }))
}

/// Score independent parameter sets against `observed`, in parallel.
///
/// Each set is simulated from its own freshly initialised state. Returns one
/// objective value per set, in input order.
pub fn evaluate_ensemble<M: RunoffModel>(
    forcing: &Forcing,
    observed: &[f64],
    parameter_sets: &[M::Params],
    objective: &Objective,
) -> Result<Vec<f64>> {
    Error::check_len("observed", forcing.len(), observed.len())?;
    debug!(members = parameter_sets.len(), timesteps = forcing.len(), "evaluating ensemble");

    parameter_sets
        .par_iter()
        .map(|params| M::run(params, forcing, None).map(|sim| objective(observed, &sim)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gr4j::{self, Gr4j};
    use crate::metrics::{nse_loss, rmse};
    use crate::single_store::{self, SingleStore};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_params_within_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let range = gr4j::Parameters::range();
        for _ in 0..200 {
            let p: gr4j::Parameters = random_params(&range, &mut rng).unwrap();
            for (v, b) in p.to_array().iter().zip(range.iter()) {
                assert!(*v >= b.min && *v <= b.max, "{} = {v} outside range", b.name);
            }
        }
    }

    #[test]
    fn random_params_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let range = ParamRange::new(&["capacity", "loss"], &[(50.0, 50.0), (0.2, 0.2)]);
        let p: single_store::Parameters = random_params(&range, &mut rng).unwrap();
        assert_eq!(p, single_store::Parameters::new(50.0, 0.2));
    }

    #[test]
    fn random_params_rejects_short_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let range = ParamRange::new(&["capacity"], &[(1.0, 2.0)]);
        let err = random_params::<single_store::Parameters, _>(&range, &mut rng).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn random_params_reproducible_with_seed() {
        let range = gr4j::Parameters::range();
        let a: gr4j::Parameters = random_params(&range, &mut StdRng::seed_from_u64(9)).unwrap();
        let b: gr4j::Parameters = random_params(&range, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    fn forcing() -> Forcing {
        let rain = (0..200).map(|i| if i % 7 == 0 { 25.0 } else { 0.5 }).collect();
        let pet = (0..200).map(|i| 2.0 + (i % 5) as f64 * 0.5).collect();
        Forcing::new(rain, pet).unwrap()
    }

    #[test]
    fn ensemble_matches_sequential_runs() {
        let f = forcing();
        let truth = gr4j::Parameters::default();
        let observed = Gr4j::run(&truth, &f, None).unwrap();
        let sets = vec![
            truth,
            gr4j::Parameters::new(200.0, -1.0, 50.0, 2.5),
            gr4j::Parameters::new(800.0, 0.5, 150.0, 1.1),
        ];

        let scores = evaluate_ensemble::<Gr4j>(&f, &observed, &sets, &nse_loss).unwrap();

        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0], 0.0);
        for (p, s) in sets.iter().zip(&scores) {
            let sim = Gr4j::run(p, &f, None).unwrap();
            assert_eq!(*s, nse_loss(&observed, &sim));
        }
    }

    #[test]
    fn ensemble_of_random_sets() {
        let f = forcing();
        let observed = SingleStore::run(&single_store::Parameters::default(), &f, None).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let sets: Vec<single_store::Parameters> = (0..32)
            .map(|_| random_params(&single_store::Parameters::range(), &mut rng).unwrap())
            .collect();

        let scores = evaluate_ensemble::<SingleStore>(&f, &observed, &sets, &rmse).unwrap();
        assert_eq!(scores.len(), 32);
        assert!(scores.iter().all(|s| s.is_finite() && *s >= 0.0));
    }

    #[test]
    fn ensemble_rejects_observed_length_mismatch() {
        let f = forcing();
        let err = evaluate_ensemble::<Gr4j>(&f, &[1.0; 3], &[gr4j::Parameters::default()], &rmse)
            .unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { what: "observed", .. }));
    }

    #[test]
    fn empty_ensemble() {
        let f = forcing();
        let observed = vec![0.0; f.len()];
        let scores = evaluate_ensemble::<SingleStore>(&f, &observed, &[], &rmse).unwrap();
        assert!(scores.is_empty());
    }
}
