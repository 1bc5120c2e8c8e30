//! Time-series driver for single-step model functions.

use crate::error::{Error, Result};

/// Force a model with `rain` and `pet`, threading state from step to step.
///
/// `step` is called once per timestep with the current state, which is
/// replaced by the state it returns. Returns one runoff value per timestep.
///
/// Fails with [`Error::LengthMismatch`] when the two series differ in length.
pub fn simulate<P, S, F>(
    step: F,
    rain: &[f64],
    pet: &[f64],
    params: &P,
    init_state: S,
) -> Result<Vec<f64>>
where
    F: Fn(f64, f64, S, &P) -> (f64, S),
{
    Error::check_len("pet", rain.len(), pet.len())?;

    let mut runoff = Vec::with_capacity(rain.len());
    let mut state = init_state;
    for (&r, &e) in rain.iter().zip(pet) {
        let (q, next) = step(r, e, state, params);
        runoff.push(q);
        state = next;
    }

    Ok(runoff)
}
