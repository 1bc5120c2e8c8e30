//! Verification metrics and calibration objectives.
//!
//! All metrics take observed and simulated slices and return a scalar score.
//! Steps with a missing (NaN) observation are skipped. A NaN in the
//! simulation propagates into the score, and so do series of unequal length
//! or series with no observed step left: all of them score NaN.

use serde::{Deserialize, Serialize};

/// Observed and simulated values at the steps with an observation.
///
/// `None` when the series differ in length or nothing was observed.
fn observed_pairs(observed: &[f64], simulated: &[f64]) -> Option<(Vec<f64>, Vec<f64>)> {
    if observed.len() != simulated.len() {
        return None;
    }
    let (obs, sim): (Vec<f64>, Vec<f64>) = observed
        .iter()
        .zip(simulated)
        .filter(|(o, _)| !o.is_nan())
        .map(|(&o, &s)| (o, s))
        .unzip();
    if obs.is_empty() {
        None
    } else {
        Some((obs, sim))
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// Returns -inf when the observations have no variance.
pub fn coeff_det(observed: &[f64], simulated: &[f64]) -> f64 {
    let Some((obs, sim)) = observed_pairs(observed, simulated) else {
        return f64::NAN;
    };
    let mean_obs = mean(&obs);
    let numerator: f64 = obs.iter().zip(&sim).map(|(o, s)| (o - s).powi(2)).sum();
    let denominator: f64 = obs.iter().map(|o| (o - mean_obs).powi(2)).sum();
    if denominator == 0.0 {
        return f64::NEG_INFINITY;
    }
    1.0 - numerator / denominator
}

/// Nash-Sutcliffe Efficiency. Range: (-inf, 1], 1 = perfect.
pub fn nse(observed: &[f64], simulated: &[f64]) -> f64 {
    coeff_det(observed, simulated)
}

/// The three terms combined into KGE.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KgeComponents {
    pub kge: f64,
    /// Pearson correlation `r`.
    pub correlation: f64,
    /// `σ_sim / σ_obs`.
    pub relative_variability: f64,
    /// `μ_sim / μ_obs`.
    pub mean_bias: f64,
}

/// Kling-Gupta Efficiency with its components.
///
/// Zero variance or zero mean in either series sets the affected component
/// to 0 instead of dividing by zero.
pub fn kge_components(observed: &[f64], simulated: &[f64]) -> KgeComponents {
    let Some((obs, sim)) = observed_pairs(observed, simulated) else {
        return KgeComponents {
            kge: f64::NAN,
            correlation: f64::NAN,
            relative_variability: f64::NAN,
            mean_bias: f64::NAN,
        };
    };
    let n = obs.len() as f64;
    let mean_o = mean(&obs);
    let mean_s = mean(&sim);
    let std_o = (obs.iter().map(|o| (o - mean_o).powi(2)).sum::<f64>() / n).sqrt();
    let std_s = (sim.iter().map(|s| (s - mean_s).powi(2)).sum::<f64>() / n).sqrt();

    let r = if std_o == 0.0 || std_s == 0.0 {
        0.0
    } else {
        obs.iter()
            .zip(&sim)
            .map(|(o, s)| (o - mean_o) * (s - mean_s))
            .sum::<f64>()
            / (n * std_o * std_s)
    };
    let alpha = if std_o == 0.0 { 0.0 } else { std_s / std_o };
    let beta = if mean_o == 0.0 { 0.0 } else { mean_s / mean_o };

    KgeComponents {
        kge: 1.0 - ((r - 1.0).powi(2) + (alpha - 1.0).powi(2) + (beta - 1.0).powi(2)).sqrt(),
        correlation: r,
        relative_variability: alpha,
        mean_bias: beta,
    }
}

/// Kling-Gupta Efficiency. Range: (-inf, 1], 1 = perfect.
pub fn kge(observed: &[f64], simulated: &[f64]) -> f64 {
    kge_components(observed, simulated).kge
}

/// Mean Square Error. Range: [0, inf), 0 = perfect.
pub fn mse(observed: &[f64], simulated: &[f64]) -> f64 {
    let Some((obs, sim)) = observed_pairs(observed, simulated) else {
        return f64::NAN;
    };
    obs.iter().zip(&sim).map(|(o, s)| (o - s).powi(2)).sum::<f64>() / obs.len() as f64
}

/// Root Mean Square Error. Range: [0, inf), 0 = perfect.
pub fn rmse(observed: &[f64], simulated: &[f64]) -> f64 {
    mse(observed, simulated).sqrt()
}

/// Mean Absolute Error. Range: [0, inf), 0 = perfect.
pub fn mae(observed: &[f64], simulated: &[f64]) -> f64 {
    let Some((obs, sim)) = observed_pairs(observed, simulated) else {
        return f64::NAN;
    };
    obs.iter().zip(&sim).map(|(o, s)| (o - s).abs()).sum::<f64>() / obs.len() as f64
}

/// Persistence index: skill against a forecast of "same as last step".
///
/// Range: (-inf, 1], 1 = perfect, 0 = no better than persistence. Computed
/// over the observed steps in order; needs at least two of them.
pub fn persistence(observed: &[f64], simulated: &[f64]) -> f64 {
    let Some((obs, sim)) = observed_pairs(observed, simulated) else {
        return f64::NAN;
    };
    if obs.len() < 2 {
        return f64::NAN;
    }
    let numerator: f64 = obs[1..]
        .iter()
        .zip(&sim[1..])
        .map(|(o, s)| (o - s).powi(2))
        .sum();
    let denominator: f64 = obs.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum();
    if denominator == 0.0 {
        return f64::NEG_INFINITY;
    }
    1.0 - numerator / denominator
}

// -- Objectives (lower is better) --

/// `1 - NSE`; 0 for a perfect fit.
pub fn nse_loss(observed: &[f64], simulated: &[f64]) -> f64 {
    1.0 - nse(observed, simulated)
}

/// `1 - KGE`; 0 for a perfect fit.
pub fn kge_loss(observed: &[f64], simulated: &[f64]) -> f64 {
    1.0 - kge(observed, simulated)
}
