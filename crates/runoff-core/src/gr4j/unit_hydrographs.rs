/// GR4J unit hydrograph kernel.
///
/// S-curve based unit hydrographs spreading routed water over later days.
/// UH1 (fast branch) has base time X4, UH2 (slow branch) base time 2*X4.
use smallvec::SmallVec;

use super::constants::{D, MAX_UH_LENGTH, UH_INLINE};

/// Fixed-length sequence of ordinates or convolution accumulators.
pub type UnitHydrograph = SmallVec<[f64; UH_INLINE]>;

/// Which of the two GR4J S-curves to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UhVariant {
    /// UH1, base time X4.
    Fast,
    /// UH2, base time 2*X4.
    Slow,
}

impl UhVariant {
    /// Number of ordinates needed for the cumulative curve to reach 1.
    ///
    /// Never less than one, so degenerate X4 values (zero, negative, NaN)
    /// still produce a usable single-ordinate kernel, and never more than
    /// `MAX_UH_LENGTH`.
    pub fn length(self, x4: f64) -> usize {
        let base = match self {
            UhVariant::Fast => x4,
            UhVariant::Slow => 2.0 * x4,
        };
        // `as` saturates: NaN and negatives map to 0, infinity to usize::MAX.
        (base.ceil() as usize).clamp(1, MAX_UH_LENGTH)
    }
}

/// Cumulative fraction of a unit input routed by time `t`.
pub fn s_curve(variant: UhVariant, x4: f64, t: f64) -> f64 {
    match variant {
        UhVariant::Fast => {
            if t <= 0.0 {
                0.0
            } else if t < x4 {
                (t / x4).powf(D)
            } else {
                1.0
            }
        }
        UhVariant::Slow => {
            if t <= 0.0 {
                0.0
            } else if t <= x4 {
                0.5 * (t / x4).powf(D)
            } else if t < 2.0 * x4 {
                1.0 - 0.5 * (2.0 - t / x4).powf(D)
            } else {
                1.0
            }
        }
    }
}

/// Compute `length` ordinates of a unit hydrograph.
///
/// Ordinate `i` (1-based) is `s_curve(i) - s_curve(i - 1)`.
pub fn ordinates(variant: UhVariant, length: usize, x4: f64) -> UnitHydrograph {
    (1..=length)
        .map(|i| {
            let t = i as f64;
            s_curve(variant, x4, t) - s_curve(variant, x4, t - 1.0)
        })
        .collect()
}

/// Convolve one day's `volume` into the accumulators and shift the window.
///
/// `new[i] = uh[i + 1] + volume * ordinates[i]`, and the last slot receives
/// only the new pulse. Ordinates missing past the end of `ordinates` count
/// as zero.
pub fn update(mut uh: UnitHydrograph, volume: f64, ordinates: &[f64]) -> UnitHydrograph {
    let n = uh.len();
    if n == 0 {
        return uh;
    }
    let ordinate = |k: usize| ordinates.get(k).copied().unwrap_or(0.0);

    for k in 0..n - 1 {
        uh[k] = uh[k + 1] + volume * ordinate(k);
    }
    uh[n - 1] = volume * ordinate(n - 1);

    uh
}
