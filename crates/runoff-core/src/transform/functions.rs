//! Scalar reparameterizations and their inverses.
//!
//! Each forward function maps a physical value into search space; its
//! `inv_` counterpart maps back. None of them check their domain: values
//! outside it come out as NaN or infinite.

/// Log with offset: `ln(y + offset)`.
pub fn log_trans(y: f64, offset: f64) -> f64 {
    (y + offset).ln()
}

pub fn inv_log_trans(z: f64, offset: f64) -> f64 {
    z.exp() - offset
}

/// One-parameter Box–Cox: `(y^λ - 1) / λ`, or `ln y` when `λ = 0`.
pub fn boxcox(y: f64, lambda: f64) -> f64 {
    if lambda == 0.0 {
        y.ln()
    } else {
        (y.powf(lambda) - 1.0) / lambda
    }
}

pub fn inv_boxcox(z: f64, lambda: f64) -> f64 {
    if lambda == 0.0 {
        z.exp()
    } else {
        (lambda * z + 1.0).powf(1.0 / lambda)
    }
}

/// Two-parameter Box–Cox: Box–Cox of `y + ν`.
pub fn boxcox2(y: f64, lambda: f64, nu: f64) -> f64 {
    boxcox(y + nu, lambda)
}

pub fn inv_boxcox2(z: f64, lambda: f64, nu: f64) -> f64 {
    inv_boxcox(z, lambda) - nu
}

/// Log-sinh: `ln(sinh(a + b·y)) / b`.
///
/// Behaves like a log for small values and like the identity for large ones.
pub fn log_sinh(y: f64, a: f64, b: f64) -> f64 {
    (a + b * y).sinh().ln() / b
}

pub fn inv_log_sinh(z: f64, a: f64, b: f64) -> f64 {
    ((b * z).exp().asinh() - a) / b
}
