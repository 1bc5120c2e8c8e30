use runoff_core::traits::ModelParams;
use runoff_macros::ModelParams;

#[derive(Debug, Clone, Copy, ModelParams)]
pub struct Loose {
    pub a: f64,
}

fn main() {
    assert_eq!(Loose::PARAM_BOUNDS, &[(f64::NEG_INFINITY, f64::INFINITY)]);
    let p = Loose::from_array(&[f64::NAN]).unwrap();
    assert!(p.a.is_nan());
}
