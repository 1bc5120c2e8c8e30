use runoff_core::traits::ModelParams;
use runoff_macros::ModelParams;

#[derive(Debug, Clone, Copy, PartialEq, ModelParams)]
pub struct TestParams {
    #[param(min = 1.0, max = 1500.0)]
    pub capacity: f64,
    #[param(min = -10.0, max = 5.0)]
    pub exchange: f64,
}

fn main() {
    let p = TestParams::from_array(&[350.0, -1.5]).unwrap();
    assert_eq!(p, TestParams { capacity: 350.0, exchange: -1.5 });
    assert_eq!(p.to_array(), vec![350.0, -1.5]);
    assert_eq!(TestParams::N_PARAMS, 2);
    assert_eq!(TestParams::PARAM_NAMES, &["capacity", "exchange"]);
    assert_eq!(TestParams::PARAM_BOUNDS, &[(1.0, 1500.0), (-10.0, 5.0)]);
    assert!(TestParams::from_array(&[1.0]).is_err());

    let doubled = TestParams::from_fn(|i| 2.0 * p.to_array()[i]);
    assert_eq!(doubled.to_array(), vec![700.0, -3.0]);
}
