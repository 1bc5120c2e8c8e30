//! runoff-core: lumped conceptual rainfall-runoff models and calibration.
//!
//! - [`gr4j`]: the four-parameter daily GR4J model.
//! - [`single_store`]: a one-store, two-parameter teaching model.
//! - [`simulation`]: drives any [`traits::RunoffModel`] over a forcing series.
//! - [`transform`]: reparameterizations used to search a smoother space.
//! - [`calibration`]: fits parameters to observed runoff through a pluggable
//!   [`calibration::Optimizer`].
//! - [`sampling`]: random parameter sets and parallel ensemble scoring.
//! - [`metrics`]: verification scores and the objectives built from them.

// Lets `#[derive(ModelParams)]` expand to `::runoff_core::...` inside this crate.
extern crate self as runoff_core;

pub mod calibration;
pub mod error;
pub mod forcing;
pub mod gr4j;
pub mod metrics;
pub mod range;
pub mod sampling;
pub mod simulation;
pub mod single_store;
pub mod traits;
pub mod transform;

pub use error::{Error, Result};
pub use runoff_macros::ModelParams;
