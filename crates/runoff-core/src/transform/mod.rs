//! Reparameterizations between physical parameter space and the space an
//! optimizer searches.
//!
//! Capacities spanning several orders of magnitude are easier to search on a
//! log scale; [`FieldwiseTransform`] applies one scalar [`FieldTransform`] per
//! parameter field.

pub mod functions;

use std::marker::PhantomData;

use tracing::warn;

use crate::error::{Error, Result};
use crate::range::ParamRange;
use crate::traits::ModelParams;

use functions::{
    boxcox, boxcox2, inv_boxcox, inv_boxcox2, inv_log_sinh, inv_log_trans, log_sinh, log_trans,
};

/// Two-way mapping of a parameter set, plus the matching map of its range.
pub trait ParamTransform: Send + Sync {
    type Params;

    /// Physical space to search space.
    fn transform(&self, params: &Self::Params) -> Self::Params;

    /// Search space back to physical space.
    fn inverse_transform(&self, params: &Self::Params) -> Self::Params;

    /// Map a physical range into search space.
    fn transform_range(&self, range: &ParamRange) -> ParamRange;
}

/// Scalar transform applied to a single field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FieldTransform {
    #[default]
    Identity,
    /// `ln(y + offset)`.
    Log { offset: f64 },
    /// One-parameter Box–Cox.
    BoxCox { lambda: f64 },
    /// Box–Cox of `y + nu`.
    BoxCox2 { lambda: f64, nu: f64 },
    /// `ln(sinh(a + b·y)) / b`.
    LogSinh { a: f64, b: f64 },
    /// `asinh(y)`, for fields that change sign.
    Asinh,
}

impl FieldTransform {
    pub fn forward(self, y: f64) -> f64 {
        match self {
            FieldTransform::Identity => y,
            FieldTransform::Log { offset } => log_trans(y, offset),
            FieldTransform::BoxCox { lambda } => boxcox(y, lambda),
            FieldTransform::BoxCox2 { lambda, nu } => boxcox2(y, lambda, nu),
            FieldTransform::LogSinh { a, b } => log_sinh(y, a, b),
            FieldTransform::Asinh => y.asinh(),
        }
    }

    pub fn inverse(self, z: f64) -> f64 {
        match self {
            FieldTransform::Identity => z,
            FieldTransform::Log { offset } => inv_log_trans(z, offset),
            FieldTransform::BoxCox { lambda } => inv_boxcox(z, lambda),
            FieldTransform::BoxCox2 { lambda, nu } => inv_boxcox2(z, lambda, nu),
            FieldTransform::LogSinh { a, b } => inv_log_sinh(z, a, b),
            FieldTransform::Asinh => z.sinh(),
        }
    }
}

/// One [`FieldTransform`] per field of `P`, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldwiseTransform<P> {
    fields: Vec<FieldTransform>,
    _params: PhantomData<fn() -> P>,
}

impl<P: ModelParams> FieldwiseTransform<P> {
    /// Build from a full list of field transforms.
    ///
    /// Fails with [`Error::ParameterCount`] unless there is exactly one entry
    /// per field of `P`.
    pub fn new(fields: Vec<FieldTransform>) -> Result<Self> {
        if fields.len() != P::N_PARAMS {
            return Err(Error::ParameterCount {
                expected: P::N_PARAMS,
                got: fields.len(),
            });
        }
        Ok(Self {
            fields,
            _params: PhantomData,
        })
    }

    /// Identity on every field.
    pub fn identity() -> Self {
        Self {
            fields: vec![FieldTransform::Identity; P::N_PARAMS],
            _params: PhantomData,
        }
    }

    /// Replace the transform of the field called `name`.
    pub fn with_field(mut self, name: &str, transform: FieldTransform) -> Self {
        match P::PARAM_NAMES.iter().position(|&n| n == name) {
            Some(i) => self.fields[i] = transform,
            None => warn!(field = name, "no such parameter field, transform ignored"),
        }
        self
    }

    pub fn fields(&self) -> &[FieldTransform] {
        &self.fields
    }
}

impl<P: ModelParams> ParamTransform for FieldwiseTransform<P> {
    type Params = P;

    fn transform(&self, params: &P) -> P {
        let values = params.to_array();
        P::from_fn(|i| self.fields[i].forward(values[i]))
    }

    fn inverse_transform(&self, params: &P) -> P {
        let values = params.to_array();
        P::from_fn(|i| self.fields[i].inverse(values[i]))
    }

    fn transform_range(&self, range: &ParamRange) -> ParamRange {
        range.map_ends(|i, v| match self.fields.get(i) {
            Some(t) => t.forward(v),
            None => v,
        })
    }
}
