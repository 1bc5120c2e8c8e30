//! The capabilities a calibration run is assembled from.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::range::ParamRange;
use crate::traits::{Objective, RunoffModel};
use crate::transform::ParamTransform;

type InverseFn<P> = dyn Fn(&P) -> P + Send + Sync;
type RangeTransformFn = dyn Fn(&ParamRange) -> ParamRange + Send + Sync;
type RangeToTuplesFn = dyn Fn(&ParamRange) -> Vec<(f64, f64)> + Send + Sync;
type RangeFn = dyn Fn() -> ParamRange + Send + Sync;

/// Objective plus optional search-space transform for calibrating model `M`.
///
/// The four transform capabilities are all-or-none: either every one is
/// supplied, or none is and the model's plain range is searched.
pub struct CalibrationFunctions<M: RunoffModel> {
    objective: Box<Objective>,
    inverse_transform: Option<Box<InverseFn<M::Params>>>,
    range_transform: Option<Box<RangeTransformFn>>,
    range_to_tuples: Option<Box<RangeToTuplesFn>>,
    range: Option<Box<RangeFn>>,
    _model: PhantomData<fn() -> M>,
}

/// The four transform capabilities, resolved together.
pub struct TransformBundle<'f, P> {
    /// Search space back to physical parameters.
    pub inverse_transform: &'f InverseFn<P>,
    /// Physical range to search-space range.
    pub range_transform: &'f RangeTransformFn,
    pub range_to_tuples: &'f RangeToTuplesFn,
    /// Physical range to start from.
    pub range: &'f RangeFn,
}

impl<P> TransformBundle<'_, P> {
    /// `range_to_tuples(range_transform(range()))`.
    pub fn search_bounds(&self) -> Vec<(f64, f64)> {
        (self.range_to_tuples)(&(self.range_transform)(&(self.range)()))
    }
}

impl<M: RunoffModel + 'static> CalibrationFunctions<M> {
    pub fn new<F>(objective: F) -> Self
    where
        F: Fn(&[f64], &[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            objective: Box::new(objective),
            inverse_transform: None,
            range_transform: None,
            range_to_tuples: None,
            range: None,
            _model: PhantomData,
        }
    }

    pub fn with_inverse_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&M::Params) -> M::Params + Send + Sync + 'static,
    {
        self.inverse_transform = Some(Box::new(f));
        self
    }

    pub fn with_range_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&ParamRange) -> ParamRange + Send + Sync + 'static,
    {
        self.range_transform = Some(Box::new(f));
        self
    }

    pub fn with_range_to_tuples<F>(mut self, f: F) -> Self
    where
        F: Fn(&ParamRange) -> Vec<(f64, f64)> + Send + Sync + 'static,
    {
        self.range_to_tuples = Some(Box::new(f));
        self
    }

    pub fn with_range<F>(mut self, f: F) -> Self
    where
        F: Fn() -> ParamRange + Send + Sync + 'static,
    {
        self.range = Some(Box::new(f));
        self
    }

    /// Supply all four capabilities from one transform, searching the
    /// transformed image of the model's default range.
    pub fn with_transform<T>(self, transform: T) -> Self
    where
        T: ParamTransform<Params = M::Params> + 'static,
    {
        let transform = Arc::new(transform);
        let inverse = Arc::clone(&transform);
        self.with_inverse_transform(move |p| inverse.inverse_transform(p))
            .with_range_transform(move |r| transform.transform_range(r))
            .with_range_to_tuples(ParamRange::to_tuples)
            .with_range(M::params_range)
    }

    pub fn objective(&self) -> &Objective {
        self.objective.as_ref()
    }

    /// Resolve the transform capabilities.
    ///
    /// `Ok(None)` when none was supplied; [`Error::IncompleteTransformBundle`]
    /// naming the absent ones when only some were.
    pub fn transform_bundle(&self) -> Result<Option<TransformBundle<'_, M::Params>>> {
        match (
            self.inverse_transform.as_deref(),
            self.range_transform.as_deref(),
            self.range_to_tuples.as_deref(),
            self.range.as_deref(),
        ) {
            (Some(inverse), Some(range_transform), Some(to_tuples), Some(range)) => {
                Ok(Some(TransformBundle {
                    inverse_transform: inverse,
                    range_transform,
                    range_to_tuples: to_tuples,
                    range,
                }))
            }
            (None, None, None, None) => Ok(None),
            (inverse, range_transform, to_tuples, range) => {
                let missing = [
                    ("inverse_transform", inverse.is_none()),
                    ("range_transform", range_transform.is_none()),
                    ("range_to_tuples", to_tuples.is_none()),
                    ("range", range.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(Error::IncompleteTransformBundle { missing })
            }
        }
    }
}
