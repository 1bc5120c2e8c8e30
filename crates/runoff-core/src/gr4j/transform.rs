/// Default GR4J search-space transform.
///
/// - `x1`, `x3`: log (capacities spanning orders of magnitude)
/// - `x2`: asinh (signed exchange coefficient)
/// - `x4`: `ln(x4 - 0.4)`, finite across the whole `x4` range
use super::constants::X4_LOG_OFFSET;
use super::params::Parameters;
use crate::transform::{FieldTransform, FieldwiseTransform};

pub fn default_transform() -> FieldwiseTransform<Parameters> {
    FieldwiseTransform::identity()
        .with_field("x1", FieldTransform::Log { offset: 0.0 })
        .with_field("x2", FieldTransform::Asinh)
        .with_field("x3", FieldTransform::Log { offset: 0.0 })
        .with_field("x4", FieldTransform::Log { offset: X4_LOG_OFFSET })
}
