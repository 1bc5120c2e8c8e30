//! Per-field calibration ranges.

/// Calibration range of one parameter field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamBound {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

/// Ordered `(name, min, max)` entries, one per parameter field, in the
/// field order of the parameter struct.
///
/// Nothing checks that a concrete parameter value lies inside its range.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamRange {
    bounds: Vec<ParamBound>,
}

impl ParamRange {
    /// Zip field names with `(min, max)` pairs.
    ///
    /// Extra entries on either side are dropped.
    pub fn new(names: &[&'static str], bounds: &[(f64, f64)]) -> Self {
        Self {
            bounds: names
                .iter()
                .zip(bounds)
                .map(|(&name, &(min, max))| ParamBound { name, min, max })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParamBound> {
        self.bounds.iter()
    }

    /// Look up a field's bound by name.
    pub fn get(&self, name: &str) -> Option<&ParamBound> {
        self.bounds.iter().find(|b| b.name == name)
    }

    /// Field names in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.bounds.iter().map(|b| b.name).collect()
    }

    /// Ordered `(min, max)` pairs, the shape optimizers search over.
    pub fn to_tuples(&self) -> Vec<(f64, f64)> {
        self.bounds.iter().map(|b| (b.min, b.max)).collect()
    }

    /// Apply `f` to both ends of every entry.
    ///
    /// Ends are re-ordered afterwards so that `min <= max` still holds when
    /// `f` is decreasing somewhere on the range.
    pub fn map_ends<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, f64) -> f64,
    {
        let bounds = self
            .bounds
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let lo = f(i, b.min);
                let hi = f(i, b.max);
                ParamBound {
                    name: b.name,
                    min: lo.min(hi),
                    max: lo.max(hi),
                }
            })
            .collect();
        Self { bounds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> ParamRange {
        ParamRange::new(&["a", "b"], &[(1.0, 10.0), (-2.0, 2.0)])
    }

    #[test]
    fn to_tuples_keeps_field_order() {
        assert_eq!(range().to_tuples(), vec![(1.0, 10.0), (-2.0, 2.0)]);
    }

    #[test]
    fn get_by_name() {
        let r = range();
        assert_eq!(r.get("b").map(|b| b.max), Some(2.0));
        assert!(r.get("c").is_none());
    }

    #[test]
    fn map_ends_applies_to_both_ends() {
        let r = range().map_ends(|_, v| v * 2.0);
        assert_eq!(r.to_tuples(), vec![(2.0, 20.0), (-4.0, 4.0)]);
        assert_eq!(r.names(), vec!["a", "b"]);
    }

    #[test]
    fn map_ends_preserves_order_for_decreasing_map() {
        let r = range().map_ends(|_, v| -v);
        assert_eq!(r.to_tuples(), vec![(-10.0, -1.0), (-2.0, 2.0)]);
    }
}
