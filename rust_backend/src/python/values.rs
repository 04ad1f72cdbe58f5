use pyo3::prelude::*;

use crate::core::elementwise::Elementwise;
use crate::error::CosmologyResult;

/// A Python float or a list of floats; conversions return the same kind.
#[derive(Debug, Clone, PartialEq, FromPyObject, IntoPyObject)]
pub enum FloatOrList {
    Scalar(f64),
    List(Vec<f64>),
}

impl Elementwise for FloatOrList {
    type Output = FloatOrList;

    fn try_map_values<F>(self, f: F) -> CosmologyResult<FloatOrList>
    where
        F: Fn(f64) -> CosmologyResult<f64> + Send + Sync,
    {
        match self {
            FloatOrList::Scalar(value) => value.try_map_values(f).map(FloatOrList::Scalar),
            FloatOrList::List(values) => values.try_map_values(f).map(FloatOrList::List),
        }
    }
}
