//! Shape-preserving elementwise evaluation.
//!
//! Every public conversion accepts "a redshift" or "many redshifts" through
//! the [`Elementwise`] trait: a scalar maps to a scalar, a slice or `Vec` maps
//! to a `Vec` of the same length, and a fixed-size array maps to an array of
//! the same size. Elements are independent, so slices may be evaluated in
//! parallel when the `parallel` feature is enabled.

use crate::error::CosmologyResult;

/// Values that can be mapped one element at a time while keeping their shape.
///
/// # Examples
///
/// ```
/// use lightcone_cosmology::core::elementwise::Elementwise;
///
/// let doubled = vec![1.0_f64, 2.0].try_map_values(|x| Ok(2.0 * x)).unwrap();
/// assert_eq!(doubled, vec![2.0, 4.0]);
///
/// let single = 3.0_f64.try_map_values(|x| Ok(x + 1.0)).unwrap();
/// assert_eq!(single, 4.0);
/// ```
pub trait Elementwise {
    type Output;

    /// Applies `f` to every element, failing on the first error.
    fn try_map_values<F>(self, f: F) -> CosmologyResult<Self::Output>
    where
        F: Fn(f64) -> CosmologyResult<f64> + Send + Sync;
}

impl Elementwise for f64 {
    type Output = f64;

    fn try_map_values<F>(self, f: F) -> CosmologyResult<f64>
    where
        F: Fn(f64) -> CosmologyResult<f64> + Send + Sync,
    {
        f(self)
    }
}

impl Elementwise for &[f64] {
    type Output = Vec<f64>;

    #[cfg(not(feature = "parallel"))]
    fn try_map_values<F>(self, f: F) -> CosmologyResult<Vec<f64>>
    where
        F: Fn(f64) -> CosmologyResult<f64> + Send + Sync,
    {
        self.iter().map(|&value| f(value)).collect()
    }

    #[cfg(feature = "parallel")]
    fn try_map_values<F>(self, f: F) -> CosmologyResult<Vec<f64>>
    where
        F: Fn(f64) -> CosmologyResult<f64> + Send + Sync,
    {
        use rayon::prelude::*;

        self.par_iter().map(|&value| f(value)).collect()
    }
}

impl Elementwise for &Vec<f64> {
    type Output = Vec<f64>;

    fn try_map_values<F>(self, f: F) -> CosmologyResult<Vec<f64>>
    where
        F: Fn(f64) -> CosmologyResult<f64> + Send + Sync,
    {
        self.as_slice().try_map_values(f)
    }
}

impl Elementwise for Vec<f64> {
    type Output = Vec<f64>;

    fn try_map_values<F>(self, f: F) -> CosmologyResult<Vec<f64>>
    where
        F: Fn(f64) -> CosmologyResult<f64> + Send + Sync,
    {
        self.as_slice().try_map_values(f)
    }
}

impl<const N: usize> Elementwise for [f64; N] {
    type Output = [f64; N];

    fn try_map_values<F>(self, f: F) -> CosmologyResult<[f64; N]>
    where
        F: Fn(f64) -> CosmologyResult<f64> + Send + Sync,
    {
        let mut out = [0.0; N];
        for (slot, value) in out.iter_mut().zip(self) {
            *slot = f(value)?;
        }
        Ok(out)
    }
}
