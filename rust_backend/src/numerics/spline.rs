//! Cubic spline interpolation over strictly increasing knots.
//!
//! Piecewise cubics `S(x) = a + b(x-xi) + c(x-xi)² + d(x-xi)³` with C²
//! continuity, built with the Thomas algorithm. Two end conditions are
//! supported: natural (zero curvature) and clamped (prescribed end slopes).
//! Unlike a plotting spline, evaluation outside the knot range is an error:
//! callers rely on the spline to refuse extrapolation.

use crate::error::{CosmologyError, CosmologyResult};

/// End condition for the spline system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// Second derivative zero at both ends.
    Natural,
    /// First derivative fixed at the first and last knot.
    Clamped { start_slope: f64, end_slope: f64 },
}

/// Interpolating cubic spline.
///
/// # Examples
///
/// ```
/// use lightcone_cosmology::numerics::spline::{Boundary, CubicSpline};
///
/// let x = vec![0.0, 1.0, 2.0, 3.0];
/// let y = vec![0.0, 1.0, 8.0, 27.0];
/// let spline = CubicSpline::new(x, y, Boundary::Clamped { start_slope: 0.0, end_slope: 27.0 }).unwrap();
///
/// assert!((spline.evaluate(1.5).unwrap() - 3.375).abs() < 1e-12);
/// assert!(spline.evaluate(3.5).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    coeffs: Vec<[f64; 4]>, // a, b, c, d per segment
}

impl CubicSpline {
    /// Builds a spline through `(x[i], y[i])`.
    ///
    /// # Returns
    /// * `Err(CosmologyError::InternalError)` if the lengths differ, fewer
    ///   than two knots are given, or `x` is not strictly increasing
    pub fn new(x: Vec<f64>, y: Vec<f64>, boundary: Boundary) -> CosmologyResult<Self> {
        if x.len() != y.len() {
            return Err(CosmologyError::InternalError(format!(
                "spline knots and values differ in length ({} vs {})",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(CosmologyError::InternalError(
                "spline needs at least 2 knots".to_string(),
            ));
        }
        if x.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(CosmologyError::InternalError(
                "spline knots must be strictly increasing".to_string(),
            ));
        }

        let coeffs = compute_coefficients(&x, &y, boundary);
        Ok(Self { x, coeffs })
    }

    /// Knot range `(first, last)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Evaluates the spline at `x`.
    ///
    /// # Returns
    /// * `Err(CosmologyError::DomainError)` if `x` lies outside [`Self::domain`]
    pub fn evaluate(&self, x: f64) -> CosmologyResult<f64> {
        let (lo, hi) = self.domain();
        if !(x >= lo && x <= hi) {
            return Err(CosmologyError::DomainError(format!(
                "{} is outside the interpolation range [{}, {}]",
                x, lo, hi
            )));
        }

        let segment = self.find_segment(x);
        let dx = x - self.x[segment];
        let [a, b, c, d] = self.coeffs[segment];
        Ok(a + dx * (b + dx * (c + dx * d)))
    }

    /// First derivative at `x`, same domain rules as [`Self::evaluate`].
    pub fn derivative(&self, x: f64) -> CosmologyResult<f64> {
        let (lo, hi) = self.domain();
        if !(x >= lo && x <= hi) {
            return Err(CosmologyError::DomainError(format!(
                "{} is outside the interpolation range [{}, {}]",
                x, lo, hi
            )));
        }

        let segment = self.find_segment(x);
        let dx = x - self.x[segment];
        let [_, b, c, d] = self.coeffs[segment];
        Ok(b + dx * (2.0 * c + 3.0 * dx * d))
    }

    /// Index of the segment containing `x` (last segment for the final knot).
    fn find_segment(&self, x: f64) -> usize {
        let upper = self.x.partition_point(|&knot| knot <= x);
        upper.saturating_sub(1).min(self.coeffs.len() - 1)
    }
}

fn compute_coefficients(x: &[f64], y: &[f64], boundary: Boundary) -> Vec<[f64; 4]> {
    let n = x.len() - 1;
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();

    let mut alpha = vec![0.0; n + 1];
    for i in 1..n {
        alpha[i] = (3.0 / h[i]) * (y[i + 1] - y[i]) - (3.0 / h[i - 1]) * (y[i] - y[i - 1]);
    }

    let mut l = vec![1.0; n + 1];
    let mut mu = vec![0.0; n + 1];
    let mut z = vec![0.0; n + 1];

    if let Boundary::Clamped { start_slope, .. } = boundary {
        alpha[0] = 3.0 * (y[1] - y[0]) / h[0] - 3.0 * start_slope;
        l[0] = 2.0 * h[0];
        mu[0] = 0.5;
        z[0] = alpha[0] / l[0];
    }

    for i in 1..n {
        l[i] = 2.0 * (x[i + 1] - x[i - 1]) - h[i - 1] * mu[i - 1];
        mu[i] = h[i] / l[i];
        z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
    }

    let mut c = vec![0.0; n + 1];
    if let Boundary::Clamped { end_slope, .. } = boundary {
        alpha[n] = 3.0 * end_slope - 3.0 * (y[n] - y[n - 1]) / h[n - 1];
        l[n] = h[n - 1] * (2.0 - mu[n - 1]);
        z[n] = (alpha[n] - h[n - 1] * z[n - 1]) / l[n];
        c[n] = z[n];
    }

    let mut coeffs = vec![[0.0; 4]; n];
    for j in (0..n).rev() {
        c[j] = z[j] - mu[j] * c[j + 1];
        let b = (y[j + 1] - y[j]) / h[j] - h[j] * (c[j + 1] + 2.0 * c[j]) / 3.0;
        let d = (c[j + 1] - c[j]) / (3.0 * h[j]);
        coeffs[j] = [y[j], b, c[j], d];
    }
    coeffs
}
