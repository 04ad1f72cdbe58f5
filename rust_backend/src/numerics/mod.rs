//! Numerical building blocks: adaptive quadrature and spline interpolation.

pub mod quadrature;
pub mod spline;

pub use quadrature::{integrate, integrate_value, Quadrature, QuadratureOptions};
pub use spline::{Boundary, CubicSpline};
