//! Adaptive Gauss–Kronrod quadrature.
//!
//! Globally adaptive bisection driven by the 7-point Gauss / 15-point Kronrod
//! pair: every step splits the subinterval carrying the largest error estimate
//! until the summed error meets the requested tolerance or the subinterval
//! budget is exhausted.

use log::warn;

use crate::error::{CosmologyError, CosmologyResult};

/// Kronrod abscissae on [-1, 1]; odd indices are the Gauss nodes.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// 7-point Gauss weights matching XGK[1], XGK[3], XGK[5] and the centre.
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// Tolerances and limits for [`integrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureOptions {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub max_subintervals: usize,
}

impl Default for QuadratureOptions {
    /// 1.49e-8 absolute and relative, the customary double-precision default.
    fn default() -> Self {
        Self {
            abs_tol: 1.49e-8,
            rel_tol: 1.49e-8,
            max_subintervals: 200,
        }
    }
}

/// Outcome of an adaptive integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature {
    pub value: f64,
    pub abs_error: f64,
    pub evaluations: usize,
    pub converged: bool,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

fn kronrod_segment<F>(f: &F, a: f64, b: f64) -> CosmologyResult<Segment>
where
    F: Fn(f64) -> f64,
{
    let centre = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(centre);
    let mut kronrod = WGK[7] * fc;
    let mut gauss = WG[3] * fc;
    let mut finite = fc.is_finite();

    for (j, (&x, &w)) in XGK[..7].iter().zip(&WGK[..7]).enumerate() {
        let dx = half * x;
        let pair = f(centre - dx) + f(centre + dx);
        finite &= pair.is_finite();
        kronrod += w * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    if !finite {
        return Err(CosmologyError::IntegrationError(format!(
            "integrand is not finite on [{}, {}]",
            a, b
        )));
    }

    Ok(Segment {
        a,
        b,
        value: kronrod * half,
        error: ((kronrod - gauss) * half).abs(),
    })
}

/// Integrates `f` over `[a, b]`.
///
/// Reversed bounds flip the sign; equal bounds integrate to exactly zero
/// without evaluating `f`. If the subinterval budget runs out the best
/// estimate is returned with `converged == false` and a warning is logged.
///
/// # Examples
///
/// ```
/// use lightcone_cosmology::numerics::quadrature::{integrate, QuadratureOptions};
///
/// let q = integrate(|x: f64| x * x, 0.0, 3.0, QuadratureOptions::default()).unwrap();
/// assert!((q.value - 9.0).abs() < 1e-12);
/// assert!(q.converged);
/// ```
pub fn integrate<F>(f: F, a: f64, b: f64, options: QuadratureOptions) -> CosmologyResult<Quadrature>
where
    F: Fn(f64) -> f64,
{
    if !a.is_finite() || !b.is_finite() {
        return Err(CosmologyError::IntegrationError(format!(
            "integration bounds must be finite, got [{}, {}]",
            a, b
        )));
    }
    if a == b {
        return Ok(Quadrature {
            value: 0.0,
            abs_error: 0.0,
            evaluations: 0,
            converged: true,
        });
    }
    if a > b {
        let q = integrate(f, b, a, options)?;
        return Ok(Quadrature {
            value: -q.value,
            ..q
        });
    }

    let mut segments = vec![kronrod_segment(&f, a, b)?];
    let mut evaluations = 15;

    loop {
        let total: f64 = segments.iter().map(|s| s.value).sum();
        let error: f64 = segments.iter().map(|s| s.error).sum();
        let tolerance = options.abs_tol.max(options.rel_tol * total.abs());

        if error <= tolerance {
            return Ok(Quadrature {
                value: total,
                abs_error: error,
                evaluations,
                converged: true,
            });
        }

        if segments.len() >= options.max_subintervals {
            warn!(
                "Quadrature on [{}, {}] stopped at {} subintervals (error estimate {:.3e})",
                a,
                b,
                segments.len(),
                error
            );
            return Ok(Quadrature {
                value: total,
                abs_error: error,
                evaluations,
                converged: false,
            });
        }

        let (worst, _) = segments
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, s)| {
                if s.error > best.1 {
                    (i, s.error)
                } else {
                    best
                }
            });
        let segment = segments.swap_remove(worst);
        let mid = 0.5 * (segment.a + segment.b);
        segments.push(kronrod_segment(&f, segment.a, mid)?);
        segments.push(kronrod_segment(&f, mid, segment.b)?);
        evaluations += 30;
    }
}

/// [`integrate`] with default options, returning only the value.
pub fn integrate_value<F>(f: F, a: f64, b: f64) -> CosmologyResult<f64>
where
    F: Fn(f64) -> f64,
{
    integrate(f, a, b, QuadratureOptions::default()).map(|q| q.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polynomial_exact() {
        let q = integrate(|x| 3.0 * x * x + 2.0 * x + 1.0, -1.0, 2.0, QuadratureOptions::default())
            .unwrap();
        // x^3 + x^2 + x from -1 to 2
        assert_relative_eq!(q.value, 14.0 - (-1.0), max_relative = 1e-13);
        assert!(q.converged);
    }

    #[test]
    fn test_transcendental() {
        let value = integrate_value(f64::sin, 0.0, std::f64::consts::PI).unwrap();
        assert_relative_eq!(value, 2.0, max_relative = 1e-10);

        let value = integrate_value(|x| 1.0 / x, 1.0, 100.0).unwrap();
        assert_relative_eq!(value, 100f64.ln(), max_relative = 1e-8);
    }

    #[test]
    fn test_reversed_and_empty_bounds() {
        let forward = integrate_value(f64::exp, 0.0, 1.0).unwrap();
        let backward = integrate_value(f64::exp, 1.0, 0.0).unwrap();
        assert_relative_eq!(forward, -backward, max_relative = 1e-14);

        let q = integrate(|_| panic!("must not evaluate"), 2.0, 2.0, QuadratureOptions::default())
            .unwrap();
        assert_eq!(q.value, 0.0);
        assert_eq!(q.evaluations, 0);
    }

    #[test]
    fn test_sharp_peak_needs_subdivision() {
        let q = integrate(
            |x| 1.0 / (1e-4 + (x - 0.3) * (x - 0.3)),
            0.0,
            1.0,
            QuadratureOptions::default(),
        )
        .unwrap();
        let expected = 100.0 * ((0.7f64 / 0.01).atan() + (0.3f64 / 0.01).atan());
        assert_relative_eq!(q.value, expected, max_relative = 1e-8);
        assert!(q.evaluations > 15);
    }

    #[test]
    fn test_budget_exhaustion_reports_not_converged() {
        let options = QuadratureOptions {
            abs_tol: 0.0,
            rel_tol: 0.0,
            max_subintervals: 4,
        };
        let q = integrate(|x| x.sqrt(), 0.0, 1.0, options).unwrap();
        assert!(!q.converged);
        assert_relative_eq!(q.value, 2.0 / 3.0, max_relative = 1e-3);
    }

    #[test]
    fn test_non_finite_integrand_is_error() {
        let result = integrate_value(|x| 1.0 / (x - 0.5), 0.0, 1.0);
        // The centre node hits the pole exactly.
        assert!(matches!(result, Err(CosmologyError::IntegrationError(_))));
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        assert!(integrate_value(|x| x, 0.0, f64::INFINITY).is_err());
    }
}
