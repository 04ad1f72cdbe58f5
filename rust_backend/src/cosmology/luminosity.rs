//! Luminosity distance with optional spatial-curvature correction.

use log::debug;

use crate::core::params::CosmologyParams;
use crate::error::{ensure_finite, CosmologyError, CosmologyResult};
use crate::numerics::quadrature::integrate_value;

/// `1 / sqrt((1+z)²(1 + 2(q₀+Λ)z) - z(2+z)Λ)`; zero where the radicand is not positive.
pub(crate) fn luminosity_integrand(params: &CosmologyParams, z: f64) -> f64 {
    let term1 = (1.0 + z) * (1.0 + z);
    let term2 = 1.0 + 2.0 * (params.q0 + params.lambda) * z;
    let term3 = z * (2.0 + z) * params.lambda;
    let radicand = term1 * term2 - term3;
    if radicand > 0.0 {
        1.0 / radicand.sqrt()
    } else {
        0.0
    }
}

/// Applies the curvature substitution `S_k` to a dimensionless distance integral.
///
/// * `k > 0`: `sinh(sqrt(k)·I) / sqrt(k)`
/// * `k < 0`: `sin(sqrt(-k)·I) / sqrt(-k)`
/// * `k = 0`: `I`
///
/// # Examples
///
/// ```
/// use lightcone_cosmology::cosmology::luminosity::curvature_transform;
///
/// assert_eq!(curvature_transform(0.5, 0.0), 0.5);
/// assert!(curvature_transform(0.5, 0.1) > 0.5);
/// assert!(curvature_transform(0.5, -0.1) < 0.5);
/// ```
pub fn curvature_transform(integral: f64, k: f64) -> f64 {
    if k > 0.0 {
        let root = k.sqrt();
        (root * integral).sinh() / root
    } else if k < 0.0 {
        let root = (-k).sqrt();
        (root * integral).sin() / root
    } else {
        integral
    }
}

/// Mattig-style closed form for Λ = 0:
/// `(c·z/H₀)·(1 + z(1-q₀)/(sqrt(1+2q₀z) + 1 + q₀z))`.
fn closed_form(params: &CosmologyParams, z: f64) -> CosmologyResult<f64> {
    let radicand = 1.0 + 2.0 * params.q0 * z;
    if radicand < 0.0 {
        return Err(CosmologyError::DomainError(format!(
            "closed-form luminosity distance undefined at z = {} for q0 = {}",
            z, params.q0
        )));
    }
    let denom = radicand.sqrt() + 1.0 + params.q0 * z;
    Ok(params.hubble_distance() * z * (1.0 + z * (1.0 - params.q0) / denom))
}

/// Luminosity distance in Mpc at redshift `z` with curvature constant `k`.
///
/// With Λ = 0 the closed form is used; it already carries the curvature
/// implied by q₀, so `k` is not applied a second time. Otherwise the
/// integrand is integrated from 0 to `z` and the result is
/// `c(1+z)/H₀ · S_k(∫)`. Redshifts `z <= 0` give exactly 0.
pub fn luminosity_distance(params: &CosmologyParams, z: f64, k: f64) -> CosmologyResult<f64> {
    ensure_finite("redshift", z)?;
    ensure_finite("curvature constant", k)?;
    if z <= 0.0 {
        return Ok(0.0);
    }

    if params.lambda == 0.0 {
        if k != 0.0 {
            debug!("Lambda = 0: closed-form luminosity distance ignores k = {}", k);
        }
        return closed_form(params, z);
    }

    let integral = integrate_value(|x| luminosity_integrand(params, x), 0.0, z)?;
    Ok(params.hubble_distance() * (1.0 + z) * curvature_transform(integral, k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmology::comoving::comoving_distance;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_and_negative_redshift() {
        let params = CosmologyParams::default();
        assert_eq!(luminosity_distance(&params, 0.0, 0.0).unwrap(), 0.0);
        assert_eq!(luminosity_distance(&params, -0.5, 0.0).unwrap(), 0.0);

        let flat = CosmologyParams::matter_only(0.7, 1.0);
        assert_eq!(luminosity_distance(&flat, 0.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_flat_lcdm_is_one_plus_z_times_comoving() {
        let params = CosmologyParams::default();
        for z in [0.1, 1.0, 6.5, 20.0] {
            let dl = luminosity_distance(&params, z, 0.0).unwrap();
            let dc = comoving_distance(&params, z).unwrap();
            assert_relative_eq!(dl, (1.0 + z) * dc, max_relative = 1e-7);
        }
    }

    #[test]
    fn test_empty_universe_closed_form() {
        // q₀ = 0: D_L = c/H₀ (z + z²/2)
        let params = CosmologyParams::matter_only(0.7, 0.0);
        let z = 3.0;
        let expected = params.hubble_distance() * (z + 0.5 * z * z);
        assert_relative_eq!(
            luminosity_distance(&params, z, 0.0).unwrap(),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_integrand_clamps_invalid_radicand() {
        let params = CosmologyParams {
            q0: -3.0,
            lambda: 0.5,
            ..CosmologyParams::default()
        };
        // 1 + 2(q0 + Λ)z goes negative for large z
        assert_eq!(luminosity_integrand(&params, 10.0), 0.0);
        assert!(luminosity_integrand(&params, 0.0) > 0.0);
    }

    #[test]
    fn test_curvature_direction() {
        let params = CosmologyParams::default();
        let flat = luminosity_distance(&params, 2.0, 0.0).unwrap();
        let open_small = luminosity_distance(&params, 2.0, 0.05).unwrap();
        let open_large = luminosity_distance(&params, 2.0, 0.2).unwrap();
        let closed_small = luminosity_distance(&params, 2.0, -0.05).unwrap();
        let closed_large = luminosity_distance(&params, 2.0, -0.2).unwrap();

        assert!(open_small > flat && open_large > open_small);
        assert!(closed_small < flat && closed_large < closed_small);
    }

    #[test]
    fn test_curvature_transform_small_k_limit() {
        let i = 0.8;
        assert_relative_eq!(curvature_transform(i, 1e-10), i, max_relative = 1e-9);
        assert_relative_eq!(curvature_transform(i, -1e-10), i, max_relative = 1e-9);
    }

    #[test]
    fn test_closed_form_domain() {
        let params = CosmologyParams::matter_only(0.7, -1.0);
        // q0 = -0.5: 1 + 2 q0 z < 0 beyond z = 1
        assert!(luminosity_distance(&params, 2.0, 0.0).is_err());
    }
}
