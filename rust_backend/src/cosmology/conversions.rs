//! Algebraic conversions: 21 cm frequency, proper distance, angular size.

use std::f64::consts::PI;

use crate::core::params::CosmologyParams;
use crate::error::{ensure_finite, ensure_physical_redshift, CosmologyError, CosmologyResult};

/// Redshift of 21 cm emission observed at `nu` MHz: `ν₀/ν - 1`.
pub fn nu_to_z(params: &CosmologyParams, nu: f64) -> CosmologyResult<f64> {
    ensure_finite("frequency", nu)?;
    if nu <= 0.0 {
        return Err(CosmologyError::ValidationError(format!(
            "frequency must be positive, got {} MHz",
            nu
        )));
    }
    Ok(params.nu0 / nu - 1.0)
}

/// Observed 21 cm frequency in MHz for emission at redshift `z`: `ν₀/(1+z)`.
pub fn z_to_nu(params: &CosmologyParams, z: f64) -> CosmologyResult<f64> {
    let z = ensure_physical_redshift(z)?;
    Ok(params.nu0 / (1.0 + z))
}

/// Comoving to proper distance at redshift `z`.
pub fn c_to_p(comoving: f64, z: f64) -> CosmologyResult<f64> {
    ensure_finite("comoving distance", comoving)?;
    let z = ensure_physical_redshift(z)?;
    Ok(comoving / (1.0 + z))
}

/// Proper to comoving distance at redshift `z`.
pub fn p_to_c(proper: f64, z: f64) -> CosmologyResult<f64> {
    ensure_finite("proper distance", proper)?;
    let z = ensure_physical_redshift(z)?;
    Ok(proper * (1.0 + z))
}

/// Small-angle size in arcseconds of an object `size_kpc` across at
/// redshift `z`, given its luminosity distance in Mpc.
///
/// A zero luminosity distance (z = 0) has no finite angular size and is
/// rejected.
pub fn angular_size_from_luminosity(
    size_kpc: f64,
    z: f64,
    luminosity_distance: f64,
) -> CosmologyResult<f64> {
    ensure_finite("physical size", size_kpc)?;
    let z = ensure_physical_redshift(z)?;
    if !(luminosity_distance > 0.0) {
        return Err(CosmologyError::DomainError(format!(
            "angular size needs a positive luminosity distance, got {} Mpc at z = {}",
            luminosity_distance, z
        )));
    }
    let one_plus = 1.0 + z;
    Ok(180.0 / PI * 3600.0 * size_kpc * one_plus * one_plus / (1000.0 * luminosity_distance))
}
