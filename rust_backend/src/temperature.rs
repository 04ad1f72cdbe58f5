//! Differential 21 cm brightness temperature, assuming `T_s >> T_CMB`.
//!
//! `ΔT = meanΔT/h · (1+z)²/E(z) · (1 - x_i) · ρ/ρ̄`, in mK.

use log::info;

use crate::core::params::CosmologyParams;
use crate::cosmology::Cosmology;
use crate::error::{ensure_finite, ensure_physical_redshift, CosmologyError, CosmologyResult};

/// Dimensionless Hubble rate `E(z) = sqrt(Ω₀(1+z)³ + Λ + (1-Ω₀-Λ)(1+z)²)`.
pub fn hubble_e(params: &CosmologyParams, z: f64) -> CosmologyResult<f64> {
    let z = ensure_physical_redshift(z)?;
    let one_plus = 1.0 + z;
    let e2 = params.omega0 * one_plus.powi(3)
        + params.lambda
        + (1.0 - params.omega0 - params.lambda) * one_plus * one_plus;
    if e2 <= 0.0 {
        return Err(CosmologyError::DomainError(format!(
            "E(z)^2 = {} is not positive at z = {}",
            e2, z
        )));
    }
    Ok(e2.sqrt())
}

/// Redshift-dependent prefactor `meanΔT/h · (1+z)²/E(z)` in mK.
pub fn dt_prefactor(params: &CosmologyParams, z: f64) -> CosmologyResult<f64> {
    let e = hubble_e(params, z)?;
    let one_plus = 1.0 + z;
    Ok(params.mean_dt / params.h * one_plus * one_plus / e)
}

fn check_fields(xfrac: &[f64], density: &[f64]) -> CosmologyResult<f64> {
    if xfrac.len() != density.len() {
        return Err(CosmologyError::ValidationError(format!(
            "ionized fraction has {} cells but density has {}",
            xfrac.len(),
            density.len()
        )));
    }
    if density.is_empty() {
        return Err(CosmologyError::ValidationError(
            "density field is empty".to_string(),
        ));
    }
    let mean = density.iter().sum::<f64>() / density.len() as f64;
    if !(mean > 0.0) || !mean.is_finite() {
        return Err(CosmologyError::ValidationError(format!(
            "mean density must be positive and finite, got {}",
            mean
        )));
    }
    Ok(mean)
}

/// Brightness temperature of a coeval box at redshift `z`.
///
/// `xfrac` and `density` are flat fields of equal length; the result has the
/// same length and cell order.
pub fn calc_dt(
    params: &CosmologyParams,
    xfrac: &[f64],
    density: &[f64],
    z: f64,
) -> CosmologyResult<Vec<f64>> {
    let rho_mean = check_fields(xfrac, density)?;
    info!("Calculating differential brightness temperature at z = {:.3}", z);

    let prefactor = dt_prefactor(params, z)?;
    Ok(xfrac
        .iter()
        .zip(density)
        .map(|(xi, rho)| prefactor * (1.0 - xi) * rho / rho_mean)
        .collect())
}

/// Redshift of each line-of-sight cell, starting at `lowest_z`.
///
/// Cell `i` sits at comoving distance `D_c(lowest_z) + i·cell_size`.
pub fn los_redshifts(
    cosmo: &Cosmology,
    lowest_z: f64,
    cells: usize,
    cell_size: f64,
) -> CosmologyResult<Vec<f64>> {
    ensure_finite("cell size", cell_size)?;
    if cell_size <= 0.0 {
        return Err(CosmologyError::ValidationError(format!(
            "cell size must be positive, got {} Mpc",
            cell_size
        )));
    }
    let low_cdist = cosmo.z_to_cdist(lowest_z)?;
    let distances: Vec<f64> = (0..cells)
        .map(|i| low_cdist + i as f64 * cell_size)
        .collect();
    cosmo.cdist_to_z(distances)
}

/// Brightness temperature of a lightcone.
///
/// Fields are stored with the line-of-sight axis varying fastest, so cell `i`
/// lies in slice `i % los_cells`. The mean density is taken over the whole
/// lightcone.
pub fn calc_dt_lightcone(
    cosmo: &Cosmology,
    xfrac: &[f64],
    density: &[f64],
    los_cells: usize,
    lowest_z: f64,
    cell_size: f64,
) -> CosmologyResult<Vec<f64>> {
    let rho_mean = check_fields(xfrac, density)?;
    if los_cells == 0 || xfrac.len() % los_cells != 0 {
        return Err(CosmologyError::ValidationError(format!(
            "{} cells do not split into slices of {} along the line of sight",
            xfrac.len(),
            los_cells
        )));
    }

    let redshifts = los_redshifts(cosmo, lowest_z, los_cells, cell_size)?;
    info!(
        "Calculating differential brightness temperature for lightcone, z = {:.3}..{:.3}",
        redshifts[0],
        redshifts[los_cells - 1]
    );

    let prefactors = redshifts
        .iter()
        .map(|&z| dt_prefactor(cosmo.params(), z))
        .collect::<CosmologyResult<Vec<f64>>>()?;

    Ok(xfrac
        .iter()
        .zip(density)
        .enumerate()
        .map(|(i, (xi, rho))| prefactors[i % los_cells] * (1.0 - xi) * rho / rho_mean)
        .collect())
}
