//! Module-level functions evaluated with the reference cosmology.

use pyo3::prelude::*;

use super::values::FloatOrList;
use crate::cosmology::reference;
use crate::temperature;

/// Comoving distance in Mpc for redshift(s) `z`.
#[pyfunction]
pub fn z_to_cdist(z: FloatOrList) -> PyResult<FloatOrList> {
    Ok(reference().z_to_cdist(z)?)
}

/// Redshift for comoving distance(s) in Mpc.
#[pyfunction]
pub fn cdist_to_z(dist: FloatOrList) -> PyResult<FloatOrList> {
    Ok(reference().cdist_to_z(dist)?)
}

/// Luminosity distance in Mpc for redshift(s) `z` and curvature constant `k`.
#[pyfunction]
#[pyo3(signature = (z, k = 0.0))]
pub fn luminosity_distance(z: FloatOrList, k: f64) -> PyResult<FloatOrList> {
    Ok(reference().luminosity_distance(z, k)?)
}

/// Redshift of 21 cm emission observed at `nu21` MHz.
#[pyfunction]
pub fn nu_to_z(nu21: FloatOrList) -> PyResult<FloatOrList> {
    Ok(reference().nu_to_z(nu21)?)
}

/// Observed 21 cm frequency in MHz for redshift(s) `z`.
#[pyfunction]
pub fn z_to_nu(z: FloatOrList) -> PyResult<FloatOrList> {
    Ok(reference().z_to_nu(z)?)
}

/// Comoving distance in Mpc for observed 21 cm frequency(ies) in MHz.
#[pyfunction]
pub fn nu_to_cdist(nu21: FloatOrList) -> PyResult<FloatOrList> {
    Ok(reference().nu_to_cdist(nu21)?)
}

#[pyfunction]
pub fn c_to_p(cdist: FloatOrList, z: f64) -> PyResult<FloatOrList> {
    Ok(reference().c_to_p(cdist, z)?)
}

#[pyfunction]
pub fn p_to_c(pdist: FloatOrList, z: f64) -> PyResult<FloatOrList> {
    Ok(reference().p_to_c(pdist, z)?)
}

/// Angular size in arcseconds of an object `size_kpc` across at redshift(s) `z`.
#[pyfunction]
pub fn angular_size(size_kpc: f64, z: FloatOrList) -> PyResult<FloatOrList> {
    Ok(reference().angular_size(size_kpc, z)?)
}

/// Differential brightness temperature (mK) of a flattened coeval box.
#[pyfunction]
pub fn calc_dt(xfrac: Vec<f64>, density: Vec<f64>, z: f64) -> PyResult<Vec<f64>> {
    Ok(temperature::calc_dt(reference().params(), &xfrac, &density, z)?)
}

/// Differential brightness temperature (mK) of a flattened lightcone whose
/// line-of-sight axis varies fastest.
#[pyfunction]
pub fn calc_dt_lightcone(
    xfrac: Vec<f64>,
    density: Vec<f64>,
    los_cells: usize,
    lowest_z: f64,
    cell_size: f64,
) -> PyResult<Vec<f64>> {
    Ok(temperature::calc_dt_lightcone(
        reference(),
        &xfrac,
        &density,
        los_cells,
        lowest_z,
        cell_size,
    )?)
}
