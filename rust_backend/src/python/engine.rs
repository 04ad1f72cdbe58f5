use pyo3::prelude::*;

use super::values::FloatOrList;
use crate::core::params::CosmologyParams;
use crate::cosmology::Cosmology;
use crate::temperature;

/// Conversions for a custom parameter set.
///
/// Omitting `lambda_` gives a flat universe (`Λ = 1 - Ω₀`).
#[pyclass(name = "Cosmology", frozen)]
pub struct PyCosmology {
    inner: Cosmology,
}

#[pymethods]
impl PyCosmology {
    #[new]
    #[pyo3(signature = (h = 0.7, omega0 = 0.27, omega_b = 0.044, lambda_ = None))]
    fn new(h: f64, omega0: f64, omega_b: f64, lambda_: Option<f64>) -> PyResult<Self> {
        let mut params = CosmologyParams::flat_lcdm(h, omega0, omega_b);
        if let Some(lambda) = lambda_ {
            params.lambda = lambda;
            params.q0 = 0.5 * omega0 - lambda;
        }
        Ok(Self {
            inner: Cosmology::new(params)?,
        })
    }

    #[getter]
    fn h(&self) -> f64 {
        self.inner.params().h
    }

    #[getter]
    fn omega0(&self) -> f64 {
        self.inner.params().omega0
    }

    #[getter]
    fn lambda_(&self) -> f64 {
        self.inner.params().lambda
    }

    #[getter]
    fn fingerprint(&self) -> PyResult<String> {
        Ok(self.inner.params().fingerprint()?)
    }

    fn z_to_cdist(&self, z: FloatOrList) -> PyResult<FloatOrList> {
        Ok(self.inner.z_to_cdist(z)?)
    }

    fn cdist_to_z(&self, dist: FloatOrList) -> PyResult<FloatOrList> {
        Ok(self.inner.cdist_to_z(dist)?)
    }

    #[pyo3(signature = (z, k = 0.0))]
    fn luminosity_distance(&self, z: FloatOrList, k: f64) -> PyResult<FloatOrList> {
        Ok(self.inner.luminosity_distance(z, k)?)
    }

    fn nu_to_z(&self, nu21: FloatOrList) -> PyResult<FloatOrList> {
        Ok(self.inner.nu_to_z(nu21)?)
    }

    fn z_to_nu(&self, z: FloatOrList) -> PyResult<FloatOrList> {
        Ok(self.inner.z_to_nu(z)?)
    }

    fn nu_to_cdist(&self, nu21: FloatOrList) -> PyResult<FloatOrList> {
        Ok(self.inner.nu_to_cdist(nu21)?)
    }

    fn c_to_p(&self, cdist: FloatOrList, z: f64) -> PyResult<FloatOrList> {
        Ok(self.inner.c_to_p(cdist, z)?)
    }

    fn p_to_c(&self, pdist: FloatOrList, z: f64) -> PyResult<FloatOrList> {
        Ok(self.inner.p_to_c(pdist, z)?)
    }

    fn angular_size(&self, size_kpc: f64, z: FloatOrList) -> PyResult<FloatOrList> {
        Ok(self.inner.angular_size(size_kpc, z)?)
    }

    fn calc_dt(&self, xfrac: Vec<f64>, density: Vec<f64>, z: f64) -> PyResult<Vec<f64>> {
        Ok(temperature::calc_dt(self.inner.params(), &xfrac, &density, z)?)
    }

    fn __repr__(&self) -> String {
        let p = self.inner.params();
        format!(
            "Cosmology(h={}, omega0={}, omega_b={}, lambda_={})",
            p.h, p.omega0, p.omega_b, p.lambda
        )
    }
}
