//! Lightcone cosmology - redshift and distance conversions for 21 cm
//! simulations.
//!
//! The crate converts between redshift, comoving/proper/luminosity distance,
//! observed 21 cm frequency and angular size under a fixed ΛCDM-style
//! parameter set, and turns ionization/density fields into differential
//! brightness temperature.
//!
//! ```
//! use lightcone_cosmology::{Cosmology, CosmologyParams};
//!
//! let cosmo = Cosmology::new(CosmologyParams::flat_lcdm(0.7, 0.27, 0.044)).unwrap();
//! let d = cosmo.z_to_cdist(1.0_f64).unwrap();
//! let z = cosmo.cdist_to_z(d).unwrap();
//! assert!((z - 1.0).abs() < 1e-4);
//! ```

pub mod config;
pub mod core;
pub mod cosmology;
pub mod error;
pub mod numerics;
pub mod simulation;
pub mod temperature;

#[cfg(feature = "python")]
pub mod python;

pub use crate::config::CosmologyConfig;
pub use crate::core::{CosmologyParams, Elementwise, TableSpec};
pub use crate::cosmology::{reference, Cosmology, RedshiftTable};
pub use crate::error::{CosmologyError, CosmologyResult};
pub use crate::simulation::SimulationBox;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Lightcone cosmology - redshift/distance conversions for 21 cm work
#[cfg(feature = "python")]
#[pymodule]
fn lightcone_cosmology(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Distance and redshift conversions
    m.add_function(wrap_pyfunction!(python::z_to_cdist, m)?)?;
    m.add_function(wrap_pyfunction!(python::cdist_to_z, m)?)?;
    m.add_function(wrap_pyfunction!(python::luminosity_distance, m)?)?;
    m.add_function(wrap_pyfunction!(python::nu_to_z, m)?)?;
    m.add_function(wrap_pyfunction!(python::z_to_nu, m)?)?;
    m.add_function(wrap_pyfunction!(python::nu_to_cdist, m)?)?;
    m.add_function(wrap_pyfunction!(python::c_to_p, m)?)?;
    m.add_function(wrap_pyfunction!(python::p_to_c, m)?)?;
    m.add_function(wrap_pyfunction!(python::angular_size, m)?)?;

    // Brightness temperature
    m.add_function(wrap_pyfunction!(python::calc_dt, m)?)?;
    m.add_function(wrap_pyfunction!(python::calc_dt_lightcone, m)?)?;

    m.add_class::<python::PyCosmology>()?;

    Ok(())
}
