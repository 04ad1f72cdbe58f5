//! Python bindings for the cosmology engine.
//!
//! Exposes the distance/redshift conversions, the brightness-temperature
//! transform and a `Cosmology` class to Python via PyO3.
//!
//! # Modules
//!
//! - [`values`]: float-or-list arguments that keep their shape
//! - [`functions`]: module-level conversions on the reference cosmology
//! - [`engine`]: the `Cosmology` class for custom parameter sets
//!
//! # Python API
//!
//! ```python
//! import lightcone_cosmology as lc
//!
//! lc.nu_to_z(150.0)              # 8.469...
//! lc.z_to_cdist([6.0, 7.0, 8.0]) # list in, list out
//! lc.Cosmology(h=0.68, omega0=0.31).luminosity_distance(1.0, k=0.0)
//! ```

pub mod engine;
pub mod functions;
pub mod values;

pub use engine::PyCosmology;
pub use functions::*;
pub use values::FloatOrList;

use pyo3::exceptions::PyValueError;
use pyo3::PyErr;

use crate::error::CosmologyError;

impl From<CosmologyError> for PyErr {
    fn from(err: CosmologyError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}
