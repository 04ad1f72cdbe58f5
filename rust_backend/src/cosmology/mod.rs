//! Redshift–distance engine.
//!
//! [`Cosmology`] binds a validated [`CosmologyParams`] to the conversions of
//! this crate: comoving distance and its inverse, luminosity distance, 21 cm
//! frequency, proper distance and angular size. Every method accepts a scalar
//! or a batch through [`Elementwise`] and returns the same shape.
//!
//! # Examples
//!
//! ```
//! use lightcone_cosmology::cosmology::Cosmology;
//!
//! let cosmo = Cosmology::default();
//! let z = cosmo.nu_to_z(150.0_f64).unwrap();
//! assert!((z - 8.4693).abs() < 1e-3);
//!
//! let distances = cosmo.z_to_cdist(vec![0.5_f64, 1.0, 2.0]).unwrap();
//! assert_eq!(distances.len(), 3);
//!
//! let back = cosmo.cdist_to_z(distances).unwrap();
//! assert!((back[1] - 1.0).abs() < 1e-3);
//! ```

pub mod cache;
pub mod comoving;
pub mod conversions;
pub mod luminosity;

use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use qtty::{Arcseconds, Kiloparsecs, Megaparsecs};

use crate::core::elementwise::Elementwise;
use crate::core::params::{CosmologyParams, TableSpec};
use crate::error::CosmologyResult;

pub use comoving::RedshiftTable;

static REFERENCE: Lazy<Cosmology> =
    Lazy::new(|| Cosmology::unchecked(CosmologyParams::default(), TableSpec::default()));

/// Engine for the reference (default) parameter set.
pub fn reference() -> &'static Cosmology {
    &REFERENCE
}

/// Distance/redshift conversions for one parameter set.
///
/// The interpolation table behind [`Cosmology::cdist_to_z`] is fetched from
/// the shared cache on first use, so engines with equal parameters never
/// integrate it twice.
#[derive(Debug)]
pub struct Cosmology {
    params: CosmologyParams,
    table_spec: TableSpec,
    table: OnceCell<Arc<RedshiftTable>>,
}

impl Default for Cosmology {
    fn default() -> Self {
        Self::unchecked(CosmologyParams::default(), TableSpec::default())
    }
}

impl Clone for Cosmology {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
            table_spec: self.table_spec,
            table: self.table.clone(),
        }
    }
}

impl Cosmology {
    /// Validates `params` and builds an engine with the default table layout.
    pub fn new(params: CosmologyParams) -> CosmologyResult<Self> {
        Self::with_table_spec(params, TableSpec::default())
    }

    /// Validates `params` and `table_spec` and builds an engine.
    pub fn with_table_spec(params: CosmologyParams, table_spec: TableSpec) -> CosmologyResult<Self> {
        params.validate()?;
        table_spec.validate()?;
        Ok(Self::unchecked(params, table_spec))
    }

    fn unchecked(params: CosmologyParams, table_spec: TableSpec) -> Self {
        Self {
            params,
            table_spec,
            table: OnceCell::new(),
        }
    }

    pub fn params(&self) -> &CosmologyParams {
        &self.params
    }

    pub fn table_spec(&self) -> TableSpec {
        self.table_spec
    }

    /// The interpolation table, built or fetched from the cache on first call.
    pub fn table(&self) -> CosmologyResult<&RedshiftTable> {
        self.table_handle().map(|table| table.as_ref())
    }

    /// Shared handle to the interpolation table.
    pub fn table_handle(&self) -> CosmologyResult<&Arc<RedshiftTable>> {
        self.table
            .get_or_try_init(|| cache::shared_table(&self.params, self.table_spec))
    }

    /// Comoving distance (Mpc) for each redshift.
    pub fn z_to_cdist<V: Elementwise>(&self, z: V) -> CosmologyResult<V::Output> {
        z.try_map_values(|value| comoving::comoving_distance(&self.params, value))
    }

    /// Redshift for each comoving distance (Mpc), interpolated from the table.
    ///
    /// Distances outside the table's range fail with a domain error.
    pub fn cdist_to_z<V: Elementwise>(&self, distance: V) -> CosmologyResult<V::Output> {
        let table = self.table()?;
        distance.try_map_values(|value| table.redshift_at(value))
    }

    /// Luminosity distance (Mpc) for each redshift with curvature constant `k`.
    pub fn luminosity_distance<V: Elementwise>(&self, z: V, k: f64) -> CosmologyResult<V::Output> {
        z.try_map_values(|value| luminosity::luminosity_distance(&self.params, value, k))
    }

    /// Redshift for each observed 21 cm frequency (MHz).
    pub fn nu_to_z<V: Elementwise>(&self, nu: V) -> CosmologyResult<V::Output> {
        nu.try_map_values(|value| conversions::nu_to_z(&self.params, value))
    }

    /// Observed 21 cm frequency (MHz) for each redshift.
    pub fn z_to_nu<V: Elementwise>(&self, z: V) -> CosmologyResult<V::Output> {
        z.try_map_values(|value| conversions::z_to_nu(&self.params, value))
    }

    /// Comoving distance (Mpc) for each observed 21 cm frequency (MHz).
    pub fn nu_to_cdist<V: Elementwise>(&self, nu: V) -> CosmologyResult<V::Output> {
        nu.try_map_values(|value| {
            let z = conversions::nu_to_z(&self.params, value)?;
            comoving::comoving_distance(&self.params, z)
        })
    }

    /// Proper distance for each comoving distance at redshift `z`.
    pub fn c_to_p<V: Elementwise>(&self, comoving: V, z: f64) -> CosmologyResult<V::Output> {
        comoving.try_map_values(|value| conversions::c_to_p(value, z))
    }

    /// Comoving distance for each proper distance at redshift `z`.
    pub fn p_to_c<V: Elementwise>(&self, proper: V, z: f64) -> CosmologyResult<V::Output> {
        proper.try_map_values(|value| conversions::p_to_c(value, z))
    }

    /// Angular size (arcsec) of an object `size_kpc` across, for each redshift.
    ///
    /// Fails at z = 0, where the luminosity distance vanishes.
    pub fn angular_size<V: Elementwise>(&self, size_kpc: f64, z: V) -> CosmologyResult<V::Output> {
        z.try_map_values(|value| {
            let dl = luminosity::luminosity_distance(&self.params, value, 0.0)?;
            conversions::angular_size_from_luminosity(size_kpc, value, dl)
        })
    }

    /// Typed comoving distance.
    pub fn comoving_distance_mpc(&self, z: f64) -> CosmologyResult<Megaparsecs> {
        self.z_to_cdist(z).map(Megaparsecs::new)
    }

    /// Typed luminosity distance.
    pub fn luminosity_distance_mpc(&self, z: f64, k: f64) -> CosmologyResult<Megaparsecs> {
        self.luminosity_distance(z, k).map(Megaparsecs::new)
    }

    /// Typed angular size.
    pub fn angular_size_of(&self, size: Kiloparsecs, z: f64) -> CosmologyResult<Arcseconds> {
        self.angular_size(size.value(), z).map(Arcseconds::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CosmologyError;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_validates() {
        let bad = CosmologyParams {
            c: -1.0,
            ..CosmologyParams::default()
        };
        assert!(Cosmology::new(bad).is_err());
        assert!(Cosmology::with_table_spec(
            CosmologyParams::default(),
            TableSpec {
                points: 2,
                z_max: 10.0
            }
        )
        .is_err());
    }

    #[test]
    fn test_scalar_and_batch_agree() {
        let cosmo = Cosmology::default();
        let batch = cosmo.z_to_cdist(vec![0.5_f64, 3.0]).unwrap();
        assert_eq!(batch[0], cosmo.z_to_cdist(0.5_f64).unwrap());
        assert_eq!(batch[1], cosmo.z_to_cdist(3.0_f64).unwrap());

        let array: [f64; 2] = [0.5, 3.0];
        let arr_out = cosmo.luminosity_distance(array, 0.0).unwrap();
        assert_eq!(arr_out.len(), 2);
    }

    #[test]
    fn test_inverse_of_small_distances() {
        let cosmo = Cosmology::default();
        let z = cosmo.cdist_to_z(vec![0.0_f64, 100.0, 500.0]).unwrap();
        assert_eq!(z.len(), 3);
        assert_eq!(z[0], 0.0);
        assert!(z[0] < z[1] && z[1] < z[2]);
    }

    #[test]
    fn test_inverse_out_of_range() {
        let cosmo = Cosmology::default();
        let err = cosmo.cdist_to_z(1.0e5_f64).unwrap_err();
        assert!(matches!(err, CosmologyError::DomainError(_)));
        assert!(cosmo.cdist_to_z(vec![100.0_f64, -5.0]).is_err());
    }

    #[test]
    fn test_nu_to_cdist_composes() {
        let cosmo = Cosmology::default();
        let via_z = cosmo.z_to_cdist(cosmo.nu_to_z(150.0_f64).unwrap()).unwrap();
        assert_eq!(cosmo.nu_to_cdist(150.0_f64).unwrap(), via_z);
    }

    #[test]
    fn test_angular_size_rejects_zero_redshift() {
        let cosmo = Cosmology::default();
        assert!(cosmo.angular_size(10.0, 0.0_f64).is_err());
        let sizes = cosmo.angular_size(10.0, vec![1.0_f64, 2.0]).unwrap();
        assert!(sizes.iter().all(|s| *s > 0.0));
    }

    #[test]
    fn test_typed_helpers() {
        let cosmo = Cosmology::default();
        let d = cosmo.comoving_distance_mpc(1.0).unwrap();
        assert_relative_eq!(d.value(), 3367.128, max_relative = 1e-5);

        let theta = cosmo.angular_size_of(Kiloparsecs::new(5.0), 1.0).unwrap();
        assert_relative_eq!(theta.value(), cosmo.angular_size(5.0, 1.0_f64).unwrap());
    }

    #[test]
    fn test_engines_share_cached_table() {
        let params = CosmologyParams::flat_lcdm(0.72, 0.26, 0.045);
        let a = Cosmology::new(params.clone()).unwrap();
        let b = Cosmology::new(params).unwrap();
        assert!(Arc::ptr_eq(a.table_handle().unwrap(), b.table_handle().unwrap()));
    }

    #[test]
    fn test_reference_is_default() {
        assert_eq!(reference().params(), &CosmologyParams::default());
    }
}
