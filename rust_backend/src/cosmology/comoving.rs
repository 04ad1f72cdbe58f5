//! Comoving distance: the forward Friedmann integral and its tabulated inverse.

use log::debug;

use crate::core::params::{CosmologyParams, TableSpec};
use crate::error::{ensure_finite, CosmologyError, CosmologyResult};
use crate::numerics::quadrature::integrate_value;
use crate::numerics::spline::{Boundary, CubicSpline};

/// `1 / sqrt(Ω₀(1+x)³ + Λ)`, the comoving-distance integrand.
pub(crate) fn inverse_expansion_rate(params: &CosmologyParams, x: f64) -> f64 {
    let one_plus = 1.0 + x;
    1.0 / (params.omega0 * one_plus * one_plus * one_plus + params.lambda).sqrt()
}

/// Comoving distance in Mpc to redshift `z`:
/// `c/H₀ · ∫₀^z dx / sqrt(Ω₀(1+x)³ + Λ)`.
///
/// # Returns
/// * `Err(CosmologyError::ValidationError)` for negative or non-finite `z`
pub fn comoving_distance(params: &CosmologyParams, z: f64) -> CosmologyResult<f64> {
    ensure_finite("redshift", z)?;
    if z < 0.0 {
        return Err(CosmologyError::ValidationError(format!(
            "comoving distance needs a non-negative redshift, got {}",
            z
        )));
    }
    let integral = integrate_value(|x| inverse_expansion_rate(params, x), 0.0, z)?;
    Ok(params.hubble_distance() * integral)
}

/// Precomputed `(z, D_c)` pairs with a spline for the inverse mapping.
///
/// The spline interpolates `z` as a function of `D_c` with clamped ends; the
/// end slopes are the exact `dz/dD_c = sqrt(Ω₀(1+z)³ + Λ) / (c/H₀)`.
#[derive(Debug, Clone)]
pub struct RedshiftTable {
    redshifts: Vec<f64>,
    distances: Vec<f64>,
    spline: CubicSpline,
    fingerprint: String,
}

impl RedshiftTable {
    /// Integrates the comoving distance to every node of `spec`.
    ///
    /// Distances are accumulated node to node, so each integral only spans
    /// one table step.
    pub fn build(params: &CosmologyParams, spec: TableSpec) -> CosmologyResult<Self> {
        params.validate()?;
        spec.validate()?;

        let redshifts = spec.redshift_nodes();
        let hubble_distance = params.hubble_distance();

        let mut distances = Vec::with_capacity(redshifts.len());
        let mut running = 0.0;
        distances.push(running);
        for pair in redshifts.windows(2) {
            let step = integrate_value(|x| inverse_expansion_rate(params, x), pair[0], pair[1])?;
            running += hubble_distance * step;
            distances.push(running);
        }

        let slope = |z: f64| 1.0 / (hubble_distance * inverse_expansion_rate(params, z));
        let boundary = Boundary::Clamped {
            start_slope: slope(redshifts[0]),
            end_slope: slope(spec.z_max),
        };
        let spline = CubicSpline::new(distances.clone(), redshifts.clone(), boundary)?;
        let fingerprint = params.fingerprint()?;

        debug!(
            "Built redshift table: {} points, z in [0, {}], D_c in [0, {:.2}] Mpc (params {})",
            redshifts.len(),
            spec.z_max,
            running,
            &fingerprint[..12]
        );

        Ok(Self {
            redshifts,
            distances,
            spline,
            fingerprint,
        })
    }

    pub fn redshifts(&self) -> &[f64] {
        &self.redshifts
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn len(&self) -> usize {
        self.redshifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.redshifts.is_empty()
    }

    /// Fingerprint of the parameter set the table was integrated under.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Comoving distances (Mpc) the inverse lookup accepts.
    pub fn distance_range(&self) -> (f64, f64) {
        self.spline.domain()
    }

    /// Redshift at comoving distance `distance` (Mpc).
    ///
    /// # Returns
    /// * `Err(CosmologyError::DomainError)` outside [`Self::distance_range`]
    pub fn redshift_at(&self, distance: f64) -> CosmologyResult<f64> {
        ensure_finite("comoving distance", distance)?;
        self.spline.evaluate(distance).map_err(|_| {
            let (lo, hi) = self.distance_range();
            let z_max = self.redshifts[self.redshifts.len() - 1];
            CosmologyError::DomainError(format!(
                "comoving distance {} Mpc is outside the table range [{}, {:.4}] Mpc (0 <= z <= {})",
                distance, lo, hi, z_max
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_redshift_is_zero_distance() {
        let params = CosmologyParams::default();
        assert_eq!(comoving_distance(&params, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_reference_value_at_z1() {
        // Reference cosmology places z = 1 at ~3367.13 comoving Mpc.
        let params = CosmologyParams::default();
        let d = comoving_distance(&params, 1.0).unwrap();
        assert_relative_eq!(d, 3367.128, max_relative = 1e-5);
    }

    #[test]
    fn test_einstein_de_sitter_closed_form() {
        // Ω₀ = 1, Λ = 0: D_c = 2c/H₀ (1 - 1/sqrt(1+z))
        let params = CosmologyParams::matter_only(0.7, 1.0);
        for z in [0.5, 2.0, 10.0] {
            let expected = 2.0 * params.hubble_distance() * (1.0 - 1.0 / (1.0 + z as f64).sqrt());
            assert_relative_eq!(comoving_distance(&params, z).unwrap(), expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_negative_redshift_rejected() {
        let params = CosmologyParams::default();
        assert!(matches!(
            comoving_distance(&params, -0.1),
            Err(CosmologyError::ValidationError(_))
        ));
        assert!(comoving_distance(&params, f64::NAN).is_err());
    }

    #[test]
    fn test_table_matches_direct_integration() {
        let params = CosmologyParams::default();
        let table = RedshiftTable::build(&params, TableSpec::default()).unwrap();
        assert_eq!(table.len(), 200);
        assert_eq!(table.distances()[0], 0.0);

        for i in [1, 57, 120, 199] {
            let z = table.redshifts()[i];
            assert_relative_eq!(
                table.distances()[i],
                comoving_distance(&params, z).unwrap(),
                max_relative = 1e-8
            );
        }
    }

    #[test]
    fn test_table_lookup_hits_nodes() {
        let params = CosmologyParams::default();
        let table = RedshiftTable::build(&params, TableSpec::default()).unwrap();
        for i in [0, 10, 100, 199] {
            let z = table.redshift_at(table.distances()[i]).unwrap();
            assert!((z - table.redshifts()[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_table_refuses_extrapolation() {
        let params = CosmologyParams::default();
        let table = RedshiftTable::build(&params, TableSpec::default()).unwrap();
        let (_, hi) = table.distance_range();
        assert!(matches!(
            table.redshift_at(hi + 1.0),
            Err(CosmologyError::DomainError(_))
        ));
        assert!(matches!(
            table.redshift_at(-1.0),
            Err(CosmologyError::DomainError(_))
        ));
    }

    #[test]
    fn test_small_table_is_still_accurate() {
        let params = CosmologyParams::default();
        let spec = TableSpec {
            points: 40,
            z_max: 20.0,
        };
        let table = RedshiftTable::build(&params, spec).unwrap();
        let d = comoving_distance(&params, 7.0).unwrap();
        assert_relative_eq!(table.redshift_at(d).unwrap(), 7.0, max_relative = 1e-3);
    }
}
