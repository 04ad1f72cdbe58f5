//! Cosmological parameter sets and interpolation-table settings.
//!
//! A [`CosmologyParams`] value is the single source of truth for every
//! distance/redshift computation in the crate. It is an ordinary value: build
//! one, validate it, hand it to a [`Cosmology`](crate::cosmology::Cosmology)
//! engine. Nothing in the crate mutates a parameter set after construction.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{CosmologyError, CosmologyResult};

/// Upper redshift the comoving integrand is checked against in [`CosmologyParams::validate`].
const VALIDATION_Z_MAX: f64 = 100.0;

/// Cosmological constants shared by all distance/redshift conversions.
///
/// # Fields
///
/// * `omega0` - Present-day matter density parameter Ω₀
/// * `omega_b` - Present-day baryon density parameter Ω_b
/// * `lambda` - Cosmological-constant density parameter Λ
/// * `h` - Dimensionless Hubble parameter
/// * `h0` - Hubble constant in km/s/Mpc
/// * `q0` - Deceleration parameter
/// * `c` - Speed of light in km/s
/// * `nu0` - Rest frequency of the 21 cm line in MHz
/// * `mean_dt` - Mean differential brightness temperature constant in mK
///
/// # Examples
///
/// ```
/// use lightcone_cosmology::core::params::CosmologyParams;
///
/// let params = CosmologyParams::default();
/// assert!(params.validate().is_ok());
/// assert_eq!(params.h0, 70.0);
/// assert!((params.lambda - 0.73).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmologyParams {
    pub omega0: f64,
    #[serde(default = "default_omega_b")]
    pub omega_b: f64,
    pub lambda: f64,
    pub h: f64,
    pub h0: f64,
    pub q0: f64,
    #[serde(default = "default_speed_of_light")]
    pub c: f64,
    #[serde(default = "default_nu0")]
    pub nu0: f64,
    #[serde(default = "default_mean_dt")]
    pub mean_dt: f64,
}

fn default_omega_b() -> f64 {
    0.044
}

fn default_speed_of_light() -> f64 {
    3.0e5
}

fn default_nu0() -> f64 {
    1420.4
}

fn default_mean_dt() -> f64 {
    2.9 * 0.043 / 0.04
}

impl Default for CosmologyParams {
    /// WMAP-era flat ΛCDM: h = 0.7, Ω₀ = 0.27, Λ = 0.73.
    fn default() -> Self {
        Self::flat_lcdm(0.7, 0.27, default_omega_b())
    }
}

impl CosmologyParams {
    /// Flat ΛCDM cosmology: Λ = 1 − Ω₀, q₀ = Ω₀/2 − Λ, H₀ = 100h.
    ///
    /// # Examples
    ///
    /// ```
    /// use lightcone_cosmology::core::params::CosmologyParams;
    ///
    /// let params = CosmologyParams::flat_lcdm(0.7, 0.3, 0.045);
    /// assert!((params.lambda - 0.7).abs() < 1e-12);
    /// assert!((params.q0 - (0.15 - 0.7)).abs() < 1e-12);
    /// ```
    pub fn flat_lcdm(h: f64, omega0: f64, omega_b: f64) -> Self {
        let lambda = 1.0 - omega0;
        Self {
            omega0,
            omega_b,
            lambda,
            h,
            h0: 100.0 * h,
            q0: 0.5 * omega0 - lambda,
            c: default_speed_of_light(),
            nu0: default_nu0(),
            mean_dt: default_mean_dt(),
        }
    }

    /// Matter-only (Λ = 0) cosmology with q₀ = Ω₀/2. Open when Ω₀ < 1.
    pub fn matter_only(h: f64, omega0: f64) -> Self {
        Self {
            omega0,
            omega_b: default_omega_b(),
            lambda: 0.0,
            h,
            h0: 100.0 * h,
            q0: 0.5 * omega0,
            c: default_speed_of_light(),
            nu0: default_nu0(),
            mean_dt: default_mean_dt(),
        }
    }

    /// Hubble distance c/H₀ in Mpc.
    pub fn hubble_distance(&self) -> f64 {
        self.c / self.h0
    }

    /// Curvature density parameter 1 − Ω₀ − Λ.
    pub fn omega_k(&self) -> f64 {
        1.0 - self.omega0 - self.lambda
    }

    /// Checks that the parameter set can drive the distance integrals.
    ///
    /// # Returns
    /// * `Ok(())` if every constant is finite and in range
    /// * `Err(CosmologyError::ConfigurationError)` naming the first bad field
    pub fn validate(&self) -> CosmologyResult<()> {
        let fields = [
            ("omega0", self.omega0),
            ("omega_b", self.omega_b),
            ("lambda", self.lambda),
            ("h", self.h),
            ("h0", self.h0),
            ("q0", self.q0),
            ("c", self.c),
            ("nu0", self.nu0),
            ("mean_dt", self.mean_dt),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(CosmologyError::ConfigurationError(format!(
                    "'{}' must be finite, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [("h", self.h), ("h0", self.h0), ("c", self.c), ("nu0", self.nu0)] {
            if value <= 0.0 {
                return Err(CosmologyError::ConfigurationError(format!(
                    "'{}' must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.omega0 < 0.0 {
            return Err(CosmologyError::ConfigurationError(format!(
                "'omega0' must be non-negative, got {}",
                self.omega0
            )));
        }

        // Ω₀(1+x)³ + Λ is monotone in x for Ω₀ >= 0, so the endpoints bound it.
        let low = self.omega0 + self.lambda;
        let high = self.omega0 * (1.0 + VALIDATION_Z_MAX).powi(3) + self.lambda;
        if low <= 0.0 || high <= 0.0 {
            return Err(CosmologyError::ConfigurationError(format!(
                "Omega0 = {} and lambda = {} give a non-positive expansion rate",
                self.omega0, self.lambda
            )));
        }

        Ok(())
    }

    /// SHA-256 of the canonical JSON form of this parameter set.
    ///
    /// Two parameter sets share a fingerprint exactly when every field is
    /// bit-for-bit equal.
    pub fn fingerprint(&self) -> CosmologyResult<String> {
        let canonical = serde_json::to_string(self).map_err(|e| {
            CosmologyError::InternalError(format!("Failed to serialize parameters: {}", e))
        })?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

/// Shape of the redshift/comoving-distance interpolation table.
///
/// Nodes are spaced logarithmically in `1 + z` over `[1, 1 + z_max]`, so the
/// table covers `0 <= z <= z_max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    #[serde(default = "default_points")]
    pub points: usize,
    #[serde(default = "default_z_max")]
    pub z_max: f64,
}

fn default_points() -> usize {
    200
}

fn default_z_max() -> f64 {
    100.0
}

impl Default for TableSpec {
    fn default() -> Self {
        Self {
            points: default_points(),
            z_max: default_z_max(),
        }
    }
}

impl TableSpec {
    pub fn validate(&self) -> CosmologyResult<()> {
        if self.points < 4 {
            return Err(CosmologyError::ConfigurationError(format!(
                "interpolation table needs at least 4 points, got {}",
                self.points
            )));
        }
        if !self.z_max.is_finite() || self.z_max <= 0.0 {
            return Err(CosmologyError::ConfigurationError(format!(
                "table z_max must be a positive finite redshift, got {}",
                self.z_max
            )));
        }
        Ok(())
    }

    /// Redshift nodes, strictly increasing, first node exactly 0.
    pub fn redshift_nodes(&self) -> Vec<f64> {
        let log_max = (1.0 + self.z_max).log10();
        let last = (self.points - 1) as f64;
        (0..self.points)
            .map(|i| {
                if i == self.points - 1 {
                    self.z_max
                } else {
                    10f64.powf(log_max * i as f64 / last) - 1.0
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_cosmology() {
        let params = CosmologyParams::default();
        assert_eq!(params.h, 0.7);
        assert_eq!(params.omega0, 0.27);
        assert!((params.q0 - (-0.595)).abs() < 1e-12);
        assert_eq!(params.c, 3.0e5);
        assert_eq!(params.nu0, 1420.4);
        assert!((params.mean_dt - 3.1175).abs() < 1e-12);
        assert!(params.omega_k().abs() < 1e-12);
    }

    #[test]
    fn test_hubble_distance() {
        let params = CosmologyParams::default();
        assert!((params.hubble_distance() - 3.0e5 / 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_negative_hubble() {
        let params = CosmologyParams {
            h0: -70.0,
            ..CosmologyParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(CosmologyError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let params = CosmologyParams {
            omega0: f64::NAN,
            ..CosmologyParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_collapsing_universe() {
        let params = CosmologyParams {
            omega0: 0.1,
            lambda: -0.5,
            ..CosmologyParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_matter_only_is_valid() {
        let params = CosmologyParams::matter_only(0.7, 1.0);
        assert!(params.validate().is_ok());
        assert_eq!(params.lambda, 0.0);
        assert_eq!(params.q0, 0.5);
    }

    #[test]
    fn test_fingerprint_stable_and_distinct() {
        let a = CosmologyParams::default();
        let b = CosmologyParams::default();
        let c = CosmologyParams::flat_lcdm(0.7, 0.3, 0.044);
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        assert_ne!(a.fingerprint().unwrap(), c.fingerprint().unwrap());
        assert_eq!(a.fingerprint().unwrap().len(), 64);
    }

    #[test]
    fn test_table_nodes_span_zero_to_zmax() {
        let spec = TableSpec::default();
        let nodes = spec.redshift_nodes();
        assert_eq!(nodes.len(), 200);
        assert_eq!(nodes[0], 0.0);
        assert_eq!(nodes[199], 100.0);
        assert!(nodes.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_table_spec_validation() {
        assert!(TableSpec { points: 3, z_max: 10.0 }.validate().is_err());
        assert!(TableSpec { points: 50, z_max: 0.0 }.validate().is_err());
        assert!(TableSpec { points: 50, z_max: 10.0 }.validate().is_ok());
    }
}
