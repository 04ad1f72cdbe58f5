//! Cosmology configuration file support.
//!
//! This module reads a parameter set, table layout and simulation box from a
//! TOML file. Every section and key is optional; missing values fall back to
//! the reference cosmology.
//!
//! ```toml
//! [cosmology]
//! h = 0.7
//! omega0 = 0.27
//! omega_b = 0.044
//!
//! [table]
//! points = 200
//! z_max = 100.0
//!
//! [simulation]
//! boxsize_cmpc = 114.0
//! grid_cells = 256
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::core::params::{CosmologyParams, TableSpec};
use crate::cosmology::Cosmology;
use crate::error::{CosmologyError, CosmologyResult};
use crate::simulation::SimulationBox;

/// Cosmology configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CosmologyConfig {
    #[serde(default)]
    pub cosmology: CosmologySettings,
    #[serde(default)]
    pub table: TableSpec,
    #[serde(default)]
    pub simulation: SimulationBox,
}

/// Parameter-set settings.
///
/// `h0` defaults to `100·h`, `lambda` to `1 - omega0` and `q0` to
/// `omega0/2 - lambda`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CosmologySettings {
    #[serde(default)]
    pub h: Option<f64>,
    #[serde(default)]
    pub omega0: Option<f64>,
    #[serde(default)]
    pub omega_b: Option<f64>,
    #[serde(default)]
    pub lambda: Option<f64>,
    #[serde(default)]
    pub h0: Option<f64>,
    #[serde(default)]
    pub q0: Option<f64>,
    #[serde(default)]
    pub c: Option<f64>,
    #[serde(default)]
    pub nu0: Option<f64>,
    #[serde(default)]
    pub mean_dt: Option<f64>,
}

impl CosmologySettings {
    /// Resolves the settings into a validated parameter set.
    pub fn to_params(&self) -> CosmologyResult<CosmologyParams> {
        let reference = CosmologyParams::default();

        let h = self.h.unwrap_or(reference.h);
        let omega0 = self.omega0.unwrap_or(reference.omega0);
        let lambda = self.lambda.unwrap_or(1.0 - omega0);

        let params = CosmologyParams {
            omega0,
            omega_b: self.omega_b.unwrap_or(reference.omega_b),
            lambda,
            h,
            h0: self.h0.unwrap_or(100.0 * h),
            q0: self.q0.unwrap_or(0.5 * omega0 - lambda),
            c: self.c.unwrap_or(reference.c),
            nu0: self.nu0.unwrap_or(reference.nu0),
            mean_dt: self.mean_dt.unwrap_or(reference.mean_dt),
        };
        params.validate()?;
        Ok(params)
    }
}

impl CosmologyConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(CosmologyConfig)` if successful
    /// * `Err(CosmologyError::ConfigurationError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> CosmologyResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            CosmologyError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        debug!("Loading cosmology config from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    ///
    /// Parse errors name the offending key path (e.g. `table.points`).
    pub fn from_toml_str(content: &str) -> CosmologyResult<Self> {
        let deserializer = toml::Deserializer::new(content);
        serde_path_to_error::deserialize(deserializer).map_err(|e| {
            CosmologyError::ConfigurationError(format!(
                "Failed to parse config at '{}': {}",
                e.path(),
                e.inner()
            ))
        })
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `cosmology.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> CosmologyResult<Self> {
        let search_paths = vec![
            PathBuf::from("cosmology.toml"),
            PathBuf::from("rust_backend/cosmology.toml"),
            PathBuf::from("../cosmology.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(CosmologyError::ConfigurationError(
            "No cosmology.toml found in standard locations".to_string(),
        ))
    }

    /// Validates every section.
    pub fn validate(&self) -> CosmologyResult<()> {
        self.cosmology.to_params()?;
        self.table.validate()?;
        self.simulation.validate()
    }

    /// Builds an engine from the `[cosmology]` and `[table]` sections.
    pub fn build_cosmology(&self) -> CosmologyResult<Cosmology> {
        Cosmology::with_table_spec(self.cosmology.to_params()?, self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_reference() {
        let config = CosmologyConfig::from_toml_str("").unwrap();
        assert_eq!(config, CosmologyConfig::default());
        assert_eq!(
            config.cosmology.to_params().unwrap(),
            CosmologyParams::default()
        );
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[cosmology]
h = 0.68
omega0 = 0.31
omega_b = 0.049

[table]
points = 120
z_max = 40.0

[simulation]
boxsize_cmpc = 114.0
grid_cells = 128
"#;

        let config = CosmologyConfig::from_toml_str(toml).unwrap();
        let params = config.cosmology.to_params().unwrap();
        assert_eq!(params.h0, 68.0);
        assert!((params.lambda - 0.69).abs() < 1e-12);
        assert!((params.q0 - (0.155 - 0.69)).abs() < 1e-12);
        assert_eq!(config.table.points, 120);
        assert_eq!(config.simulation.grid_cells, 128);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_lambda_zero() {
        let toml = r#"
[cosmology]
omega0 = 1.0
lambda = 0.0
"#;
        let params = CosmologyConfig::from_toml_str(toml)
            .unwrap()
            .cosmology
            .to_params()
            .unwrap();
        assert_eq!(params.lambda, 0.0);
        assert_eq!(params.q0, 0.5);
    }

    #[test]
    fn test_parse_error_names_key() {
        let toml = r#"
[table]
points = "many"
"#;
        let err = CosmologyConfig::from_toml_str(toml).unwrap_err();
        match err {
            CosmologyError::ConfigurationError(msg) => assert!(msg.contains("table.points")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_values_rejected() {
        let toml = r#"
[cosmology]
h = -0.7
"#;
        let config = CosmologyConfig::from_toml_str(toml).unwrap();
        assert!(config.validate().is_err());
        assert!(config.build_cosmology().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nboxsize_cmpc = 64.0").unwrap();

        let config = CosmologyConfig::from_file(file.path()).unwrap();
        assert_eq!(config.simulation.boxsize_cmpc, 64.0);
        assert_eq!(config.table, TableSpec::default());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CosmologyConfig::from_file(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(CosmologyError::ConfigurationError(_))));
    }
}
