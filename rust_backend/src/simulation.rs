//! Simulation-box geometry used to place grid cells along the line of sight.

use serde::{Deserialize, Serialize};

use crate::cosmology::Cosmology;
use crate::error::{CosmologyError, CosmologyResult};
use crate::temperature::los_redshifts;

fn default_boxsize() -> f64 {
    100.0
}

fn default_grid_cells() -> usize {
    256
}

/// Cubic simulation volume of side `boxsize_cmpc` comoving Mpc split into
/// `grid_cells` cells per side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationBox {
    #[serde(default = "default_boxsize")]
    pub boxsize_cmpc: f64,
    #[serde(default = "default_grid_cells")]
    pub grid_cells: usize,
}

impl Default for SimulationBox {
    fn default() -> Self {
        Self {
            boxsize_cmpc: default_boxsize(),
            grid_cells: default_grid_cells(),
        }
    }
}

impl SimulationBox {
    pub fn new(boxsize_cmpc: f64, grid_cells: usize) -> CosmologyResult<Self> {
        let sim = Self {
            boxsize_cmpc,
            grid_cells,
        };
        sim.validate()?;
        Ok(sim)
    }

    pub fn validate(&self) -> CosmologyResult<()> {
        if !self.boxsize_cmpc.is_finite() || self.boxsize_cmpc <= 0.0 {
            return Err(CosmologyError::ConfigurationError(format!(
                "boxsize_cmpc must be positive, got {}",
                self.boxsize_cmpc
            )));
        }
        if self.grid_cells == 0 {
            return Err(CosmologyError::ConfigurationError(
                "grid_cells must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Comoving size of one cell in Mpc.
    pub fn cell_size_cmpc(&self) -> f64 {
        self.boxsize_cmpc / self.grid_cells as f64
    }

    /// Redshift of every cell along one box side, starting at `z_low`.
    pub fn redshifts_along_box(&self, cosmo: &Cosmology, z_low: f64) -> CosmologyResult<Vec<f64>> {
        self.validate()?;
        los_redshifts(cosmo, z_low, self.grid_cells, self.cell_size_cmpc())
    }

    /// Number of cells needed to span `z_low..=z_high` along the line of sight.
    pub fn cells_for_redshift_range(
        &self,
        cosmo: &Cosmology,
        z_low: f64,
        z_high: f64,
    ) -> CosmologyResult<usize> {
        self.validate()?;
        if z_high < z_low {
            return Err(CosmologyError::ValidationError(format!(
                "z_high ({}) is below z_low ({})",
                z_high, z_low
            )));
        }
        let span = cosmo.z_to_cdist(z_high)? - cosmo.z_to_cdist(z_low)?;
        Ok((span / self.cell_size_cmpc()).ceil() as usize + 1)
    }
}
