//! Cosmology conversion CLI
//!
//! Converts redshifts, 21 cm frequencies or comoving distances into every
//! related quantity and prints the result as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Redshifts
//! cargo run --bin cosmo-convert -- z 6.5 7.0 8.0
//!
//! # Observed 21 cm frequencies in MHz
//! cargo run --bin cosmo-convert -- nu 150 160
//!
//! # Comoving distances in Mpc
//! COSMOLOGY_CONFIG=my_cosmology.toml cargo run --bin cosmo-convert -- cdist 8800
//! ```
//!
//! # Environment Variables
//!
//! - `COSMOLOGY_CONFIG`: Path to a TOML config (default: search for `cosmology.toml`,
//!   falling back to the reference cosmology)
//! - `RUST_LOG`: Log level (default: warn)

use std::env;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use lightcone_cosmology::{Cosmology, CosmologyConfig};

#[derive(Debug, Serialize)]
struct ConversionRow {
    z: f64,
    nu_mhz: f64,
    comoving_mpc: f64,
    proper_mpc: f64,
    luminosity_mpc: f64,
    /// Angular size of 1 kpc; absent at z = 0.
    arcsec_per_kpc: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
enum Quantity {
    Redshift,
    Frequency,
    ComovingDistance,
}

impl Quantity {
    fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "z" | "redshift" => Ok(Quantity::Redshift),
            "nu" | "freq" | "frequency" => Ok(Quantity::Frequency),
            "cdist" | "comoving" => Ok(Quantity::ComovingDistance),
            other => bail!("Unknown quantity '{}'. Use 'z', 'nu' or 'cdist'", other),
        }
    }
}

fn load_config() -> Result<CosmologyConfig> {
    if let Ok(path) = env::var("COSMOLOGY_CONFIG") {
        return CosmologyConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path));
    }
    match CosmologyConfig::from_default_location() {
        Ok(config) => Ok(config),
        Err(e) => {
            info!("{}; using the reference cosmology", e);
            Ok(CosmologyConfig::default())
        }
    }
}

fn convert(cosmo: &Cosmology, quantity: Quantity, value: f64) -> Result<ConversionRow> {
    let z = match quantity {
        Quantity::Redshift => value,
        Quantity::Frequency => cosmo.nu_to_z(value)?,
        Quantity::ComovingDistance => cosmo.cdist_to_z(value)?,
    };

    let comoving_mpc = cosmo
        .z_to_cdist(z)
        .with_context(|| format!("Comoving distance at z = {}", z))?;

    Ok(ConversionRow {
        z,
        nu_mhz: cosmo.z_to_nu(z)?,
        comoving_mpc,
        proper_mpc: cosmo.c_to_p(comoving_mpc, z)?,
        luminosity_mpc: cosmo.luminosity_distance(z, 0.0)?,
        arcsec_per_kpc: cosmo.angular_size(1.0, z).ok(),
    })
}

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::WARN),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((quantity, values)) = args.split_first() else {
        bail!("Usage: cosmo-convert <z|nu|cdist> <value>...");
    };
    let quantity = Quantity::parse(quantity)?;
    if values.is_empty() {
        bail!("No values given");
    }

    let config = load_config()?;
    let cosmo = config
        .build_cosmology()
        .context("Invalid cosmology configuration")?;
    info!(
        "Using cosmology h={} omega0={} lambda={}",
        cosmo.params().h,
        cosmo.params().omega0,
        cosmo.params().lambda
    );

    let rows = values
        .iter()
        .map(|raw| {
            let value: f64 = raw
                .parse()
                .with_context(|| format!("'{}' is not a number", raw))?;
            convert(&cosmo, quantity, value)
        })
        .collect::<Result<Vec<_>>>()?;

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
