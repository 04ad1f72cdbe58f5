//! Process-wide cache of redshift tables, keyed by parameter fingerprint.

use std::collections::HashMap;
use std::sync::Arc;

use log::info;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use super::comoving::RedshiftTable;
use crate::core::params::{CosmologyParams, TableSpec};
use crate::error::CosmologyResult;

static TABLE_CACHE: Lazy<Mutex<HashMap<String, Arc<RedshiftTable>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn cache_key(params: &CosmologyParams, spec: TableSpec) -> CosmologyResult<String> {
    Ok(format!(
        "{}:{}:{:016x}",
        params.fingerprint()?,
        spec.points,
        spec.z_max.to_bits()
    ))
}

/// Returns the table for `(params, spec)`, integrating it on first request.
///
/// Engines built from equal parameter sets share one `Arc`'d table.
pub fn shared_table(params: &CosmologyParams, spec: TableSpec) -> CosmologyResult<Arc<RedshiftTable>> {
    let key = cache_key(params, spec)?;

    let mut cache = TABLE_CACHE.lock();
    if let Some(table) = cache.get(&key) {
        info!(
            "Reusing cached redshift table for params {}",
            &table.fingerprint()[..12]
        );
        return Ok(Arc::clone(table));
    }

    let table = Arc::new(RedshiftTable::build(params, spec)?);
    cache.insert(key, Arc::clone(&table));
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_params_share_table() {
        let params = CosmologyParams::flat_lcdm(0.68, 0.31, 0.049);
        let a = shared_table(&params, TableSpec::default()).unwrap();
        let b = shared_table(&params.clone(), TableSpec::default()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_different_spec_gets_own_table() {
        let params = CosmologyParams::flat_lcdm(0.68, 0.31, 0.049);
        let a = shared_table(&params, TableSpec::default()).unwrap();
        let b = shared_table(
            &params,
            TableSpec {
                points: 64,
                z_max: 30.0,
            },
        )
        .unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(b.len(), 64);
    }

    #[test]
    fn test_invalid_params_not_cached() {
        let params = CosmologyParams {
            h0: 0.0,
            ..CosmologyParams::default()
        };
        assert!(shared_table(&params, TableSpec::default()).is_err());
    }
}
