//! Error types for cosmology operations.

/// Result type for cosmology operations
pub type CosmologyResult<T> = Result<T, CosmologyError>;

/// Error type for cosmology operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CosmologyError {
    /// A value lies outside the range an operation is defined on
    /// (e.g. a comoving distance beyond the interpolation table).
    #[error("Domain error: {0}")]
    DomainError(String),

    /// An input is not physical (z <= -1, non-positive frequency, NaN, ...).
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Integration error: {0}")]
    IntegrationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<String> for CosmologyError {
    fn from(s: String) -> Self {
        CosmologyError::InternalError(s)
    }
}

impl From<&str> for CosmologyError {
    fn from(s: &str) -> Self {
        CosmologyError::InternalError(s.to_string())
    }
}

/// Rejects NaN and infinities with a message naming the offending quantity.
pub(crate) fn ensure_finite(name: &str, value: f64) -> CosmologyResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CosmologyError::ValidationError(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

/// Rejects redshifts at or below -1, where `1 + z` stops being a scale factor.
pub(crate) fn ensure_physical_redshift(z: f64) -> CosmologyResult<f64> {
    ensure_finite("redshift", z)?;
    if z <= -1.0 {
        return Err(CosmologyError::ValidationError(format!(
            "redshift must be greater than -1, got {}",
            z
        )));
    }
    Ok(z)
}
