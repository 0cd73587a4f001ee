//! Engine error type.

use thiserror::Error;

/// Result alias used by every fallible engine calculation.
pub type Result<T> = std::result::Result<T, EngineError>;

/// The only failure the engine knows about: an input it cannot divide by or
/// round meaningfully.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid argument `{name}`: {value} ({reason})")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl EngineError {
    pub fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        EngineError::InvalidArgument { name, value, reason }
    }
}

/// Rejects non-finite or non-positive target values.
pub fn ensure_target(target_value: f64) -> Result<f64> {
    if !target_value.is_finite() {
        return Err(EngineError::invalid("target_value", target_value, "must be finite"));
    }
    if target_value <= 0.0 {
        return Err(EngineError::invalid("target_value", target_value, "must be positive"));
    }
    Ok(target_value)
}

/// Rejects NaN and infinite amounts. Sign is left to the caller.
pub fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::invalid(name, value, "must be finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_target_rejects_zero_and_negative() {
        assert!(ensure_target(0.0).is_err());
        assert!(ensure_target(-10.0).is_err());
        assert_eq!(ensure_target(3650.0), Ok(3650.0));
    }

    #[test]
    fn test_ensure_target_rejects_non_finite() {
        assert!(ensure_target(f64::NAN).is_err());
        assert!(ensure_target(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_message_names_argument() {
        let err = ensure_target(0.0).unwrap_err();
        assert_eq!(err.to_string(), "invalid argument `target_value`: 0 (must be positive)");
    }
}
