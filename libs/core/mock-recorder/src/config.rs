use std::env;

use thiserror::Error;
use tracing::warn;

pub const VERIFY_ON_DROP_VAR: &str = "MOCK_VERIFY_ON_DROP";
pub const STRICT_ORDER_VAR: &str = "MOCK_STRICT_ORDER";

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::ParseError {
            key: key.to_string(),
            details: format!("expected a boolean, got '{other}'"),
        }),
    }
}

/// Controller behaviour
///
/// Environment variables:
/// - `MOCK_VERIFY_ON_DROP`: verify expectations when the controller is dropped (default: true)
/// - `MOCK_STRICT_ORDER`: require calls in registration order (default: false)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderConfig {
    pub verify_on_drop: bool,
    pub strict_order: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            verify_on_drop: true,
            strict_order: false,
        }
    }
}

impl RecorderConfig {
    /// Load from the environment, falling back to defaults on invalid values
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|err| {
            warn!(error = %err, "Invalid mock recorder configuration, using defaults");
            Self::default()
        })
    }

    pub fn with_verify_on_drop(mut self, verify_on_drop: bool) -> Self {
        self.verify_on_drop = verify_on_drop;
        self
    }

    pub fn with_strict_order(mut self, strict_order: bool) -> Self {
        self.strict_order = strict_order;
        self
    }
}

impl FromEnv for RecorderConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            verify_on_drop: parse_bool(
                VERIFY_ON_DROP_VAR,
                &env_or_default(VERIFY_ON_DROP_VAR, "true"),
            )?,
            strict_order: parse_bool(STRICT_ORDER_VAR, &env_or_default(STRICT_ORDER_VAR, "false"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        temp_env::with_vars_unset([VERIFY_ON_DROP_VAR, STRICT_ORDER_VAR], || {
            let config = RecorderConfig::from_env().unwrap();
            assert_eq!(config, RecorderConfig::default());
            assert!(config.verify_on_drop);
            assert!(!config.strict_order);
        });
    }

    #[test]
    fn test_reads_overrides() {
        temp_env::with_vars(
            [(VERIFY_ON_DROP_VAR, Some("off")), (STRICT_ORDER_VAR, Some("TRUE"))],
            || {
                let config = RecorderConfig::from_env().unwrap();
                assert!(!config.verify_on_drop);
                assert!(config.strict_order);
            },
        );
    }

    #[test]
    fn test_invalid_value_is_a_parse_error() {
        temp_env::with_var(STRICT_ORDER_VAR, Some("sometimes"), || {
            let err = RecorderConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == STRICT_ORDER_VAR));
            assert!(err.to_string().contains("sometimes"));
        });
    }

    #[test]
    fn test_invalid_value_falls_back_to_defaults() {
        temp_env::with_var(VERIFY_ON_DROP_VAR, Some("maybe"), || {
            assert_eq!(RecorderConfig::from_env_or_default(), RecorderConfig::default());
        });
    }

    #[test]
    fn test_builder_overrides() {
        let config = RecorderConfig::default()
            .with_verify_on_drop(false)
            .with_strict_order(true);
        assert!(!config.verify_on_drop);
        assert!(config.strict_order);
    }
}
