//! Configuration validation.
//!
//! Every rule is evaluated so a bad configuration reports all of its
//! problems at once, before the server binds or connects anywhere.

use crate::{AppConfig, CacheConfig, DatabaseConfig, ObservabilityConfig, ServerConfig, StoreBackend};
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Port number is invalid (must be 1-65535).
    InvalidPort { value: u16 },
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Duration value must be positive.
    NonPositiveDuration { name: String },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Log format is invalid.
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { value } => {
                write!(f, "Invalid server port: {} (must be 1-65535)", value)
            }
            Self::InvalidPoolSize { min, max } => {
                write!(
                    f,
                    "Invalid pool size: min ({}) cannot be greater than max ({})",
                    min, max
                )
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveDuration { name } => {
                write!(f, "'{}' must be positive", name)
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
            Self::InvalidLogFormat { value } => {
                write!(f, "Invalid log format: '{}' (valid: pretty, json)", value)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];
    const VALID_LOG_FORMATS: &'static [&'static str] = &["pretty", "json"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(&config.server, &mut errors);
        Self::validate_database(&config.database, &mut errors);
        Self::validate_cache(&config.cache, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &ServerConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.port == 0 {
            errors.push(ConfigValidationError::InvalidPort { value: config.port });
        }
        if config.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "server.request_timeout_secs".to_string(),
            });
        }
    }

    fn validate_database(config: &DatabaseConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.store_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "database.store_timeout_secs".to_string(),
            });
        }

        // Pool settings are irrelevant to the in-memory store.
        if config.backend == StoreBackend::Memory {
            return;
        }

        if config.url.is_empty() {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        } else if !config.url.starts_with("mysql://") {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL must start with mysql://".to_string(),
            });
        }

        if config.min_connections > config.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }
        if config.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "database.connect_timeout_secs".to_string(),
            });
        }
    }

    fn validate_cache(config: &CacheConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.ttl_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveDuration {
                name: "cache.ttl_secs".to_string(),
            });
        }
    }

    fn validate_observability(config: &ObservabilityConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }

        let format = config.log_format.to_lowercase();
        if !Self::VALID_LOG_FORMATS.contains(&format.as_str()) {
            errors.push(ConfigValidationError::InvalidLogFormat {
                value: config.log_format.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let mut config = AppConfig::default();
        config.cache.ttl_secs = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::NonPositiveDuration { name } if name == "cache.ttl_secs"
        )));
    }

    #[test]
    fn test_zero_store_timeout_is_rejected() {
        let mut config = AppConfig::default();
        config.database.store_timeout_secs = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::NonPositiveDuration { name } if name == "database.store_timeout_secs"
        )));
    }

    #[test]
    fn test_empty_url_rejected_only_for_mysql() {
        let mut config = AppConfig::default();
        config.database.url = String::new();
        assert!(ConfigValidator::validate(&config).is_err());

        config.database.backend = StoreBackend::Memory;
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_database_url() {
        let mut config = AppConfig::default();
        config.database.url = "postgres://localhost/trust".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::InvalidUrl { url_type, .. } if url_type == "database"
        )));
    }

    #[test]
    fn test_invalid_pool_size() {
        let mut config = AppConfig::default();
        config.database.min_connections = 100;
        config.database.max_connections = 10;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::InvalidPoolSize { .. })));
    }

    #[test]
    fn test_invalid_log_settings() {
        let mut config = AppConfig::default();
        config.observability.log_level = "loud".to_string();
        config.observability.log_format = "xml".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_multiple_errors() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.cache.ttl_secs = 0;
        config.database.url = String::new();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_format_validation_errors() {
        let errors = vec![
            ConfigValidationError::InvalidPort { value: 0 },
            ConfigValidationError::NonPositiveDuration {
                name: "cache.ttl_secs".to_string(),
            },
        ];

        let output = format_validation_errors(&errors);
        assert!(output.contains("Invalid server port"));
        assert!(output.contains("cache.ttl_secs"));
    }
}
