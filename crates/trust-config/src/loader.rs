//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tracing::{debug, info};
use trust_core::TrustError;

/// Environment variable prefix for overrides, e.g. `TRUST_CACHE__TTL_SECS`.
pub const ENV_PREFIX: &str = "TRUST";

/// Loads and validates the layered configuration once at startup.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `TRUST_` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, TrustError> {
        let config = Self::load_config(&config_dir.into())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, TrustError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, TrustError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("TRUST_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_trust_error)?;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| TrustError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

fn config_error_to_trust_error(err: ConfigError) -> TrustError {
    TrustError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreBackend;
    use std::fs;

    #[test]
    fn test_loads_default_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[database]\nbackend = \"memory\"\n\n[cache]\nttl_secs = 5\n",
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy()).unwrap();
        let config = loader.get();

        assert_eq!(config.database.backend, StoreBackend::Memory);
        assert_eq!(config.cache.ttl_secs, 5);
        assert_eq!(config.server.port, 1000);
    }

    #[test]
    fn test_local_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[server]\nport = 1000\n").unwrap();
        fs::write(dir.path().join("local.toml"), "[server]\nport = 1200\n").unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy()).unwrap();
        assert_eq!(loader.get().server.port, 1200);
    }

    #[test]
    fn test_invalid_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[cache]\nttl_secs = 0\n").unwrap();

        let err = ConfigLoader::new(dir.path().to_string_lossy()).err().unwrap();
        assert!(matches!(err, TrustError::Configuration(msg) if msg.contains("cache.ttl_secs")));
    }
}
