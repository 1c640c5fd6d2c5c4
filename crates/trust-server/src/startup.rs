//! Server startup utilities.

use tracing::info;
use trust_config::AppConfig;
use trust_rest::ServiceInfo;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
   _______            __           ___    ______                __
  / ____(_)________  / /__   ____ / _/   /_  __/______  _______/ /_
 / /   / / ___/ ___/ / _ \ / __ \/ /_     / / / ___/ / / / ___/ __/
/ /___/ / /  / /__/ /  __// /_/ / __/    / / / /  / /_/ (__  ) /_
\____/_/_/   \___/_/\___/ \____/_/      /_/ /_/   \__,_/____/\__/
    "#);
}

/// Identity reported by the index endpoint.
#[must_use]
pub fn service_info(config: &AppConfig) -> ServiceInfo {
    ServiceInfo {
        name: config.app.name.clone(),
        version: config.app.version.clone(),
        environment: config.app.environment.clone(),
        database: config.database.backend.to_string(),
    }
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("REST API:  http://{}/api/v1", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    if config.observability.metrics_enabled {
        info!("Metrics:   http://{}{}", addr, config.observability.metrics_path);
    }
    info!("Store:     {}", config.database.backend);
    info!("Cache TTL: {:?}", config.cache.ttl());
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;
    use trust_config::StoreBackend;

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info(&AppConfig::default());
    }

    #[test]
    fn test_service_info_reports_backend() {
        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Memory;

        let info = service_info(&config);

        assert_eq!(info.name, "circle-of-trust");
        assert_eq!(info.database, "memory");
    }
}
