//! # Circle of Trust Server
//!
//! Main entry point. Loads layered configuration, wires the selected store
//! backend through Shaku, and serves the REST API until SIGINT/SIGTERM.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::signal;
use tracing::{error, info};
use trust_config::{AppConfig, ConfigLoader, ObservabilityConfig, StoreBackend};
use trust_core::{TrustError, TrustResult};
use trust_repository::InMemoryStore;
use trust_rest::{create_router, AppState};
use trust_server::{
    di::{build_in_memory_module, build_monolithic_module},
    startup::{print_banner, print_startup_info, service_info},
};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get(),
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    print_banner();

    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> TrustResult<()> {
    let info = service_info(&config);

    let mut state = match config.database.backend {
        StoreBackend::Mysql => {
            let module = build_monolithic_module(&config).await?;
            AppState::from_module(module.as_ref(), info)
        }
        StoreBackend::Memory => {
            info!("Using in-memory store; data will not survive a restart");
            let module = build_in_memory_module(&config, InMemoryStore::new());
            AppState::from_module(module.as_ref(), info)
        }
    };

    if config.observability.metrics_enabled {
        state = state.with_metrics(install_metrics_recorder()?);
    }

    let router = create_router(state, &config);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TrustError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    print_startup_info(&config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TrustError::Internal(format!("REST server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging(config: &ObservabilityConfig) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=debug", config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.log_format == "json" {
        registry.with(fmt::layer().json().with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

fn install_metrics_recorder() -> TrustResult<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| TrustError::Configuration(format!("Failed to install metrics recorder: {}", e)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
