//! Application state for Axum handlers.

use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use shaku::{HasComponent, Module};
use std::sync::Arc;
use trust_core::HealthCheck;
use trust_service::{CircleService, MembershipService, UserService};
use utoipa::ToSchema;

/// Identity reported by the index endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// Service name.
    pub name: String,
    /// Service version.
    pub version: String,
    /// Deployment environment.
    pub environment: String,
    /// Backing store in use.
    pub database: String,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub circle_service: Arc<dyn CircleService>,
    pub membership_service: Arc<dyn MembershipService>,
    pub store_health: Arc<dyn HealthCheck>,
    pub info: ServiceInfo,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        circle_service: Arc<dyn CircleService>,
        membership_service: Arc<dyn MembershipService>,
        store_health: Arc<dyn HealthCheck>,
        info: ServiceInfo,
    ) -> Self {
        Self {
            user_service,
            circle_service,
            membership_service,
            store_health,
            info,
            metrics: None,
        }
    }

    /// Resolves every service from a Shaku module.
    pub fn from_module<M>(module: &M, info: ServiceInfo) -> Self
    where
        M: Module
            + HasComponent<dyn UserService>
            + HasComponent<dyn CircleService>
            + HasComponent<dyn MembershipService>
            + HasComponent<dyn HealthCheck>,
    {
        let user_service: Arc<dyn UserService> = module.resolve();
        let circle_service: Arc<dyn CircleService> = module.resolve();
        let membership_service: Arc<dyn MembershipService> = module.resolve();
        let store_health: Arc<dyn HealthCheck> = module.resolve();

        Self::new(
            user_service,
            circle_service,
            membership_service,
            store_health,
            info,
        )
    }

    /// Exposes the Prometheus recorder at the metrics endpoint.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
