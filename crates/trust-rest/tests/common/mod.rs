//! Shared helpers for REST API tests.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use trust_config::AppConfig;
use trust_repository::{
    InMemoryStore, MemoryCircleRepository, MemoryHealthCheck, MemoryMembershipRepository,
    MemoryUserRepository,
};
use trust_rest::{create_router, AppState, ServiceInfo};
use trust_service::{
    CircleServiceComponent, MembershipServiceComponent, TtlMembershipCache, UserServiceComponent,
};

/// A router wired to an in-memory store.
pub struct TestApp {
    pub store: InMemoryStore,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let state = state_for(&store);
        Self {
            router: create_router(state, &AppConfig::default()),
            store,
        }
    }

    /// Sends a request and returns the status with the parsed JSON body
    /// (`Value::Null` for an empty body).
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send(&self.router, method, uri, body).await
    }
}

pub fn service_info() -> ServiceInfo {
    ServiceInfo {
        name: "circle-of-trust".to_string(),
        version: "0.1.0".to_string(),
        environment: "test".to_string(),
        database: "memory".to_string(),
    }
}

pub fn state_for(store: &InMemoryStore) -> AppState {
    let cache = Arc::new(TtlMembershipCache::new());

    AppState::new(
        Arc::new(UserServiceComponent::new(Arc::new(
            MemoryUserRepository::new(store.clone()),
        ))),
        Arc::new(CircleServiceComponent::new(Arc::new(
            MemoryCircleRepository::new(store.clone()),
        ))),
        Arc::new(MembershipServiceComponent::new(
            Arc::new(MemoryMembershipRepository::new(store.clone())),
            Arc::new(MemoryUserRepository::new(store.clone())),
            cache,
        )),
        Arc::new(MemoryHealthCheck::default()),
        service_info(),
    )
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}
