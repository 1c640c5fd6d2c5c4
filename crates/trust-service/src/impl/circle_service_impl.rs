//! Circle service implementation.

use crate::circle_service::CircleService;
use crate::dto::{CircleResponse, CreateCircleRequest};
use crate::timeout::{with_timeout, DEFAULT_STORE_TIMEOUT};
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use trust_core::{CircleId, TrustError, TrustResult, UserId, ValidateExt};
use trust_repository::CircleRepository;

/// Shaku-injectable circle service.
#[derive(Component)]
#[shaku(interface = CircleService)]
pub struct CircleServiceComponent {
    #[shaku(inject)]
    circle_repository: Arc<dyn CircleRepository>,
    #[shaku(default = DEFAULT_STORE_TIMEOUT)]
    store_timeout: Duration,
}

impl CircleServiceComponent {
    /// Creates a circle service with the default store timeout.
    #[must_use]
    pub fn new(circle_repository: Arc<dyn CircleRepository>) -> Self {
        Self {
            circle_repository,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

#[async_trait]
impl CircleService for CircleServiceComponent {
    async fn create_circle(&self, request: CreateCircleRequest) -> TrustResult<CircleResponse> {
        request.validate_request()?;
        let owner_id = UserId::new(request.owner_id);
        let name = request.name.trim();
        debug!("Creating circle '{}' for owner {}", name, owner_id);

        let circle = with_timeout(self.store_timeout, || {
            self.circle_repository.insert(owner_id, name)
        })
        .await?;

        info!("Circle created: {} (owner {})", circle.id, owner_id);
        Ok(CircleResponse::from(circle))
    }

    async fn get_circle(&self, id: CircleId) -> TrustResult<CircleResponse> {
        let id = id.ensure_valid()?;
        debug!("Getting circle: {}", id);

        let circle = with_timeout(self.store_timeout, || self.circle_repository.find_by_id(id))
            .await?
            .ok_or_else(|| TrustError::not_found("Circle", id))?;

        Ok(CircleResponse::from(circle))
    }
}
