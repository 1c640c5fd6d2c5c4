//! User service implementation.

use crate::dto::{CreateUserRequest, UserResponse};
use crate::timeout::{with_timeout, DEFAULT_STORE_TIMEOUT};
use crate::user_service::UserService;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use trust_core::{TrustError, TrustResult, UserId, ValidateExt};
use trust_repository::UserRepository;

/// Shaku-injectable user service.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(default = DEFAULT_STORE_TIMEOUT)]
    store_timeout: Duration,
}

impl UserServiceComponent {
    /// Creates a user service with the default store timeout.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self {
            user_repository,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

#[async_trait]
impl UserService for UserServiceComponent {
    async fn create_user(&self, request: CreateUserRequest) -> TrustResult<UserResponse> {
        request.validate_request()?;
        let name = request.name.trim();
        debug!("Creating user: {}", name);

        let user = with_timeout(self.store_timeout, || self.user_repository.insert(name)).await?;

        info!("User created: {}", user.id);
        Ok(UserResponse::from(user))
    }

    async fn get_user(&self, id: UserId) -> TrustResult<UserResponse> {
        let id = id.ensure_valid()?;
        debug!("Getting user: {}", id);

        let user = with_timeout(self.store_timeout, || self.user_repository.find_by_id(id))
            .await?
            .ok_or_else(|| TrustError::not_found("User", id))?;

        Ok(UserResponse::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trust_repository::{InMemoryStore, MemoryUserRepository};

    fn service(store: &InMemoryStore) -> UserServiceComponent {
        UserServiceComponent::new(Arc::new(MemoryUserRepository::new(store.clone())))
    }

    #[tokio::test]
    async fn test_create_user_assigns_id_and_trims_name() {
        let store = InMemoryStore::new();
        let service = service(&store);

        let user = service
            .create_user(CreateUserRequest {
                name: "  alice ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, UserId::new(1));
        assert_eq!(user.name, "alice");
        assert_eq!(service.get_user(user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_create_user_rejects_blank_name_without_store_call() {
        let store = InMemoryStore::new();
        store.set_unavailable(true);
        let service = service(&store);

        let err = service
            .create_user(CreateUserRequest {
                name: "   ".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TrustError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let store = InMemoryStore::new();
        let err = service(&store).get_user(UserId::new(42)).await.unwrap_err();
        assert!(matches!(err, TrustError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_user_rejects_non_positive_id() {
        let store = InMemoryStore::new();
        let err = service(&store).get_user(UserId::new(0)).await.unwrap_err();
        assert!(matches!(err, TrustError::Validation(_)));
        assert_eq!(store.user_reads(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces() {
        let store = InMemoryStore::new();
        store.set_unavailable(true);

        let err = service(&store).get_user(UserId::new(1)).await.unwrap_err();
        assert!(matches!(err, TrustError::StoreUnavailable(_)));
    }
}
