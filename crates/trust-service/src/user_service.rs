//! User service trait definition.

use crate::dto::{CreateUserRequest, UserResponse};
use async_trait::async_trait;
use trust_core::{Interface, TrustResult, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, request: CreateUserRequest) -> TrustResult<UserResponse>;

    /// Gets a user by ID.
    async fn get_user(&self, id: UserId) -> TrustResult<UserResponse>;
}
