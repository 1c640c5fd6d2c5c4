//! Circle service trait definition.

use crate::dto::{CircleResponse, CreateCircleRequest};
use async_trait::async_trait;
use trust_core::{CircleId, Interface, TrustResult};

/// Circle service trait.
#[async_trait]
pub trait CircleService: Interface + Send + Sync {
    /// Creates a new circle owned by an existing user.
    async fn create_circle(&self, request: CreateCircleRequest) -> TrustResult<CircleResponse>;

    /// Gets a circle by ID.
    async fn get_circle(&self, id: CircleId) -> TrustResult<CircleResponse>;
}
