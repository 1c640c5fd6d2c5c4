//! Service implementations.
//!
//! This module contains the concrete implementations of service traits.
//! Trait definitions live in the parent module (e.g. `membership_service.rs`).

pub mod circle_service_impl;
pub mod membership_service_impl;
pub mod user_service_impl;

pub use circle_service_impl::{CircleServiceComponent, CircleServiceComponentParameters};
pub use membership_service_impl::{
    MembershipServiceComponent, MembershipServiceComponentParameters, MAX_WRITE_ATTEMPTS,
};
pub use user_service_impl::{UserServiceComponent, UserServiceComponentParameters};
