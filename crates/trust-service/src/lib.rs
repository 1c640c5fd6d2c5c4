//! # Trust Service
//!
//! Membership cache, membership-list codec and the services the HTTP layer
//! calls into.
//!
//! Reads go through a time-bounded cache in front of the store; writes go
//! to the store first and only then invalidate the affected cache entries.

pub mod cache;
pub mod circle_service;
pub mod codec;
pub mod dto;
pub mod membership_service;
pub mod timeout;
pub mod user_service;
pub mod r#impl;

pub use cache::*;
pub use circle_service::*;
pub use dto::*;
pub use membership_service::*;
pub use r#impl::{
    CircleServiceComponent, CircleServiceComponentParameters, MembershipServiceComponent,
    MembershipServiceComponentParameters, UserServiceComponent, UserServiceComponentParameters,
};
pub use user_service::*;
