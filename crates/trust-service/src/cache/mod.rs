//! Membership cache.
//!
//! The service depends on the [`MembershipCache`] trait only. The shipped
//! implementation is a single-process map with one fixed time-to-live.

mod cache_interface;
pub mod cache_keys;
mod ttl_cache;

pub use cache_interface::MembershipCache;
pub use ttl_cache::{CacheState, TtlMembershipCache, TtlMembershipCacheParameters, DEFAULT_TTL};
