//! # Trust Repository
//!
//! Store adapters for users, circles and circle membership records.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn MembershipRepository>   (store interface)
//! MySqlMembershipRepository            (MySQL / SQLx, version CAS)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```
//!
//! The [`memory`] adapters implement the same traits over process-local
//! maps. They back the `memory` store option and the service/REST tests.

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use pool::*;
pub use traits::*;

pub use memory::{
    InMemoryStore, MemoryCircleRepository, MemoryCircleRepositoryParameters, MemoryHealthCheck,
    MemoryMembershipRepository, MemoryMembershipRepositoryParameters, MemoryUserRepository,
    MemoryUserRepositoryParameters,
};
pub use mysql::*;
