//! # Trust Domain
//!
//! Domain entities for the circle of trust service: users, circles and the
//! decoded view of a circle's membership record.

pub mod entities;

pub use entities::*;
