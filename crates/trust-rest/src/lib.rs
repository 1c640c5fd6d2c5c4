//! # Trust REST
//!
//! REST API layer using Axum for the circle of trust service.
//! Provides HTTP endpoints for users, circles, circle membership, health
//! probes and metrics.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
