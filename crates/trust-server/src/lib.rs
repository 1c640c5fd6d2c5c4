//! # Trust Server Library
//!
//! Dependency injection wiring and startup helpers for the circle of trust
//! server binary.

pub mod di;
pub mod startup;
