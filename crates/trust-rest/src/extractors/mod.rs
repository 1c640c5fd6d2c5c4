//! Custom Axum extractors.

mod ids;
mod validated;

pub use ids::*;
pub use validated::*;
