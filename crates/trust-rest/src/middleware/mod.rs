//! HTTP middleware.

mod logging;
mod panic;

pub use logging::*;
pub use panic::*;
