//! REST API controllers.

pub mod circle_controller;
pub mod health_controller;
pub mod membership_controller;
pub mod user_controller;

pub use health_controller::*;
