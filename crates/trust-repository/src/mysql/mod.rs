//! MySQL repository implementations.

mod circle_repository;
mod membership_repository;
mod user_repository;

pub use circle_repository::*;
pub use membership_repository::*;
pub use user_repository::*;
