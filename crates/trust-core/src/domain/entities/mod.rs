//! Domain entities.

mod circle;
mod membership;
mod user;

pub use circle::*;
pub use membership::*;
pub use user::*;
