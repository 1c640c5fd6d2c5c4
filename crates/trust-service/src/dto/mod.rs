//! Data Transfer Objects (DTOs).

mod circle_dto;
mod membership_dto;
mod user_dto;

pub use circle_dto::*;
pub use membership_dto::*;
pub use user_dto::*;
