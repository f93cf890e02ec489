//! SeaORM entity definitions

pub mod user;

// Re-exports for public API convenience
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
