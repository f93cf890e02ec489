//! Domain layer - Data shapes shared by the repository layer.
//!
//! This crate contains pure types with no infrastructure dependencies:
//! filter statements, entity input/output shapes and validation errors.

pub mod constants;
pub mod error;
pub mod filter;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use filter::{FilterParams, FilterStatement, OrderDirection};
pub use user::{UserChanges, UserIn, UserOut};
