//! Common utilities shared by the repository crates.
//!
//! This crate provides:
//! - Unified error handling for repository operations
//! - Database configuration structures
//! - Tracing initialisation

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::*;
pub use error::{OptionExt, RepoError, RepoResult};
