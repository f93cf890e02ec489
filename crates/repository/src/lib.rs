//! Generic async repository layer.
//!
//! Any sea-orm entity gains create/read/update/delete, counting and
//! filtered listing by implementing [`Repository`]. Operations run inside a
//! caller-owned [`Session`] handed out by a [`SessionManager`].
//!
//! ```ignore
//! use repository::{with_session, Repository, SessionManager, UserRepository};
//! use domain::{FilterStatement, UserIn};
//!
//! let manager = SessionManager::new("sqlite::memory:", None).await?;
//! manager.run_migrations().await?;
//!
//! let user = with_session!(manager, |session| {
//!     UserRepository
//!         .create(session, UserIn::new("szl7000", "szl7000@szl.com", "pass"), None)
//!         .await
//! })?;
//! ```

pub mod base;
pub mod entities;
pub mod migrations;
pub mod query;
pub mod session;
mod user_repository;

pub use base::Repository;
pub use migrations::Migrator;
pub use query::{binary_cond, name_query_cond, LoadOption};
pub use session::{Session, SessionManager};
pub use user_repository::UserRepository;

pub use common::{RepoError, RepoResult};
