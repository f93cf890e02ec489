//! Session lifecycle management.
//!
//! A [`SessionManager`] owns the pooled database engine for the life of the
//! process and hands out scoped [`Session`]s. The manager moves through
//! exactly two states: initialized (after [`SessionManager::new`]) and
//! closed (after [`SessionManager::close`]). There is no way back from
//! closed; build a new manager instead.

use std::time::Duration;

use futures::future::BoxFuture;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, Statement,
    TransactionTrait,
};
use sea_orm_migration::MigratorTrait;

use crate::migrations::Migrator;
use common::{DatabaseConfig, EngineOptions, RepoError, RepoResult};

/// Owner of the database engine.
pub struct SessionManager {
    connection: Option<DatabaseConnection>,
}

impl SessionManager {
    /// Connect to `uri`, applying store-specific engine options if given.
    pub async fn new(uri: &str, options: Option<EngineOptions>) -> RepoResult<Self> {
        let options = connect_options(uri, &options.unwrap_or_default());
        let connection = Database::connect(options).await?;
        tracing::info!("Database engine initialized");

        Ok(Self {
            connection: Some(connection),
        })
    }

    /// Connect using a loaded [`DatabaseConfig`].
    pub async fn from_config(config: &DatabaseConfig) -> RepoResult<Self> {
        Self::new(&config.url, Some(config.engine.clone())).await
    }

    pub fn is_initialized(&self) -> bool {
        self.connection.is_some()
    }

    /// Get a reference to the engine, failing once the manager is closed.
    pub fn connection(&self) -> RepoResult<&DatabaseConnection> {
        self.connection.as_ref().ok_or(RepoError::NotInitialized)
    }

    /// Dispose of the engine. Any later call on this manager fails with
    /// [`RepoError::NotInitialized`], including a second `close`.
    pub async fn close(&mut self) -> RepoResult<()> {
        let connection = self.connection.take().ok_or(RepoError::NotInitialized)?;
        connection.close().await?;
        tracing::info!("Database engine disposed");
        Ok(())
    }

    /// Run `f` with a raw connection bound to one transaction.
    ///
    /// The transaction is committed when `f` succeeds and rolled back when it
    /// fails; the error from `f` is returned unchanged.
    pub async fn connect<F, T>(&self, f: F) -> RepoResult<T>
    where
        F: for<'a> FnOnce(&'a DatabaseTransaction) -> BoxFuture<'a, RepoResult<T>> + Send,
        T: Send,
    {
        let txn = self.connection()?.begin().await?;

        match f(&txn).await {
            Ok(result) => {
                txn.commit().await?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    /// Hand out a session the caller is responsible for closing.
    pub fn open_session(&self) -> RepoResult<Session> {
        Ok(Session::new(self.connection()?.clone()))
    }

    /// Run `f` with a fresh session.
    ///
    /// On error the session is rolled back before the error is returned.
    /// The session is closed on every exit path.
    ///
    /// The returned future must not borrow from the caller, because it only
    /// lives as long as the session borrow. Move owned values into the body.
    pub async fn session<F, T>(&self, f: F) -> RepoResult<T>
    where
        F: for<'a> FnOnce(&'a mut Session) -> BoxFuture<'a, RepoResult<T>> + Send,
        T: Send,
    {
        let mut session = self.open_session()?;

        match f(&mut session).await {
            Ok(result) => {
                session.close().await?;
                Ok(result)
            }
            Err(e) => {
                tracing::debug!(code = e.code(), "Session scope failed, rolling back");
                if let Err(rollback_err) = session.rollback().await {
                    tracing::error!("Session rollback failed: {}", rollback_err);
                }
                if let Err(close_err) = session.close().await {
                    tracing::error!("Session close failed: {}", close_err);
                }
                Err(e)
            }
        }
    }

    /// Apply pending schema migrations.
    pub async fn run_migrations(&self) -> RepoResult<()> {
        Migrator::up(self.connection()?, None).await?;
        tracing::info!("Migrations applied");
        Ok(())
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> RepoResult<()> {
        let connection = self.connection()?;
        connection
            .execute(Statement::from_string(
                connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

/// Translate [`EngineOptions`] into sea-orm connect options.
fn connect_options(uri: &str, engine: &EngineOptions) -> ConnectOptions {
    let mut options = ConnectOptions::new(uri.to_owned());

    if let Some(max) = engine.max_connections {
        options.max_connections(max);
    }
    if let Some(min) = engine.min_connections {
        options.min_connections(min);
    }
    if let Some(secs) = engine.connect_timeout_secs {
        options.connect_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = engine.acquire_timeout_secs {
        options.acquire_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = engine.idle_timeout_secs {
        options.idle_timeout(Duration::from_secs(secs));
    }
    options.sqlx_logging(engine.sql_logging.unwrap_or(false));

    options
}

/// Unit of work bound to one connection.
///
/// A transaction is begun lazily by the first operation and lives until
/// [`Session::commit`], [`Session::rollback`] or [`Session::close`].
/// Every method takes `&mut self`, so a session cannot be driven by two
/// callers at once.
pub struct Session {
    connection: DatabaseConnection,
    transaction: Option<DatabaseTransaction>,
}

impl Session {
    fn new(connection: DatabaseConnection) -> Self {
        Self {
            connection,
            transaction: None,
        }
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// The in-flight transaction, begun on first use.
    pub async fn transaction(&mut self) -> RepoResult<&DatabaseTransaction> {
        let txn = match self.transaction.take() {
            Some(txn) => txn,
            None => {
                tracing::trace!("Beginning session transaction");
                self.connection.begin().await?
            }
        };
        let txn: &DatabaseTransaction = self.transaction.insert(txn);
        Ok(txn)
    }

    /// Commit the in-flight transaction, if any.
    pub async fn commit(&mut self) -> RepoResult<()> {
        if let Some(txn) = self.transaction.take() {
            txn.commit().await?;
        }
        Ok(())
    }

    /// Roll back the in-flight transaction, if any.
    pub async fn rollback(&mut self) -> RepoResult<()> {
        if let Some(txn) = self.transaction.take() {
            txn.rollback().await?;
            tracing::debug!("Session transaction rolled back");
        }
        Ok(())
    }

    /// Release the session, discarding uncommitted work.
    pub async fn close(mut self) -> RepoResult<()> {
        self.rollback().await
    }
}

/// Run a block inside a managed session.
///
/// The body is an `async move` block, so it takes ownership of everything it
/// captures and cannot hold references into the caller's scope. Clone
/// borrowed data into an owned binding before the call:
///
/// ```ignore
/// let count = with_session!(manager, |session| UserRepository.count(session).await)?;
///
/// let statement = statement.clone();
/// let users = with_session!(manager, |session| UserRepository.filter(session, statement).await)?;
/// ```
#[macro_export]
macro_rules! with_session {
    ($manager:expr, |$session:ident| $body:expr) => {
        $manager
            .session(|$session| Box::pin(async move { $body }))
            .await
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_options_apply_engine_settings() {
        let engine = EngineOptions {
            max_connections: Some(1),
            connect_timeout_secs: Some(3),
            ..EngineOptions::default()
        };

        let options = connect_options("sqlite::memory:", &engine);

        assert_eq!(options.get_max_connections(), Some(1));
        assert_eq!(options.get_connect_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(options.get_min_connections(), None);
    }
}
