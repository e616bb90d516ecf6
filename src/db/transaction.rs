//! Transactional executor for mutations.
//!
//! Every write goes through [`TransactionalExecutor::run`], which begins a
//! transaction on a pooled connection, hands the connection to the unit of
//! work, and commits on success or rolls back on failure. The pooled
//! connection is returned to the pool on every exit path: `commit` and
//! `rollback` consume the transaction, and a transaction dropped after a
//! failed commit rolls back before releasing its connection.

use futures::future::BoxFuture;
use sqlx::sqlite::{SqliteConnection, SqlitePool};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Phase in which a transactional mutation failed.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("failed to begin transaction: {0}")]
    Begin(#[source] sqlx::Error),
    #[error("unit of work failed: {0}")]
    Work(#[source] sqlx::Error),
    #[error("failed to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),
}

impl TransactionError {
    /// The underlying database error.
    pub fn database_error(&self) -> &sqlx::Error {
        match self {
            TransactionError::Begin(e) | TransactionError::Work(e) | TransactionError::Commit(e) => e,
        }
    }
}

/// Runs units of work inside SQLite transactions.
#[derive(Debug, Clone)]
pub struct TransactionalExecutor {
    pool: SqlitePool,
}

impl TransactionalExecutor {
    pub fn new(pool: SqlitePool) -> Self {
        TransactionalExecutor { pool }
    }

    /// Execute `work` in a transaction.
    ///
    /// Returns the unit of work's value after a successful commit. Any error
    /// while beginning, executing or committing is logged, the transaction is
    /// rolled back, and the failed phase is reported as a [`TransactionError`].
    pub async fn run<T, F>(&self, work: F) -> Result<T, TransactionError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, sqlx::Error>>
            + Send,
    {
        let mut tx = self.pool.begin().await.map_err(|e| {
            error!(error = %e, "Failed to begin transaction");
            TransactionError::Begin(e)
        })?;

        let outcome = work(&mut *tx).await;

        match outcome {
            Ok(value) => match tx.commit().await {
                Ok(()) => {
                    debug!("Transaction committed");
                    Ok(value)
                }
                Err(e) => {
                    error!(error = %e, "Transaction commit failed, rolled back");
                    Err(TransactionError::Commit(e))
                }
            },
            Err(e) => {
                error!(error = %e, "Unit of work failed, rolling back");
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(TransactionError::Work(e))
            }
        }
    }
}
