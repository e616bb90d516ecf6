//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by domain:
//! - `categories.rs` - Category lookups and the id → type mapping
//! - `questions.rs` - Paginated listing, search, quiz candidates and mutations
//!
//! Reads borrow a pooled connection per query. Mutations run through the
//! [`TransactionalExecutor`] so they commit or roll back as a unit.

mod categories;
mod questions;

use crate::db::transaction::TransactionalExecutor;
use sqlx::sqlite::SqlitePool;

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
    executor: TransactionalExecutor,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        let executor = TransactionalExecutor::new(pool.clone());
        Repository { pool, executor }
    }

    /// Check that a connection can be acquired and used.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
