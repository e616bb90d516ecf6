//! Database initialization, schema bootstrap and seeding.

use crate::db::transaction::{TransactionError, TransactionalExecutor};
use crate::domain::DEFAULT_CATEGORY_TYPES;
use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("cannot create database directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("category seeding failed: {0}")]
    Seed(#[from] TransactionError),
}

/// Initialize the SQLite database with schema, pragmas and seed categories.
pub async fn init_db(db_path: &str, max_connections: u32) -> Result<SqlitePool, InitError> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }))
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await?;

    run_migrations(&pool).await?;
    seed_categories(&pool).await?;

    info!("Database initialized successfully at {}", db_path);
    Ok(pool)
}

/// Create tables and indexes that do not exist yet.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");
    let schema_sql = include_str!("schema.sql");

    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }

    info!("Migrations completed successfully");
    Ok(())
}

/// Insert the default categories when the table is empty.
///
/// Returns the number of categories inserted.
async fn seed_categories(pool: &SqlitePool) -> Result<usize, InitError> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(0);
    }

    let executor = TransactionalExecutor::new(pool.clone());
    let inserted = executor
        .run(|conn| {
            Box::pin(async move {
                for kind in DEFAULT_CATEGORY_TYPES {
                    sqlx::query("INSERT INTO categories (type) VALUES (?)")
                        .bind(kind)
                        .execute(&mut *conn)
                        .await?;
                }
                Ok(DEFAULT_CATEGORY_TYPES.len())
            })
        })
        .await?;

    info!(count = inserted, "Seeded default categories");
    Ok(inserted)
}

/// Configure SQLite pragmas for integrity and concurrent access.
async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Row;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut *conn)
        .await?;

    // journal_mode returns the actual mode set; must use fetch to get result
    let row = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    let journal_mode: String = row.get(0);
    info!("SQLite journal_mode set to: {}", journal_mode);

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
