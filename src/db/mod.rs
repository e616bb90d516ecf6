//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization, schema bootstrap and category seeding
//! - SQLite pragma configuration
//! - The transactional executor wrapping every mutation
//! - Repository layer for database operations

pub mod migrations;
pub mod repo;
pub mod transaction;

pub use migrations::{init_db, InitError};
pub use repo::Repository;
pub use transaction::{TransactionError, TransactionalExecutor};
