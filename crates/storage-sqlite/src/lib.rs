//! SQLite storage implementation for Willpower.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `willpower-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users, goals and check-ins
//! - Database-specific model types (with Diesel derives)
//!
//! All writes go through a single writer task ([`WriteHandle`]); reads use the
//! pool directly.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod checkins;
pub mod goals;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from willpower-core for convenience
pub use willpower_core::errors::{DatabaseError, Error, Result};
