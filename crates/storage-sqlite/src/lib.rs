//! SQLite storage implementation for Fundwatch.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the snapshot repository trait defined in `fundwatch-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The holding snapshot repository
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod holdings;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use holdings::HoldingSnapshotRepository;

// Re-export from fundwatch-core for convenience
pub use fundwatch_core::errors::{DatabaseError, Error, Result};
