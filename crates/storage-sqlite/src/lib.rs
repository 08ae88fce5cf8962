//! SQLite storage implementation for Stockfolio.
//!
//! This crate is the only place where `diesel::table!` definitions and
//! row models live. It implements the repository traits defined in
//! `stockfolio-core`:
//!
//! ```text
//! core (domain services, traits)
//!           │
//!           ▼
//! storage-sqlite (this crate)
//!           │
//!           ▼
//!       SQLite DB
//! ```
//!
//! Reads go through the shared r2d2 pool; every mutation is executed on
//! the single-writer actor so invariant checks and their writes share one
//! immediate transaction.

pub mod db;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod portfolios;
pub mod quotes;
pub mod transactions;
pub mod watchlists;

pub use db::{get_db_path, init, run_migrations};

// Re-export the shared plumbing for convenience
pub use stockfolio_core::db::{
    create_pool, get_connection, spawn_writer, DbConnection, DbPool, WriteHandle,
};
pub use stockfolio_core::errors::{DatabaseError, Error, Result};
