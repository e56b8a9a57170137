//! SQLite persistence adapter.
//!
//! Provides the SQLite-backed implementation of every store port using
//! Diesel ORM. Referential integrity and choice constraints are declared in
//! the embedded migrations and enforced by SQLite itself.

pub mod database;
pub mod store;

pub use database::connection::{
    create_pool, create_pool_with, open, run_migrations, sqlite_database_url, DbPool,
    PoolOptions, MEMORY_DATABASE_URL,
};
pub use store::SqliteStore;
