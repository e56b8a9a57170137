//! Store backends for tests.

use crate::adapter::outbound::memory::MemoryStore;
use crate::adapter::outbound::sqlite::{open, PoolOptions, SqliteStore, MEMORY_DATABASE_URL};

/// A migrated SQLite store on a private in-memory database.
///
/// # Panics
/// Panics if the pool cannot be opened or migrated.
pub fn sqlite() -> SqliteStore {
    let pool = open(MEMORY_DATABASE_URL, PoolOptions::default()).expect("open in-memory sqlite");
    SqliteStore::new(pool)
}

/// An empty memory store.
pub fn memory() -> MemoryStore {
    MemoryStore::new()
}
