//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and the per-connection
//! pragmas the schema depends on. SQLite only enforces `ON DELETE CASCADE`
//! and `ON DELETE SET NULL` while `foreign_keys` is on, so every pooled
//! connection gets it when it is opened.

use std::path::Path;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// URL of a private in-memory database.
pub const MEMORY_DATABASE_URL: &str = ":memory:";

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Pool sizing and lock-wait settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    /// Upper bound on open connections.
    pub max_size: u32,
    /// How long a writer waits on a locked database before failing.
    pub busy_timeout_ms: u32,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: 5,
            busy_timeout_ms: 5000,
        }
    }
}

/// Applies the required pragmas whenever the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        apply_pragmas(conn, self.busy_timeout_ms).map_err(diesel::r2d2::Error::QueryError)
    }
}

fn apply_pragmas(conn: &mut SqliteConnection, busy_timeout_ms: u32) -> QueryResult<()> {
    diesel::sql_query("PRAGMA foreign_keys = ON").execute(conn)?;
    diesel::sql_query(format!("PRAGMA busy_timeout = {busy_timeout_ms}")).execute(conn)?;
    Ok(())
}

/// Build a `sqlite://` URL for a database file.
#[must_use]
pub fn sqlite_database_url(path: &Path) -> String {
    format!("sqlite://{}", path.display())
}

/// Create a connection pool with default options.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    create_pool_with(database_url, PoolOptions::default())
}

/// Create a connection pool for the given database URL.
///
/// Every connection to `:memory:` opens its own empty database, so for that
/// URL the pool is pinned to a single connection that is never recycled.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool_with(database_url: &str, options: PoolOptions) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let customizer = Box::new(SqlitePragmas {
        busy_timeout_ms: options.busy_timeout_ms,
    });

    let builder = Pool::builder().connection_customizer(customizer);
    let builder = if database_url == MEMORY_DATABASE_URL {
        builder.max_size(1).idle_timeout(None).max_lifetime(None)
    } else {
        builder.max_size(options.max_size.max(1))
    };

    let pool = builder
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))?;
    debug!(url = database_url, "Opened SQLite pool");
    Ok(pool)
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool
        .get()
        .map_err(|e| Error::Connection(e.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(e.to_string()))?;
    if !applied.is_empty() {
        info!(count = applied.len(), "Applied database migrations");
    }
    Ok(())
}

/// Open a pool and bring the schema up to date.
///
/// # Errors
/// Returns an error if the pool cannot be created or migrations fail.
pub fn open(database_url: &str, options: PoolOptions) -> Result<DbPool> {
    let pool = create_pool_with(database_url, options)?;
    run_migrations(&pool)?;
    Ok(pool)
}
