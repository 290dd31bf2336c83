use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use crate::error::AppResult;

pub type DbPool = SqlitePool;

/// Create the SQLite pool backing the local store.
///
/// The store is scoped to a single client, so one connection is enough. An
/// in-memory database lives exactly as long as its connection, which must
/// therefore never be reaped.
pub async fn create_pool(database_url: &str) -> AppResult<DbPool> {
    let mut options = SqlitePoolOptions::new().max_connections(1);
    if database_url.contains(":memory:") || database_url.contains("mode=memory") {
        options = options.idle_timeout(None).max_lifetime(None);
    }
    let pool = options.connect(database_url).await?;
    Ok(pool)
}

/// Apply the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> AppResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
