//! Shared PostgreSQL pool
//!
//! Built once by the CLI and handed to `ProcedureRepo`. Every store call
//! borrows one connection for a single statement, so a handful of
//! connections serves any number of concurrent requests.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool size used when `--max-connections` is not given.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connect to `database_url` with [`DEFAULT_MAX_CONNECTIONS`].
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect to `database_url`, capping the pool at `max_connections`.
///
/// Fails if the first connection cannot be established, so a bad URL is
/// reported at startup instead of on the first request.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    tracing::info!(max_connections, "Connected to procedure database");
    Ok(pool)
}
