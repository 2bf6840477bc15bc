use crate::error::DbError;
use dotenvy::dotenv;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::env;
use std::time::Duration;

/// Pool settings for `connect` and `connect_lazy`.
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    pub max_connections: u32,
    /// How long a query waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

fn database_url() -> Result<String, DbError> {
    // A missing .env file is fine as long as DATABASE_URL is set some other way.
    dotenv().ok();

    env::var("DATABASE_URL")
        .map_err(|_e| DbError::ConnectionConfigError("DATABASE_URL must be set.".to_string()))
}

fn pool_options(options: &ConnectionOptions) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(options.max_connections)
        .acquire_timeout(options.acquire_timeout)
}

/// Establishes a connection pool to the PostgreSQL results store.
///
/// This function reads the `DATABASE_URL` from the environment (a `.env` file is
/// loaded first if present), creates a connection pool with the given settings,
/// and returns it.
pub async fn connect(options: &ConnectionOptions) -> Result<PgPool, DbError> {
    let pool = pool_options(options).connect(&database_url()?).await?;

    tracing::debug!(max_connections = options.max_connections, "Connected to results database.");
    Ok(pool)
}

/// Creates a pool that connects on first use.
///
/// An unreachable database then surfaces as a failed query rather than a
/// startup error.
pub fn connect_lazy(options: &ConnectionOptions) -> Result<PgPool, DbError> {
    Ok(pool_options(options).connect_lazy(&database_url()?)?)
}

/// Applies the bundled migrations, creating `lifting_results` if it does not exist.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
