use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

// Bounded so a dead database turns into an error instead of a stuck request.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the connection pool sized from [`Config`].
pub async fn create_pool(config: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}
