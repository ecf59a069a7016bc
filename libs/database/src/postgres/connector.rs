use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::{error, info};

use super::PostgresConfig;
use crate::common::{RetryConfig, retry, retry_with_backoff};

/// Open a pool with [`PostgresConfig`] defaults
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_from_config(PostgresConfig::new(database_url)).await
}

pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

/// Open a pool and verify it with a ping before handing it out.
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    db.ping().await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Connect, retrying with backoff. `None` uses [`RetryConfig::default`].
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();
    let attempt = || connect_with_options(options.clone());

    match retry_config {
        Some(policy) => retry_with_backoff(attempt, policy).await,
        None => retry(attempt).await,
    }
}

/// Close the pool, logging the outcome.
pub async fn close(db: DatabaseConnection) {
    match db.close().await {
        Ok(()) => info!("PostgreSQL pool closed"),
        Err(e) => error!(error = %e, "Error closing PostgreSQL pool"),
    }
}
