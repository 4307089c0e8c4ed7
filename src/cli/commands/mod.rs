pub mod admin;
pub mod migrate;
pub mod serve;

use anyhow::Context;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::database::DatabaseManager;

/// Load config from the environment and open the pool; shared by every command
pub(crate) async fn connect() -> anyhow::Result<(AppConfig, PgPool)> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    Ok((config, pool))
}
