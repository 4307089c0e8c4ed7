use serde_json::json;

use crate::cli::OutputFormat;
use crate::database::DatabaseManager;

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let (_config, pool) = super::connect().await?;
    DatabaseManager::migrate(&pool).await?;
    DatabaseManager::close(pool).await;

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "migrated": true })),
        OutputFormat::Text => println!("Migrations applied"),
    }
    Ok(())
}
