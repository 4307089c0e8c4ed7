use anyhow::Context;
use serde_json::json;

use crate::api::{CreateUserRequest, UserResponse};
use crate::cli::OutputFormat;
use crate::database::DatabaseManager;
use crate::database::models::Role;
use crate::state::AppState;

pub fn admin_request(name: String, email: String, password: String, class: Option<String>) -> CreateUserRequest {
    CreateUserRequest {
        name,
        email,
        password,
        class,
        birthday: None,
    }
}

/// Bootstrap an admin without going through the admin-only HTTP route
pub async fn handle(request: CreateUserRequest, output_format: OutputFormat) -> anyhow::Result<()> {
    if let Err(fields) = request.validate() {
        let mut problems: Vec<String> = fields.into_iter().map(|(f, m)| format!("{}: {}", f, m)).collect();
        problems.sort();
        anyhow::bail!("invalid admin account: {}", problems.join(", "));
    }

    let (config, pool) = super::connect().await?;
    let state = AppState::from_pool(config, pool.clone())?;

    let admin = state
        .users
        .register(request, Role::Admin)
        .await
        .context("failed to create admin")?;
    let admin = UserResponse::from(admin);

    DatabaseManager::close(pool).await;

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "created": admin })),
        OutputFormat::Text => println!("Created admin {} <{}> (ID {})", admin.name, admin.email, admin.id),
    }
    Ok(())
}
