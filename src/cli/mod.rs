pub mod commands;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "edu-api-rust")]
#[command(about = "Education platform API - server and administration commands")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve {
        #[arg(long, help = "Listen port (overrides APP_SERVER_PORT)")]
        port: Option<u16>,

        #[arg(long, help = "Apply pending migrations before serving")]
        migrate: bool,
    },

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,

    #[command(about = "Create an admin account directly in the database")]
    CreateAdmin {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        class: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Serve { port, migrate } => commands::serve::handle(port, migrate).await,
        Commands::Migrate => commands::migrate::handle(output_format).await,
        Commands::CreateAdmin {
            name,
            email,
            password,
            class,
        } => {
            let request = commands::admin::admin_request(name, email, password, class);
            commands::admin::handle(request, output_format).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_flags() {
        let cli = Cli::try_parse_from(["edu-api-rust", "serve", "--port", "9090", "--migrate"]).unwrap();
        match cli.command {
            Commands::Serve { port, migrate } => {
                assert_eq!(port, Some(9090));
                assert!(migrate);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn create_admin_requires_credentials() {
        assert!(Cli::try_parse_from(["edu-api-rust", "create-admin", "--name", "Root"]).is_err());

        let cli = Cli::try_parse_from([
            "edu-api-rust",
            "--json",
            "create-admin",
            "--name",
            "Root",
            "--email",
            "root@kampus.id",
            "--password",
            "rahasia123",
        ])
        .unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        assert!(matches!(cli.command, Commands::CreateAdmin { class: None, .. }));
    }
}
