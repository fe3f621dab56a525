//! CLI command definitions and dispatch.

pub mod migrate;
pub mod notifications;
pub mod requests;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};

use portfoliofy_core::config::AppConfig;
use portfoliofy_core::error::AppError;
use portfoliofy_core::events::EventBus;
use portfoliofy_database::{DatabasePool, Stores};
use portfoliofy_service::Services;

use crate::output::OutputFormat;

/// Portfoliofy: portfolios with owner-approved access
#[derive(Debug, Parser)]
#[command(name = "portfoliofy", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(short, long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to load (defaults to $PORTFOLIOFY_ENV or "development")
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the Portfoliofy server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Access requests
    Requests(requests::RequestsArgs),
    /// Notifications
    Notifications(notifications::NotificationsArgs),
}

impl Cli {
    /// Whether this invocation runs the server.
    pub fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve(_))
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config, self.format).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Requests(args) => requests::execute(args, &config, self.format).await,
            Commands::Notifications(args) => {
                notifications::execute(args, &config, self.format).await
            }
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        let env = self.env.clone().unwrap_or_else(|| {
            std::env::var("PORTFOLIOFY_ENV").unwrap_or_else(|_| "development".to_string())
        });
        AppConfig::load(&self.config_dir, &env)
    }
}

/// Helper: connect to PostgreSQL regardless of the configured backend
pub async fn connect_postgres(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

/// Helper: open the configured backend and wire services over it
pub async fn open_services(config: &AppConfig) -> Result<Services, AppError> {
    let (stores, _pool) = Stores::connect(&config.database).await?;
    Ok(Services::new(
        &stores,
        config,
        EventBus::new(config.notifications.channel_capacity),
    ))
}
