//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use portfoliofy_core::config::AppConfig;
use portfoliofy_core::error::AppError;
use portfoliofy_entity::user::User;
use portfoliofy_service::RegisterUser;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List,
    /// Create a user, applying the registration password policy
    Create {
        /// Username
        username: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Password
        #[arg(long)]
        password: String,
        /// Full name
        #[arg(long)]
        full_name: Option<String>,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Email
    email: String,
    /// Full name
    full_name: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            email: u.email.clone(),
            full_name: output::or_dash(u.full_name.as_deref()),
            created_at: output::timestamp(u.created_at),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::open_services(config).await?;

    match &args.command {
        UserCommand::List => {
            let users = services.users.list().await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
        UserCommand::Create {
            username,
            email,
            password,
            full_name,
        } => {
            let user = services
                .users
                .register(RegisterUser {
                    username: username.clone(),
                    email: email.clone(),
                    password: password.clone(),
                    full_name: full_name.clone(),
                })
                .await?;
            output::print_success(&format!("User '{}' created", user.username));
            output::print_kv("ID", &user.id.to_string());
        }
    }

    Ok(())
}
