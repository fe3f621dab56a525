//! Notification inspection commands.

use std::str::FromStr;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use portfoliofy_core::config::AppConfig;
use portfoliofy_core::error::AppError;
use portfoliofy_entity::notification::{Notification, NotificationFilter};
use portfoliofy_service::RequestContext;

use crate::output::{self, OutputFormat};

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotificationsArgs {
    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotificationsCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotificationsCommand {
    /// List a user's notifications, newest first
    List {
        /// Username whose inbox to show
        #[arg(short, long)]
        user: String,
        /// all, unread, read, access, or portfolio_view
        #[arg(long, default_value = "all")]
        filter: String,
    },
}

/// Notification display row
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    /// Notification ID
    id: String,
    /// Kind
    kind: String,
    /// Title
    title: String,
    /// Read
    read: bool,
    /// Created at
    created_at: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            kind: n.kind.to_string(),
            title: n.title.clone(),
            read: n.is_read,
            created_at: output::timestamp(n.created_at),
        }
    }
}

/// Execute notification commands
pub async fn execute(
    args: &NotificationsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::open_services(config).await?;

    match &args.command {
        NotificationsCommand::List { user, filter } => {
            let filter = NotificationFilter::from_str(filter)?;
            let user = services.users.find_by_username(user).await?;

            let ctx = RequestContext::new(user.id, user.username.clone());
            let notifications = services
                .notifications
                .list_for_user(&ctx, filter, None)
                .await?;
            let unread = services.notifications.unread_count(&ctx).await?;

            let rows: Vec<NotificationRow> =
                notifications.iter().map(NotificationRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                output::print_kv("Unread", &unread.to_string());
            }
        }
    }

    Ok(())
}
