//! Access-request inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use portfoliofy_core::config::AppConfig;
use portfoliofy_core::error::AppError;
use portfoliofy_entity::access_request::AccessRequest;

use crate::output::{self, OutputFormat};

/// Arguments for request commands
#[derive(Debug, Args)]
pub struct RequestsArgs {
    /// Request subcommand
    #[command(subcommand)]
    pub command: RequestsCommand,
}

/// Request subcommands
#[derive(Debug, Subcommand)]
pub enum RequestsCommand {
    /// List access requests, newest first
    List {
        /// Only requests for this portfolio
        #[arg(short, long)]
        portfolio: Option<Uuid>,
    },
}

/// Access request display row
#[derive(Debug, Serialize, Tabled)]
struct RequestRow {
    /// Request ID
    id: String,
    /// Portfolio
    portfolio_id: String,
    /// Requester
    requester_id: String,
    /// Status
    status: String,
    /// Message
    message: String,
    /// Created at
    created_at: String,
    /// Decided at
    decided_at: String,
}

impl From<&AccessRequest> for RequestRow {
    fn from(r: &AccessRequest) -> Self {
        Self {
            id: r.id.to_string(),
            portfolio_id: r.portfolio_id.to_string(),
            requester_id: r.requester_id.to_string(),
            status: r.status.to_string(),
            message: output::or_dash(r.message.as_deref()),
            created_at: output::timestamp(r.created_at),
            decided_at: output::or_dash(r.decided_at.map(output::timestamp)),
        }
    }
}

/// Execute request commands
pub async fn execute(
    args: &RequestsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::open_services(config).await?;

    match &args.command {
        RequestsCommand::List { portfolio } => {
            let requests = services.access_requests.list_all(*portfolio).await?;
            let rows: Vec<RequestRow> = requests.iter().map(RequestRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
