//! Pending user approval CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use invex_client::BackendApi;
use invex_core::error::AppError;
use invex_core::types::UserId;
use invex_entity::user::PendingUser;
use invex_policy::Route;
use invex_workflow::PendingUserQueue;

use crate::output::{self, OutputFormat};

use super::{Context, confirm};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UsersArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UsersCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List pending signups
    List,
    /// Approve a pending signup
    Approve {
        /// User id
        id: String,
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Reject a pending signup
    Reject {
        /// User id
        id: String,
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },
}

/// Pending user display row
#[derive(Debug, Serialize, Tabled)]
struct PendingUserRow {
    /// User ID
    id: String,
    /// Name
    name: String,
    /// Email
    email: String,
    /// Requested role
    role: String,
    /// Submitted
    submitted: String,
}

impl From<&PendingUser> for PendingUserRow {
    fn from(user: &PendingUser) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user
                .requested_role
                .map(|r| r.to_string())
                .unwrap_or_else(|| "—".to_string()),
            submitted: user.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands behind the pending-users route.
pub async fn execute(
    args: &UsersArgs,
    ctx: &Context,
    format: OutputFormat,
) -> Result<(), AppError> {
    ctx.ensure_route(&Route::PendingUsers).await?;
    let role = ctx.require_role().await?;
    let api: Arc<dyn BackendApi> = Arc::clone(&ctx.api) as Arc<dyn BackendApi>;
    let queue = PendingUserQueue::new(api, role);
    queue.refresh().await?;

    match &args.command {
        UsersCommand::List => {
            let rows: Vec<PendingUserRow> =
                queue.snapshot().iter().map(PendingUserRow::from).collect();
            output::print_list(&rows, format);
            Ok(())
        }
        UsersCommand::Approve { id, yes } => {
            let id = UserId::from(id.as_str());
            if !confirm(*yes, &format!("Approve pending user {id}?"))? {
                return Ok(());
            }
            queue.approve(&id).await?;
            output::print_success(&format!("Approved pending user {id}"));
            Ok(())
        }
        UsersCommand::Reject { id, yes } => {
            let id = UserId::from(id.as_str());
            if !confirm(*yes, &format!("Reject pending user {id}? This removes the request."))? {
                return Ok(());
            }
            queue.reject(&id).await?;
            output::print_success(&format!("Rejected pending user {id}"));
            Ok(())
        }
    }
}
