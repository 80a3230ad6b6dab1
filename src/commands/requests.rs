//! Deposit/withdrawal approval CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use invex_client::BackendApi;
use invex_core::error::AppError;
use invex_core::types::RequestId;
use invex_entity::request::{FinancialRequest, RequestKind, StatusFilter};
use invex_policy::Route;
use invex_workflow::ApprovalWorkflow;

use crate::output::{self, OutputFormat};

use super::{Context, confirm};

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
    /// List requests of one kind
    List {
        /// Request kind
        #[arg(long, value_enum, default_value = "deposit")]
        kind: KindArg,
        /// Status filter, applied client-side
        #[arg(long, value_enum, default_value = "all")]
        status: StatusArg,
    },
    /// Approve a pending request
    Approve {
        /// Request kind
        #[arg(long, value_enum)]
        kind: KindArg,
        /// Request id
        id: String,
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Reject a pending request
    Reject {
        /// Request kind
        #[arg(long, value_enum)]
        kind: KindArg,
        /// Request id
        id: String,
        /// Rejection reason (withdrawals only; blank becomes a placeholder)
        #[arg(long)]
        reason: Option<String>,
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },
}

/// Request kind selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Deposit requests
    Deposit,
    /// Withdrawal requests
    Withdrawal,
}

impl From<KindArg> for RequestKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Deposit => RequestKind::Deposit,
            KindArg::Withdrawal => RequestKind::Withdrawal,
        }
    }
}

/// Status filter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// All statuses
    All,
    /// Pending only
    Pending,
    /// Approved only
    Approved,
    /// Rejected only
    Rejected,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => StatusFilter::All,
            StatusArg::Pending => StatusFilter::Pending,
            StatusArg::Approved => StatusFilter::Approved,
            StatusArg::Rejected => StatusFilter::Rejected,
        }
    }
}

/// Request display row
#[derive(Debug, Serialize, Tabled)]
struct RequestRow {
    /// Request ID
    id: String,
    /// Client
    client: String,
    /// Amount
    amount: String,
    /// Status
    status: String,
    /// Submitted
    submitted: String,
    /// Processed
    processed: String,
}

impl From<&FinancialRequest> for RequestRow {
    fn from(request: &FinancialRequest) -> Self {
        Self {
            id: request.id.to_string(),
            client: request.user_name.clone(),
            amount: format!("{:.2}", request.amount),
            status: request.status.to_string(),
            submitted: request.created_at.format("%Y-%m-%d %H:%M").to_string(),
            processed: request
                .processed_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "—".to_string()),
        }
    }
}

/// Execute request commands behind the transaction-approvals route.
pub async fn execute(
    args: &RequestsArgs,
    ctx: &Context,
    format: OutputFormat,
) -> Result<(), AppError> {
    ctx.ensure_route(&Route::TransactionApprovals).await?;
    let role = ctx.require_role().await?;
    let api: Arc<dyn BackendApi> = Arc::clone(&ctx.api) as Arc<dyn BackendApi>;

    match &args.command {
        RequestsCommand::List { kind, status } => {
            let engine = ApprovalWorkflow::new(api, role, (*kind).into());
            engine.refresh().await?;
            engine.set_filter((*status).into());
            let rows: Vec<RequestRow> = engine.visible().iter().map(RequestRow::from).collect();
            output::print_list(&rows, format);
            Ok(())
        }
        RequestsCommand::Approve { kind, id, yes } => {
            let kind: RequestKind = (*kind).into();
            let id = RequestId::from(id.as_str());
            let engine = ApprovalWorkflow::new(api, role, kind);
            engine.refresh().await?;

            if !confirm(*yes, &format!("Approve {} request {id}?", kind.as_word()))? {
                return Ok(());
            }
            engine.approve(&id).await?;
            output::print_success(&format!("Approved {} request {id}", kind.as_word()));
            Ok(())
        }
        RequestsCommand::Reject { kind, id, reason, yes } => {
            let kind: RequestKind = (*kind).into();
            let id = RequestId::from(id.as_str());
            let engine = ApprovalWorkflow::new(api, role, kind);
            engine.refresh().await?;

            if !confirm(*yes, &format!("Reject {} request {id}?", kind.as_word()))? {
                return Ok(());
            }
            engine.reject(&id, reason.as_deref()).await?;
            output::print_success(&format!("Rejected {} request {id}", kind.as_word()));
            Ok(())
        }
    }
}
