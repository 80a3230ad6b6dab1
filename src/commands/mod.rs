//! CLI command definitions and dispatch.

pub mod requests;
pub mod route;
pub mod session;
pub mod users;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use invex_auth::SessionOracle;
use invex_auth::store::FileCredentialStore;
use invex_client::HttpBackend;
use invex_core::config::AppConfig;
use invex_core::error::AppError;
use invex_core::traits::CredentialStore;
use invex_entity::user::Role;
use invex_policy::{Route, RouteDecision, RouteGuard};

use crate::output::{OutputFormat, print_warning};

/// Invex — administrative console for investment operations
#[derive(Debug, Parser)]
#[command(name = "invex", version, about, long_about = None)]
pub struct Cli {
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
    /// Log in and persist the session
    Login(session::LoginArgs),
    /// Clear the persisted session
    Logout,
    /// Show the current session
    Whoami,
    /// Check where a navigation path would lead
    Open(route::OpenArgs),
    /// Deposit/withdrawal approvals
    Requests(requests::RequestsArgs),
    /// Pending user approvals
    Users(users::UsersArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let ctx = Context::new(config)?;
        match &self.command {
            Commands::Login(args) => session::login(args, &ctx).await,
            Commands::Logout => session::logout(&ctx).await,
            Commands::Whoami => session::whoami(&ctx).await,
            Commands::Open(args) => route::open(args, &ctx).await,
            Commands::Requests(args) => requests::execute(args, &ctx, self.format).await,
            Commands::Users(args) => users::execute(args, &ctx, self.format).await,
        }
    }
}

/// Shared wiring for every command: the durable credential store, the
/// backend client reading it, the oracle, and the route guard.
pub struct Context {
    pub api: Arc<HttpBackend>,
    pub oracle: SessionOracle,
    pub guard: RouteGuard,
}

impl Context {
    fn new(config: &AppConfig) -> Result<Self, AppError> {
        let store: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::new(&config.session.credentials_file));
        let api = Arc::new(HttpBackend::new(&config.api, Arc::clone(&store))?);
        let oracle = SessionOracle::new(store);
        let guard = RouteGuard::new(oracle.clone());
        Ok(Self { api, oracle, guard })
    }

    /// Re-run the access policy for the screen a command belongs to, the
    /// way the web console does before rendering a guarded page.
    pub async fn ensure_route(&self, route: &Route) -> Result<(), AppError> {
        match self.guard.resolve(route).await? {
            RouteDecision::Allow => Ok(()),
            RouteDecision::Redirect { target, .. } => {
                print_warning(&format!("Access to {route} denied; redirecting to {target}"));
                Err(AppError::authorization(format!(
                    "Access to {route} requires a different role"
                )))
            }
        }
    }

    /// The current session's role, required for workflow commands.
    pub async fn require_role(&self) -> Result<Role, AppError> {
        self.oracle
            .current_role()
            .await?
            .ok_or_else(|| AppError::authentication("Not logged in"))
    }
}

/// Prompt for confirmation unless `--yes` was passed.
pub fn confirm(skip: bool, prompt: &str) -> Result<bool, AppError> {
    if skip {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))
}
