//! Session CLI commands: login, logout, whoami.

use clap::Args;
use dialoguer::{Input, Password};

use invex_client::BackendApi;
use invex_core::error::AppError;
use invex_policy::AccessPolicy;

use crate::output::print_success;

use super::Context;

/// Arguments for login
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email; prompted for when omitted
    #[arg(long)]
    pub email: Option<String>,
}

/// Log in, persist the issued tokens, and show the landing route.
pub async fn login(args: &LoginArgs, ctx: &Context) -> Result<(), AppError> {
    let email = match &args.email {
        Some(email) => email.clone(),
        None => Input::<String>::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;

    let tokens = ctx.api.login(&email, &password).await?;
    ctx.oracle.establish(&tokens).await?;

    let role = ctx.oracle.current_role().await?;
    let landing = AccessPolicy::landing_route(role);
    match role {
        Some(role) => print_success(&format!("Logged in as {role}; landing at {landing}")),
        None => print_success(&format!("Logged in; landing at {landing}")),
    }
    Ok(())
}

/// Announce logout to the backend (best-effort) and clear both slots.
pub async fn logout(ctx: &Context) -> Result<(), AppError> {
    ctx.api.logout().await?;
    ctx.oracle.clear().await?;
    print_success("Logged out");
    Ok(())
}

/// Show the current session state.
pub async fn whoami(ctx: &Context) -> Result<(), AppError> {
    if !ctx.oracle.is_authenticated().await? {
        println!("Not logged in.");
        return Ok(());
    }

    let claims = ctx.oracle.claims().await?;
    let role = ctx.oracle.current_role().await?;
    let subject = claims
        .and_then(|c| c.sub)
        .unwrap_or_else(|| "<unknown>".to_string());
    match role {
        Some(role) => println!("{subject} ({role})"),
        None => println!("{subject} (no recognized role)"),
    }
    Ok(())
}
