//! Navigation check command.

use clap::Args;

use invex_core::error::AppError;
use invex_policy::{Route, RouteDecision};

use super::Context;

/// Arguments for the open command
#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Navigation path, e.g. /admin/transaction-approvals
    pub path: String,
}

/// Resolve a navigation path against the access policy and report the
/// decision the web console would act on.
pub async fn open(args: &OpenArgs, ctx: &Context) -> Result<(), AppError> {
    let route = Route::from_path(&args.path);
    match ctx.guard.resolve(&route).await? {
        RouteDecision::Allow => println!("Allow: {route}"),
        RouteDecision::Redirect { target, preserved } => match preserved {
            Some(from) => println!("Redirect to {target} (will return to {from} after login)"),
            None => println!("Redirect to {target}"),
        },
    }
    Ok(())
}
