use crate::cli::actions::{login, logout, server, status, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Server(args) => server::execute(args).await,
        Action::Login(args) => login::execute(args).await,
        Action::Logout(globals) => logout::execute(&globals).await,
        Action::Status(args) => status::execute(&args),
    }
}
