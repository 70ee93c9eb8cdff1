use crate::{
    auth::{LogoutFlow, LogoutOutcome},
    cli::globals::GlobalArgs,
    navigation::History,
    session::SessionStore,
};
use anyhow::{bail, Result};
use std::sync::Arc;

/// Sign out. The local session is cleared even if the auth service fails.
/// # Errors
/// Returns an error if the auth service is not configured.
pub async fn execute(globals: &GlobalArgs) -> Result<()> {
    let profile = globals.profile();
    let flow = LogoutFlow::new(
        globals.auth_client()?,
        SessionStore::from_profile(&profile),
        Arc::new(History::new()),
        globals.routes.login_path.clone(),
    );

    match flow.submit().await {
        LogoutOutcome::SignedOut => {
            println!("Signed out, continue at {}", globals.routes.login_path);
            Ok(())
        }
        LogoutOutcome::InFlight => bail!("a logout is already in progress"),
    }
}
