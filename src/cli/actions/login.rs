use crate::{
    auth::{LoginFlow, LoginForm, LoginOutcome},
    cli::globals::GlobalArgs,
    credentials::CredentialVault,
    navigation::History,
    session::SessionStore,
};
use anyhow::{bail, Result};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub email: Option<String>,
    pub password: Option<SecretString>,
    pub remember: bool,
    pub redirect: Option<String>,
}

/// Sign in with the given or remembered credentials.
///
/// Remembered credentials pre-fill missing values and keep "remember me"
/// checked, the same way the login form does on mount.
/// # Errors
/// Returns an error if the auth service is not configured or the login is rejected.
pub async fn execute(args: Args) -> Result<()> {
    let profile = args.globals.profile();
    let history = Arc::new(History::new());
    let flow = LoginFlow::new(
        args.globals.auth_client()?,
        SessionStore::from_profile(&profile),
        CredentialVault::from_profile(&profile),
        history.clone(),
        args.globals.routes.clone(),
    );

    let remembered = flow.prefill();
    debug!("Remembered credentials present: {}", remembered.is_some());

    let form = LoginForm {
        remember: args.remember || remembered.is_some(),
        identifier: args
            .email
            .or_else(|| remembered.as_ref().map(|c| c.identifier.clone()))
            .unwrap_or_default(),
        secret: args
            .password
            .or_else(|| remembered.map(|c| c.secret))
            .unwrap_or_else(|| SecretString::from(String::new())),
    };

    match flow.submit(&form, args.redirect.as_deref()).await {
        LoginOutcome::Authenticated { landing, user } => {
            let who = user
                .and_then(|user| user.name.or(user.email))
                .map(|name| format!(" as {name}"))
                .unwrap_or_default();
            println!("Signed in{who}, continue at {landing}");
            Ok(())
        }
        LoginOutcome::Rejected { message } => bail!(message),
        LoginOutcome::InFlight => bail!("a login is already in progress"),
    }
}
