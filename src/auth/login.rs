use super::{
    client::AuthApi,
    types::{LoginRequest, UserIdentity},
    InFlight,
};
use crate::{
    credentials::{CredentialVault, RememberedCredential},
    navigation::Navigator,
    routes::RouteTable,
    session::SessionStore,
};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, instrument, warn};

pub const MISSING_FIELDS: &str = "Email and password are required.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const GENERIC_FAILURE: &str = "Login failed. Please check your credentials.";
pub const SESSION_SAVE_FAILURE: &str = "Unable to save your session. Please try again.";

/// Values submitted by the login form.
#[derive(Clone, Debug)]
pub struct LoginForm {
    pub identifier: String,
    pub secret: SecretString,
    pub remember: bool,
}

impl LoginForm {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>, remember: bool) -> Self {
        Self {
            identifier: identifier.into(),
            secret: SecretString::from(secret.into()),
            remember,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoginOutcome {
    /// Session saved; a full reload to `landing` has been issued.
    Authenticated {
        landing: String,
        user: Option<UserIdentity>,
    },
    /// Text for the login form. Nothing was written.
    Rejected { message: String },
    /// Another submission from this form is still pending.
    InFlight,
}

pub struct LoginFlow<A: AuthApi, N: Navigator> {
    api: A,
    session: SessionStore,
    vault: CredentialVault,
    navigator: N,
    routes: RouteTable,
    in_flight: AtomicBool,
}

impl<A: AuthApi, N: Navigator> LoginFlow<A, N> {
    pub fn new(
        api: A,
        session: SessionStore,
        vault: CredentialVault,
        navigator: N,
        routes: RouteTable,
    ) -> Self {
        Self {
            api,
            session,
            vault,
            navigator,
            routes,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Remembered credentials for pre-filling the form on mount.
    #[must_use]
    pub fn prefill(&self) -> Option<RememberedCredential> {
        self.vault.read()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Authenticate, persist the session, and reload into the console.
    ///
    /// `redirect` is the return destination produced by the edge filter, if any.
    #[instrument(skip_all, fields(remember = form.remember))]
    pub async fn submit(&self, form: &LoginForm, redirect: Option<&str>) -> LoginOutcome {
        let Some(_in_flight) = InFlight::acquire(&self.in_flight) else {
            debug!("Login already in flight");
            return LoginOutcome::InFlight;
        };

        let identifier = form.identifier.trim();
        if let Err(message) = validate(identifier, &form.secret) {
            return rejected(message);
        }

        let request = LoginRequest::new(identifier, form.secret.clone());
        let response = match self.api.login(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!("Login request failed: {err}");
                return rejected(GENERIC_FAILURE);
            }
        };

        let success = response.success;
        let Some(token) = response
            .token
            .filter(|token| success && !token.trim().is_empty())
        else {
            debug!("Login rejected by auth service");
            let message = response
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return LoginOutcome::Rejected { message };
        };

        if let Err(err) = self.session.save(token.trim()) {
            error!("Failed to save session: {err}");
            return rejected(SESSION_SAVE_FAILURE);
        }

        let remembered = if form.remember {
            self.vault.save(identifier, &form.secret)
        } else {
            self.vault.clear()
        };
        if let Err(err) = remembered {
            warn!("Failed to update remembered credentials: {err}");
        }

        let landing = self.routes.return_destination(redirect);
        info!("Login succeeded, reloading into {landing}");
        self.navigator.reload(&landing);

        LoginOutcome::Authenticated {
            landing,
            user: response.user,
        }
    }
}

fn validate(identifier: &str, secret: &SecretString) -> Result<(), &'static str> {
    if identifier.is_empty() || secret.expose_secret().trim().is_empty() {
        return Err(MISSING_FIELDS);
    }
    if !valid_email(identifier) {
        return Err(INVALID_EMAIL);
    }
    Ok(())
}

fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

fn rejected(message: &str) -> LoginOutcome {
    LoginOutcome::Rejected {
        message: message.to_string(),
    }
}
