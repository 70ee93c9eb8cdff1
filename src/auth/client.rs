//! Remote authentication collaborator.
//!
//! The core only needs two calls: exchange credentials for a token, and a
//! best-effort logout notification.

use super::types::{LoginRequest, LoginResponse};
use crate::{AppError, APP_USER_AGENT};
use reqwest::{Client, StatusCode};
use std::{future::Future, sync::Arc, time::Duration};
use tracing::{debug, instrument};
use url::Url;

pub const LOGIN_ENDPOINT: &str = "auth/login";
pub const LOGOUT_ENDPOINT: &str = "auth/logout";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub trait AuthApi: Send + Sync {
    /// Exchange identifier and secret for a session token.
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<LoginResponse, AppError>> + Send;

    /// Notify the service that the session ends. Callers ignore failures.
    fn logout(&self, token: Option<&str>) -> impl Future<Output = Result<(), AppError>> + Send;
}

impl<T: AuthApi> AuthApi for Arc<T> {
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<LoginResponse, AppError>> + Send {
        (**self).login(request)
    }

    fn logout(&self, token: Option<&str>) -> impl Future<Output = Result<(), AppError>> + Send {
        (**self).logout(token)
    }
}

/// JSON-over-HTTP implementation of [`AuthApi`].
#[derive(Clone, Debug)]
pub struct HttpAuthClient {
    client: Client,
    login_url: Url,
    logout_url: Url,
}

impl HttpAuthClient {
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(AppError::Config("Auth service URL is not configured.".to_string()));
        }

        let mut base = Url::parse(base_url)
            .map_err(|err| AppError::Config(format!("Invalid auth service URL: {err}")))?;
        // Keep the last path segment when joining endpoints.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let join = |endpoint: &str| {
            base.join(endpoint)
                .map_err(|err| AppError::Config(format!("Invalid auth endpoint {endpoint}: {err}")))
        };

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            login_url: join(LOGIN_ENDPOINT)?,
            logout_url: join(LOGOUT_ENDPOINT)?,
        })
    }

    #[must_use]
    pub fn login_url(&self) -> &Url {
        &self.login_url
    }
}

impl AuthApi for HttpAuthClient {
    #[instrument(skip_all, fields(url = %self.login_url))]
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        let response = self
            .client
            .post(self.login_url.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Auth service answered {status}");

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|err| AppError::Parse(err.to_string()));
        }

        // Rejections usually carry a message meant for the login form.
        match serde_json::from_str::<LoginResponse>(&body) {
            Ok(parsed) if parsed.message.as_deref().is_some_and(|m| !m.trim().is_empty()) => {
                Ok(LoginResponse {
                    success: false,
                    token: None,
                    ..parsed
                })
            }
            _ => Err(http_error(status, &body)),
        }
    }

    #[instrument(skip_all, fields(url = %self.logout_url))]
    async fn logout(&self, token: Option<&str>) -> Result<(), AppError> {
        let mut request = self.client.post(self.logout_url.clone());
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(http_error(status, &body))
        }
    }
}

fn http_error(status: StatusCode, body: &str) -> AppError {
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        body.trim().chars().take(200).collect()
    };
    AppError::Http {
        status: status.as_u16(),
        message,
    }
}
