use crate::{auth::HttpAuthClient, routes::RouteTable, storage::Profile};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub auth_url: Option<String>,
    pub profile_dir: PathBuf,
    pub routes: RouteTable,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(profile_dir: impl Into<PathBuf>) -> Self {
        Self {
            auth_url: None,
            profile_dir: profile_dir.into(),
            routes: RouteTable::default(),
        }
    }

    /// The file-backed client profile (cookie jar and persistent store).
    #[must_use]
    pub fn profile(&self) -> Profile {
        Profile::open(&self.profile_dir)
    }

    /// # Errors
    /// Returns an error if the auth service URL is missing or invalid.
    pub fn auth_client(&self) -> Result<HttpAuthClient> {
        let url = self
            .auth_url
            .as_deref()
            .context("missing required argument: --auth-url")?;
        HttpAuthClient::new(url).context("invalid CONSOLE_AUTH_URL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(".console-gate");
        assert_eq!(args.profile_dir, PathBuf::from(".console-gate"));
        assert_eq!(args.routes, RouteTable::default());
        assert!(args.auth_client().is_err());
    }

    #[test]
    fn test_auth_client() {
        let mut args = GlobalArgs::new(".console-gate");
        args.auth_url = Some("https://api.console.dev".to_string());
        let client = args.auth_client().unwrap();
        assert_eq!(
            client.login_url().as_str(),
            "https://api.console.dev/auth/login"
        );
    }
}
