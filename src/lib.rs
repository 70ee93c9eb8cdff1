//! # Console Gate (session gate for the operations console)
//!
//! `console-gate` owns the authentication boundary of the retail operations
//! console. The console pages themselves (catalog, stores, orders, pricing) are
//! opaque to this crate; what it provides is the session model and the two
//! independent enforcement points that must agree on it.
//!
//! ## Session model
//!
//! A session is a signed, expiry-bearing token issued by the remote auth
//! service. The [`session::SessionStore`] writes it to two places at once: the
//! `auth_token` cookie (visible to the server on the next request) and the
//! client-persistent store (visible to client code without a request).
//!
//! ## Enforcement
//!
//! - **Edge filter** ([`console::filter`]): runs before any page is served and
//!   only checks cookie *presence*. Protected paths without a cookie bounce to
//!   `/login?redirect=<path>`; `/login` with a cookie bounces to the landing page.
//! - **Render guard** ([`guard::RenderGuard`]): re-validates the client-store
//!   copy (decode + expiry) on mount and on navigation. It is the authoritative
//!   validity check and evicts expired sessions.
//!
//! ## Flows
//!
//! [`auth::LoginFlow`] and [`auth::LogoutFlow`] finish with a full page reload so
//! the edge filter observes the new cookie state. "Remember me" credentials live
//! in [`credentials::CredentialVault`] with their own lifecycle, separate from
//! the session.

pub mod auth;
pub mod cli;
pub mod console;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod navigation;
pub mod routes;
pub mod session;
pub mod storage;

pub use error::AppError;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with("console-gate/"));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
