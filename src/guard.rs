//! Client-side render guard for protected page content.
//!
//! The edge filter only knows the cookie exists; this guard decodes the
//! client-store copy and checks its expiry before any protected content is
//! produced. The check is synchronous and never touches the network.

use crate::{navigation::Navigator, session::SessionStore};
use tracing::{debug, error};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    Unchecked,
    Checking,
    Authorized,
    /// Terminal until the guard is mounted again.
    Redirecting,
}

pub struct RenderGuard<N: Navigator> {
    session: SessionStore,
    navigator: N,
    login_path: String,
    state: GuardState,
    mounted: bool,
}

impl<N: Navigator> RenderGuard<N> {
    pub fn new(session: SessionStore, navigator: N, login_path: impl Into<String>) -> Self {
        Self {
            session,
            navigator,
            login_path: login_path.into(),
            state: GuardState::Unchecked,
            mounted: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> GuardState {
        self.state
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Mount (or remount after a navigation completed) and check the session.
    pub fn mount(&mut self) -> GuardState {
        self.mounted = true;
        self.state = GuardState::Unchecked;
        self.check()
    }

    /// Re-check on a navigation inside the guarded subtree.
    pub fn on_navigation(&mut self) -> GuardState {
        self.check()
    }

    /// Render the wrapped content, or nothing while unauthorized.
    pub fn render<T>(&mut self, children: impl FnOnce() -> T) -> Option<T> {
        if !self.mounted {
            return None;
        }
        match self.check() {
            GuardState::Authorized => Some(children()),
            _ => None,
        }
    }

    /// After unmount no check may navigate or write to the session store.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    fn check(&mut self) -> GuardState {
        if !self.mounted || self.state == GuardState::Redirecting {
            return self.state;
        }

        self.state = GuardState::Checking;
        if self.session.is_valid() {
            self.state = GuardState::Authorized;
            return self.state;
        }

        debug!("Session missing or expired, redirecting to {}", self.login_path);
        // Soft-expiry eviction: drop a stale token from both locations.
        if let Err(err) = self.session.clear() {
            error!("Failed to evict stale session: {err}");
        }
        self.state = GuardState::Redirecting;
        self.navigator.navigate(&self.login_path);
        self.state
    }
}
