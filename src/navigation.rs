use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Page navigation as seen by client code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Client-side route transition; no new request reaches the edge filter.
    Client(String),
    /// Full page load; the edge filter sees the current cookie.
    Reload(String),
}

impl Navigation {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Client(path) | Self::Reload(path) => path,
        }
    }
}

/// Fire-and-forget navigation; nothing waits for it to complete.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
    fn reload(&self, path: &str);
}

/// Navigator that records every request in order.
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<Navigation>>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<Navigation> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<Navigation> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn push(&self, navigation: Navigation) {
        debug!("Navigation requested: {navigation:?}");
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(navigation);
    }
}

impl Navigator for History {
    fn navigate(&self, path: &str) {
        self.push(Navigation::Client(path.to_string()));
    }

    fn reload(&self, path: &str) {
        self.push(Navigation::Reload(path.to_string()));
    }
}

impl<N: Navigator + ?Sized> Navigator for std::sync::Arc<N> {
    fn navigate(&self, path: &str) {
        (**self).navigate(path);
    }

    fn reload(&self, path: &str) {
        (**self).reload(path);
    }
}
