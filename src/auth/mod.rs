//! Login and logout lifecycle. Both flows end in a full page reload so the
//! edge filter, which only sees cookies on a fresh request, observes the new
//! session state. This module handles secrets and must never log them.

pub mod client;
mod login;
mod logout;
pub mod types;

pub use client::{AuthApi, HttpAuthClient};
pub use login::{LoginFlow, LoginForm, LoginOutcome};
pub use logout::{LogoutFlow, LogoutOutcome};

use std::sync::atomic::{AtomicBool, Ordering};

/// Loading flag held for the duration of one network round trip.
///
/// Released on drop, so an abandoned future frees the control as well.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
