use super::{client::AuthApi, InFlight};
use crate::{navigation::Navigator, session::SessionStore};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, instrument, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// Local session removed; a full reload to the login page has been issued.
    SignedOut,
    /// Another logout from this control is still pending.
    InFlight,
}

pub struct LogoutFlow<A: AuthApi, N: Navigator> {
    api: A,
    session: SessionStore,
    navigator: N,
    login_path: String,
    in_flight: AtomicBool,
}

impl<A: AuthApi, N: Navigator> LogoutFlow<A, N> {
    pub fn new(api: A, session: SessionStore, navigator: N, login_path: impl Into<String>) -> Self {
        Self {
            api,
            session,
            navigator,
            login_path: login_path.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Notify the auth service, then tear the session down locally no matter
    /// what the service said.
    #[instrument(skip_all)]
    pub async fn submit(&self) -> LogoutOutcome {
        let Some(_in_flight) = InFlight::acquire(&self.in_flight) else {
            return LogoutOutcome::InFlight;
        };

        let token = self.session.token().or_else(|| self.session.cookie_token());
        if let Err(err) = self.api.logout(token.as_deref()).await {
            warn!("Logout request failed, clearing local session anyway: {err}");
        }

        if let Err(err) = self.session.clear() {
            error!("Failed to clear session: {err}");
        }

        info!("Signed out, reloading into {}", self.login_path);
        self.navigator.reload(&self.login_path);
        LogoutOutcome::SignedOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::stub::{Reply, StubAuth},
        credentials::CredentialVault,
        navigation::{History, Navigation},
        storage::Profile,
    };
    use secrecy::SecretString;
    use std::sync::{atomic::Ordering, Arc, PoisonError};

    fn setup(api: StubAuth) -> (LogoutFlow<Arc<StubAuth>, Arc<History>>, Arc<StubAuth>, Arc<History>, Profile) {
        let profile = Profile::in_memory();
        let session = SessionStore::from_profile(&profile);
        session.save("header.payload.sig").unwrap();
        let api = Arc::new(api);
        let history = Arc::new(History::new());
        let flow = LogoutFlow::new(api.clone(), session, history.clone(), "/login");
        (flow, api, history, profile)
    }

    #[tokio::test]
    async fn logout_clears_session_and_reloads_login() {
        let (flow, api, history, profile) = setup(StubAuth::new(Reply::Unreachable));
        let session = SessionStore::from_profile(&profile);

        assert_eq!(flow.submit().await, LogoutOutcome::SignedOut);

        assert_eq!(session.token(), None);
        assert_eq!(session.cookie_token(), None);
        assert_eq!(history.entries(), vec![Navigation::Reload("/login".to_string())]);
        assert_eq!(
            api.last_logout_token
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .as_deref(),
            Some("header.payload.sig")
        );
    }

    #[tokio::test]
    async fn rejected_network_call_still_tears_down_locally() {
        let (flow, api, history, profile) =
            setup(StubAuth::new(Reply::Unreachable).failing_logout());
        let session = SessionStore::from_profile(&profile);

        assert_eq!(flow.submit().await, LogoutOutcome::SignedOut);

        assert_eq!(api.logout_calls.load(Ordering::SeqCst), 1);
        assert!(!session.is_valid());
        assert_eq!(session.cookie_token(), None);
        assert_eq!(history.last(), Some(Navigation::Reload("/login".to_string())));
    }

    #[tokio::test]
    async fn remembered_credentials_outlive_logout() {
        let (flow, _, _, profile) = setup(StubAuth::new(Reply::Unreachable));
        let vault = CredentialVault::from_profile(&profile);
        vault
            .save("a@b.com", &SecretString::from("pw".to_string()))
            .unwrap();

        flow.submit().await;

        assert_eq!(vault.read().map(|c| c.identifier), Some("a@b.com".to_string()));
    }

    #[tokio::test]
    async fn logout_without_session_is_harmless() {
        let profile = Profile::in_memory();
        let api = Arc::new(StubAuth::new(Reply::Unreachable));
        let history = Arc::new(History::new());
        let flow = LogoutFlow::new(
            api.clone(),
            SessionStore::from_profile(&profile),
            history.clone(),
            "/login",
        );

        assert_eq!(flow.submit().await, LogoutOutcome::SignedOut);
        assert_eq!(
            *api.last_logout_token
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
            None
        );
        assert_eq!(history.entries().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_logout_is_rejected_while_pending() {
        let (flow, api, history, _) = setup(StubAuth::new(Reply::Unreachable).gated());

        let (first, second) = tokio::join!(flow.submit(), async {
            let outcome = flow.submit().await;
            assert!(flow.is_loading());
            if let Some(gate) = &api.gate {
                gate.notify_one();
            }
            outcome
        });

        assert_eq!(first, LogoutOutcome::SignedOut);
        assert_eq!(second, LogoutOutcome::InFlight);
        assert_eq!(history.entries().len(), 1);
        assert!(!flow.is_loading());
    }
}
