//! Session Store
//!
//! Holds "who is signed in" as an observable value. The value starts as
//! [`SessionState::Loading`] and settles to either a user or
//! [`SessionState::Anonymous`]. Not being signed in is a normal state, so
//! failures never surface as errors here.
//!
//! The store owns the only sender of the underlying `watch` channel; every
//! other component can only subscribe.

use std::sync::Arc;
use tokio::sync::watch;

use crate::models::User;
use crate::navigation::Navigator;
use crate::transport::{ApiRequest, Transport};

const CURRENT_USER_PATH: &str = "/api/user/me";
const LOGIN_PATH: &str = "/auth/login";
const LOGOUT_PATH: &str = "/auth/logout";

/// Current authentication state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// First check has not completed yet
    #[default]
    Loading,
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, SessionState::Loading)
    }
}

/// Observable holder of the current session user
pub struct SessionStore {
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Create a store in the `Loading` state without contacting the backend
    pub fn new(transport: Arc<dyn Transport>, navigator: Arc<dyn Navigator>) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self {
            transport,
            navigator,
            state,
        }
    }

    /// Create a store and resolve the current user
    pub async fn connect(transport: Arc<dyn Transport>, navigator: Arc<dyn Navigator>) -> Self {
        let store = Self::new(transport, navigator);
        store.refresh().await;
        store
    }

    /// Ask the backend who is signed in and publish the answer
    pub async fn refresh(&self) -> SessionState {
        let result = match self.transport.send(ApiRequest::get(CURRENT_USER_PATH)).await {
            Ok(response) => response
                .error_for_status(CURRENT_USER_PATH)
                .and_then(|r| r.json::<User>()),
            Err(e) => Err(e),
        };

        let next = match result {
            Ok(user) => {
                tracing::info!(user_id = %user.id, email = %user.email, "Session active");
                SessionState::Authenticated(user)
            }
            Err(e) if e.is_unauthenticated() => {
                tracing::debug!("No active session");
                SessionState::Anonymous
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session check failed, treating as anonymous");
                SessionState::Anonymous
            }
        };

        self.publish(next.clone());
        next
    }

    /// Receiver that yields the latest state and every later change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn login_url(&self) -> String {
        self.transport.url(LOGIN_PATH)
    }

    /// Hand the whole page over to the backend login flow
    pub fn login(&self) {
        let url = self.login_url();
        tracing::info!(url = %url, "Redirecting to login");
        self.navigator.redirect(&url);
    }

    /// End the session; always finishes anonymous with a full reload
    pub async fn logout(&self) {
        let result = match self
            .transport
            .send(ApiRequest::post(LOGOUT_PATH, serde_json::json!({})))
            .await
        {
            Ok(response) => response.error_for_status(LOGOUT_PATH).map(|_| ()),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => tracing::info!("Logged out"),
            Err(e) => tracing::error!(error = %e, "Logout failed"),
        }

        self.publish(SessionState::Anonymous);
        self.navigator.reload();
    }

    fn publish(&self, state: SessionState) {
        self.state.send_replace(state);
    }
}
