//! Session state: who is logged in, and whether an auth call is in flight.
//!
//! `SessionManager` is constructed once at startup and shared by `Arc` with
//! the navigation guard and the presentation layer. State changes are
//! published on a `watch` channel so observers can follow them.
//!
//! Every state-changing operation takes a ticket from a generation counter.
//! An identity fetch only writes the current user if no newer operation has
//! started since it began, so a slow, stale response cannot overwrite a
//! fresher one (or bring a user back after logout).

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::parse::{self, Envelope};
use crate::api::{ApiClient, ApiError};
use crate::models::User;

use super::AuthError;

const LOGIN_PATH: &str = "/auth/login";
const ME_PATH: &str = "/auth/me";
const LOGOUT_PATH: &str = "/auth/logout";

/// Snapshot of the session as seen by observers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

pub struct SessionManager {
    api: ApiClient,
    state: watch::Sender<SessionState>,
    generation: AtomicU64,
    in_flight: AtomicUsize,
}

impl SessionManager {
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            api,
            state,
            generation: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().is_logged_in()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Log in, persist the returned token, then load the identity.
    ///
    /// Rejected credentials (401 or 422) fail with
    /// [`AuthError::InvalidCredentials`]; the current user is left absent.
    /// A login overtaken by a newer session operation (typically `logout`)
    /// fails with [`AuthError::Superseded`] and leaves the token store alone.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let ticket = self.next_ticket();
        let _loading = LoadingScope::enter(self);

        info!("Logging in");
        let payload = LoginPayload { email, password };
        let body = match self.api.post_json(LOGIN_PATH, &payload).await {
            Ok(body) => body,
            Err(ApiError::Unauthorized) => {
                warn!("Login rejected");
                return Err(AuthError::InvalidCredentials("rejected by server".to_string()));
            }
            Err(ApiError::Validation(message)) => {
                warn!("Login rejected");
                return Err(AuthError::InvalidCredentials(message));
            }
            Err(e) => return Err(e.into()),
        };

        let token = parse::token(&body)?;
        if !self.persist_token(ticket, &token)? {
            debug!("Login superseded before its token was stored");
            return Err(AuthError::Superseded);
        }

        let user = self.me().await?;
        if !self.apply_user(ticket, Some(user.clone())) {
            debug!("Login superseded while loading the identity");
            return Err(AuthError::Superseded);
        }
        info!(user_id = user.id, "Login successful");
        Ok(user)
    }

    /// Fetch the identity for the stored token. No state changes.
    pub async fn me(&self) -> Result<User, AuthError> {
        let body = self.api.get_json(ME_PATH, &[]).await?;
        Ok(parse::entity(&body, &[Envelope::Root], "user identity")?)
    }

    /// Refresh the current user. Any failure degrades to "no session":
    /// the current user becomes absent and `None` is returned.
    pub async fn fetch_me(&self) -> Option<User> {
        let ticket = self.next_ticket();
        let _loading = LoadingScope::enter(self);

        let fetched = match self.me().await {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, "Identity fetch failed, treating as logged out");
                None
            }
        };

        if self.apply_user(ticket, fetched.clone()) {
            fetched
        } else {
            debug!("Discarding stale identity fetch");
            self.current_user()
        }
    }

    /// Tell the server the session is over, then drop the local session no
    /// matter how that went.
    pub async fn logout(&self) {
        self.next_ticket();

        if let Err(e) = self.api.post_empty(LOGOUT_PATH).await {
            warn!(error = %e, "Server logout failed, clearing local session anyway");
        }
        if let Err(e) = self.api.tokens().clear() {
            warn!(error = %e, "Failed to clear session token");
        }

        self.state.send_modify(|state| {
            // Anything still in flight is now stale
            self.generation.fetch_add(1, Ordering::SeqCst);
            state.user = None;
        });
        info!("Logged out");
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn next_ticket(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    /// Store `token` if `ticket` is still the newest operation. The check and
    /// the write happen under the state lock, so a logout that started first
    /// always wins and one that starts later clears the token afterwards.
    fn persist_token(&self, ticket: u64, token: &str) -> Result<bool, AuthError> {
        let mut result = Ok(false);
        self.state.send_if_modified(|_| {
            if self.is_current(ticket) {
                result = self.api.tokens().set(token).map(|()| true);
            }
            false
        });
        Ok(result?)
    }

    /// Write the current user if `ticket` is still the newest operation.
    fn apply_user(&self, ticket: u64, user: Option<User>) -> bool {
        let mut applied = false;
        self.state.send_if_modified(|state| {
            if !self.is_current(ticket) {
                return false;
            }
            applied = true;
            let changed = state.user != user;
            state.user = user;
            changed
        });
        applied
    }
}

/// Holds `loading` true while at least one auth call is in flight.
struct LoadingScope<'a> {
    manager: &'a SessionManager,
}

impl<'a> LoadingScope<'a> {
    fn enter(manager: &'a SessionManager) -> Self {
        manager.state.send_modify(|state| {
            manager.in_flight.fetch_add(1, Ordering::SeqCst);
            state.loading = true;
        });
        Self { manager }
    }
}

impl Drop for LoadingScope<'_> {
    fn drop(&mut self) {
        let manager = self.manager;
        manager.state.send_modify(|state| {
            let remaining = manager.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
            state.loading = remaining > 0;
        });
    }
}
