//! The navigation guard.
//!
//! An absent current user means "unknown, verify": the guard asks the
//! session manager to fetch the identity once, and relies on that fetch
//! degrading to "no user" on any failure. Once a user is cached, later
//! navigations cost nothing.

use std::sync::Arc;

use tracing::debug;

use crate::auth::SessionManager;

use super::{ResolvedRoute, RouteName};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    Redirect(RouteName),
}

pub struct NavigationGuard {
    session: Arc<SessionManager>,
    login: RouteName,
    landing: RouteName,
}

impl NavigationGuard {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self {
            session,
            login: RouteName::Login,
            landing: RouteName::Dashboard,
        }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Evaluate a transition to `to` before it completes.
    pub async fn before_each(&self, to: &ResolvedRoute) -> NavigationDecision {
        if to.requires_auth {
            if !self.session.is_logged_in() {
                self.session.fetch_me().await;
            }
            if !self.session.is_logged_in() {
                debug!(path = %to.path, "No session, redirecting to login");
                return NavigationDecision::Redirect(self.login);
            }
        }

        if to.is(self.login) {
            if !self.session.is_logged_in() {
                self.session.fetch_me().await;
            }
            if self.session.is_logged_in() {
                debug!("Already logged in, leaving login page");
                return NavigationDecision::Redirect(self.landing);
            }
        }

        NavigationDecision::Proceed
    }
}
