//! Client-side routing for the admin app.
//!
//! - `RouteTable`: the static route records and their auth metadata
//! - `NavigationGuard`: decides before each transition whether it proceeds
//! - `Router`: resolves a path, applies redirects and runs the guard

pub mod guard;
pub mod routes;

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::auth::SessionManager;

pub use guard::{NavigationDecision, NavigationGuard};
pub use routes::{ResolvedRoute, RouteMeta, RouteName, RouteRecord, RouteTable};

/// Redirects followed before a navigation is considered a loop.
const MAX_REDIRECTS: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("No route matches {0}")]
    NotFound(String),

    #[error("Too many redirects navigating to {0}")]
    RedirectLoop(String),
}

pub struct Router {
    table: RouteTable,
    guard: NavigationGuard,
}

impl Router {
    pub fn new(table: RouteTable, guard: NavigationGuard) -> Self {
        Self { table, guard }
    }

    /// The admin route table guarded by `session`
    pub fn admin(session: Arc<SessionManager>) -> Self {
        Self::new(RouteTable::admin(), NavigationGuard::new(session))
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Navigate to `path`, following static redirects and guard redirects.
    /// Returns the route the navigation finally lands on.
    pub async fn navigate(&self, path: &str) -> Result<ResolvedRoute, RouterError> {
        let mut target = path.to_string();

        for _ in 0..=MAX_REDIRECTS {
            let mut route = self
                .table
                .resolve(&target)
                .ok_or_else(|| RouterError::NotFound(target.clone()))?;

            if let Some(redirect) = route.redirect {
                debug!(from = %route.path, to = redirect, "Static redirect");
                target = redirect.to_string();
                continue;
            }

            match self.guard.before_each(&route).await {
                NavigationDecision::Proceed => {
                    if route.path != routes::normalize(path) {
                        route.redirected_from = Some(path.to_string());
                    }
                    return Ok(route);
                }
                NavigationDecision::Redirect(name) => {
                    debug!(from = %route.path, to = %name, "Guard redirect");
                    target = self
                        .table
                        .path_of(name)
                        .ok_or_else(|| RouterError::NotFound(name.to_string()))?;
                }
            }
        }

        Err(RouterError::RedirectLoop(path.to_string()))
    }

    /// Navigate to a named route
    pub async fn push(&self, name: RouteName) -> Result<ResolvedRoute, RouterError> {
        let path = self
            .table
            .path_of(name)
            .ok_or_else(|| RouterError::NotFound(name.to_string()))?;
        self.navigate(&path).await
    }
}
