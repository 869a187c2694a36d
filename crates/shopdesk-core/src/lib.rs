//! Core library for shopdesk, an administration client for a catalog REST API.
//!
//! The pieces, from the leaves up:
//!
//! - `auth::TokenStore`: durable storage for the session token
//! - `api::ApiClient`: shared HTTP sender with bearer injection and 401 handling
//! - `auth::SessionManager`: login, logout and identity fetching
//! - `router::Router` / `router::NavigationGuard`: route table and auth gating
//! - `catalog`: admin CRUD for categories, sub-categories and products

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod models;
pub mod router;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthError, SessionManager, SessionState, TokenStore};
pub use config::Config;
pub use router::{NavigationGuard, RouteName, Router};
