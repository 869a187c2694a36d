//! Authentication module for managing the admin session.
//!
//! This module provides:
//! - `TokenStore`: durable storage for the bearer token (file, keychain, memory)
//! - `SessionManager`: login, logout and identity fetching, with observable state
//!
//! Tokens carry no client-side expiry; a session ends when the user logs out
//! or the backend answers 401.

pub mod error;
pub mod session;
pub mod token_store;

pub use error::AuthError;
pub use session::{SessionManager, SessionState};
pub use token_store::{
    FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore, TokenStoreError, TOKEN_KEY,
};
