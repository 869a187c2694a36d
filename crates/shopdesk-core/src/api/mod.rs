//! REST API client module for the catalog backend.
//!
//! This module provides the `ApiClient` used by every other component to
//! talk to the backend, the multipart form builder used for uploads, and the
//! response parser that turns loosely shaped JSON envelopes into typed values.
//!
//! Authentication is a bearer token read from the configured `TokenStore`
//! on every request and cleared whenever the backend answers 401.

pub mod client;
pub mod error;
pub mod form;
pub mod parse;

pub use client::ApiClient;
pub use error::{ApiError, MalformedResponse};
pub use form::{FormFields, Upload};
