use thiserror::Error;

use crate::api::{ApiError, MalformedResponse};

use super::TokenStoreError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password: {0}")]
    InvalidCredentials(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// A newer session operation (logout or another login) started first
    #[error("Login was superseded by a newer session operation")]
    Superseded,

    #[error("Failed to persist session token: {0}")]
    TokenStore(#[from] TokenStoreError),
}

impl From<MalformedResponse> for AuthError {
    fn from(err: MalformedResponse) -> Self {
        AuthError::Api(err.into())
    }
}
