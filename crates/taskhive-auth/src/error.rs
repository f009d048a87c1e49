//! Authentication error types.

use taskhive_core::error::TaskhiveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("invalid refresh token")]
    RefreshInvalid,

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for TaskhiveError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => TaskhiveError::InvalidCredentials,
            AuthError::TokenExpired | AuthError::TokenInvalid(_) => {
                TaskhiveError::AuthenticationFailed {
                    reason: err.to_string(),
                }
            }
            // Refresh failures report 403, matching the refresh endpoint.
            AuthError::RefreshInvalid => TaskhiveError::AuthorizationDenied {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => TaskhiveError::Crypto(msg),
        }
    }
}
