//! Error types for the TaskHive system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskhiveError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    /// Wrong password at login. Distinct from [`Self::AuthenticationFailed`]
    /// because the login endpoint reports it as a client error (400), not
    /// as a missing/invalid token (401).
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Authorization denied: {reason}")]
    AuthorizationDenied { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaskhiveResult<T> = Result<T, TaskhiveError>;
