//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use taskhive_auth::token;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, extracted from the `Authorization: Bearer`
/// header. Validation is stateless — signature, expiry, and issuer are
/// checked against the configured key; no database lookup happens here.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("No token provided"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("No token provided"))?;

        let claims = token::validate_access_token(token, &state.auth_config)
            .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

        Ok(AuthUser(user_id))
    }
}
