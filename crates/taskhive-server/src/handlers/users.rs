//! User-facing auth endpoints: register, login, refresh, logout.
//!
//! The refresh token never appears in a response body — it travels only
//! in an http-only, same-site-strict cookie.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

const REFRESH_COOKIE: &str = "refreshToken";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Public projection of a user — the password hash and refresh token
/// never leave the service.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub success: bool,
    pub access_token: String,
}

fn refresh_cookie(value: String, max_age_secs: u64, secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::seconds(max_age_secs as i64))
        .build()
}

fn expired_refresh_cookie() -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, "")).path("/").build()
}

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Envelope<PublicUser>>), ApiError> {
    if req.name.trim().is_empty()
        || req.email.trim().is_empty()
        || req.password.is_empty()
        || req.confirm_password.is_empty()
    {
        return Err(ApiError::bad_request("All fields are required"));
    }
    if req.password != req.confirm_password {
        return Err(ApiError::bad_request("Passwords do not match"));
    }

    let user = state
        .auth
        .register(taskhive_auth::RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    let body = Envelope::ok(
        "User registered successfully",
        PublicUser {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    );
    Ok((StatusCode::CREATED, Json(body)))
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), ApiError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let out = state
        .auth
        .login(taskhive_auth::LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let jar = jar.add(refresh_cookie(
        out.refresh_token,
        state.auth_config.refresh_token_lifetime_secs,
        state.cookie_secure,
    ));

    Ok((
        jar,
        Json(TokenResponse {
            success: true,
            access_token: out.access_token,
        }),
    ))
}

/// POST /api/users/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<TokenResponse>), ApiError> {
    let raw = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| ApiError::unauthorized("Refresh token missing"))?;

    let out = state.auth.refresh(&raw).await?;

    // Rotation: the consumed token is replaced in the same response.
    let jar = jar.add(refresh_cookie(
        out.refresh_token,
        state.auth_config.refresh_token_lifetime_secs,
        state.cookie_secure,
    ));

    Ok((
        jar,
        Json(TokenResponse {
            success: true,
            access_token: out.access_token,
        }),
    ))
}

/// POST /api/users/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Envelope<()>>), ApiError> {
    let raw = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());
    state.auth.logout(raw.as_deref()).await?;

    let jar = jar.remove(expired_refresh_cookie());

    Ok((jar, Json(Envelope::message_only("Logged out successfully"))))
}
