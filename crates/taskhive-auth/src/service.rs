//! Authentication service — registration, login, refresh rotation, and
//! logout orchestration.

use taskhive_core::error::{TaskhiveError, TaskhiveResult};
use taskhive_core::models::user::{CreateUser, User};
use taskhive_core::repository::UserRepository;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the registration flow. Confirm-password equality is an HTTP
/// boundary concern and is checked before this struct is built.
#[derive(Debug)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful login or refresh result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed JWT access token.
    pub access_token: String,
    /// Raw opaque refresh token (travels only in the http-only cookie;
    /// the store keeps its SHA-256 hash).
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Authentication service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register a new user. Fails with a conflict error when the email is
    /// already taken.
    pub async fn register(&self, input: RegisterInput) -> TaskhiveResult<User> {
        let name = input.name.trim();
        let email = input.email.trim();

        if name.is_empty() || email.is_empty() || input.password.is_empty() {
            return Err(TaskhiveError::Validation {
                message: "All fields are required".into(),
            });
        }
        if input.password.len() < self.config.min_password_length {
            return Err(TaskhiveError::Validation {
                message: format!(
                    "Password must be at least {} characters",
                    self.config.min_password_length
                ),
            });
        }

        match self.user_repo.get_by_email(email).await {
            Ok(_) => {
                return Err(TaskhiveError::AlreadyExists {
                    entity: "user".into(),
                });
            }
            Err(TaskhiveError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        self.user_repo
            .create(CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                password: input.password,
            })
            .await
    }

    /// Authenticate with email + password; on success store a rotated
    /// refresh token hash and issue a token pair.
    ///
    /// An unknown email surfaces as not-found — the login endpoint reports
    /// it as 404, distinct from a wrong password.
    pub async fn login(&self, input: LoginInput) -> TaskhiveResult<LoginOutput> {
        let user = self.user_repo.get_by_email(input.email.trim()).await?;

        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        self.issue_pair(&user).await
    }

    /// Rotate a refresh token: the presented token must hash to the stored
    /// value; a new pair replaces it. Each refresh token is single-use.
    pub async fn refresh(&self, raw_refresh_token: &str) -> TaskhiveResult<LoginOutput> {
        let token_hash = token::hash_refresh_token(raw_refresh_token);
        let user = self
            .user_repo
            .get_by_refresh_token_hash(&token_hash)
            .await
            .map_err(|e| match e {
                TaskhiveError::NotFound { .. } => AuthError::RefreshInvalid.into(),
                other => other,
            })?;

        self.issue_pair(&user).await
    }

    /// Invalidate the refresh token presented in the cookie, if it still
    /// maps to a user. Always succeeds — logout is idempotent.
    pub async fn logout(&self, raw_refresh_token: Option<&str>) -> TaskhiveResult<()> {
        let Some(raw) = raw_refresh_token else {
            return Ok(());
        };

        let token_hash = token::hash_refresh_token(raw);
        match self.user_repo.get_by_refresh_token_hash(&token_hash).await {
            Ok(user) => self.user_repo.set_refresh_token_hash(user.id, None).await,
            Err(TaskhiveError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn issue_pair(&self, user: &User) -> TaskhiveResult<LoginOutput> {
        let raw_refresh = token::generate_refresh_token();
        let refresh_hash = token::hash_refresh_token(&raw_refresh);
        self.user_repo
            .set_refresh_token_hash(user.id, Some(refresh_hash))
            .await?;

        let access_token = token::issue_access_token(user.id, &self.config)?;

        Ok(LoginOutput {
            access_token,
            refresh_token: raw_refresh,
            expires_in: self.config.access_token_lifetime_secs,
        })
    }
}
