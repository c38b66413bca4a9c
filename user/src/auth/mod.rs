//! Authentication for the job board
//!
//! This module provides:
//! - Registration and login with Argon2id password hashes
//! - HS256 bearer tokens whose subject is the user id
//! - Resolution of a bearer token to the current user row

pub mod password;
pub mod token;
pub mod types;

use entities::{Role, User};
use fields::FieldValidator;
use tracing::{debug, info, warn};

pub use password::{PasswordConfig, PasswordHasher};
pub use token::{Claims, TokenConfig, TokenManager};
pub use types::{AuthResponse, LoginRequest, RegisterRequest};

use crate::{
    error::{Result, UserError},
    store::{NewUser, UserStore},
};

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Clone)]
pub struct AuthService {
    store: UserStore,
    hasher: PasswordHasher,
    tokens: TokenManager,
}

impl AuthService {
    pub fn new(store: UserStore, hasher: PasswordHasher, tokens: TokenManager) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Create an account and sign the new user in.
    pub async fn register(&self, request: RegisterRequest) -> Result<(String, User)> {
        info!("Registration attempt");

        let email = request.email.as_deref().map(str::trim);
        let mut validator = FieldValidator::new();
        validator
            .not_blank("email", email, "Email is required")
            .email("email", email.filter(|e| !e.is_empty()), "Email must be valid")
            .not_blank("password", request.password.as_deref(), "Password is required")
            .length(
                "password",
                request.password.as_deref().filter(|p| !p.is_empty()),
                MIN_PASSWORD_LENGTH,
                usize::MAX,
                "Password must be at least 8 characters",
            )
            .not_blank("firstName", request.first_name.as_deref(), "First name is required")
            .not_blank("lastName", request.last_name.as_deref(), "Last name is required");
        validator.finish()?;

        let email = email.unwrap_or_default().to_string();
        let password = request.password.unwrap_or_default();

        if self.store.exists_by_email(&email).await? {
            warn!("Registration rejected: email already registered");
            return Err(UserError::EmailTaken(email));
        }

        let password_hash = self.hash_password(password).await?;
        let user = self
            .store
            .insert(NewUser {
                email,
                password_hash,
                first_name: request.first_name.unwrap_or_default().trim().to_string(),
                last_name: request.last_name.unwrap_or_default().trim().to_string(),
                role: request.role.unwrap_or(Role::User),
            })
            .await?;

        let token = self.tokens.issue(&user)?;
        info!("Registered user {} with role {}", user.id, user.role);
        Ok((token, user))
    }

    /// Check credentials and issue a token. Unknown email and wrong password
    /// are reported identically.
    pub async fn login(&self, request: LoginRequest) -> Result<(String, User)> {
        info!("Login attempt");

        let email = request.email.as_deref().map(str::trim);
        let mut validator = FieldValidator::new();
        validator
            .not_blank("email", email, "Email is required")
            .not_blank("password", request.password.as_deref(), "Password is required");
        validator.finish()?;

        let Some(user) = self.store.find_by_email(email.unwrap_or_default()).await? else {
            warn!("Login failed: unknown email");
            return Err(UserError::InvalidCredentials);
        };

        let password = request.password.unwrap_or_default();
        if !self
            .verify_password(password, user.password_hash.clone())
            .await?
        {
            warn!("Login failed for user {}: wrong password", user.id);
            return Err(UserError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        info!("User {} logged in", user.id);
        Ok((token, user))
    }

    /// Verify a bearer token and load the user it names. The row is read
    /// fresh so role changes and deletions apply to existing tokens.
    pub async fn resolve(&self, token: &str) -> Result<User> {
        let claims = self.tokens.verify(token)?;
        let user_id = claims.user_id()?;

        match self.store.find_by_id(user_id).await? {
            Some(user) => {
                debug!("Resolved token to user {}", user.id);
                Ok(user)
            }
            None => {
                warn!("Token names user {} which no longer exists", user_id);
                Err(UserError::InvalidToken("user no longer exists".to_string()))
            }
        }
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    async fn hash_password(&self, password: String) -> Result<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::PasswordHash(e.to_string()))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| UserError::PasswordHash(e.to_string()))?
    }
}
