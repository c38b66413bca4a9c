//! HS256 bearer tokens.

use chrono::{Duration, Utc};
use entities::User;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, UserError};

pub const DEV_SECRET: &str = "jobboard-dev-secret-change-me";
pub const DEFAULT_TTL_SECONDS: i64 = 86_400;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse()
            .map_err(|_| UserError::InvalidToken("subject is not a user id".to_string()))
    }
}

#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
            ttl_seconds: DEFAULT_TTL_SECONDS,
        }
    }
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, ttl_seconds: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_seconds,
        }
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.secret == DEV_SECRET
    }
}

/// Issues and verifies signed tokens whose subject is a user id.
#[derive(Clone)]
pub struct TokenManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenManager {
    pub fn new(config: &TokenConfig) -> Result<Self> {
        if config.secret.is_empty() {
            return Err(UserError::Configuration(
                "token secret must not be empty".to_string(),
            ));
        }
        if config.ttl_seconds <= 0 {
            return Err(UserError::Configuration(
                "token lifetime must be positive".to_string(),
            ));
        }
        if config.uses_dev_secret() {
            warn!("Using the built-in development token secret; set JWT_SECRET in production");
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: Duration::seconds(config.ttl_seconds),
        })
    }

    pub fn issue(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| UserError::Configuration(format!("Failed to sign token: {}", e)))
    }

    /// Check signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|e| UserError::InvalidToken(e.to_string()))?;
        Ok(data.claims)
    }
}
