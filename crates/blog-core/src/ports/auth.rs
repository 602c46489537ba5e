//! Ports for resolving the calling owner.

use chrono::{DateTime, Utc};

use crate::domain::UserId;

/// What a verified bearer token says about its holder.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: UserId,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// A freshly signed bearer token.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    /// Seconds until the token stops verifying.
    pub expires_in: u64,
}

/// Issues and verifies the bearer tokens that carry the owner id.
pub trait TokenService: Send + Sync {
    fn issue(&self, user_id: UserId, email: &str) -> Result<AccessToken, AuthError>;

    /// Expired, tampered or foreign tokens are rejected.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// One-way password hashing for stored credentials.
pub trait PasswordService: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
