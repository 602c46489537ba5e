//! HS256 JWT token service. The `sub` claim carries the numeric owner id.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use blog_core::domain::UserId;
use blog_core::ports::{AccessToken, AuthError, TokenClaims, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime.
    pub ttl: TimeDelta,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            ttl: TimeDelta::hours(24),
            issuer: "blog-api".to_string(),
        }
    }
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_EXPIRATION_HOURS` and `JWT_ISSUER`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);

        if secret == DEFAULT_SECRET {
            let production = std::env::var("RUST_ENV")
                .is_ok_and(|v| v == "production" || v == "prod");
            if production {
                tracing::error!("JWT_SECRET is unset in production; tokens use the default key");
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        let ttl = std::env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|hours| *hours > 0)
            .and_then(TimeDelta::try_hours)
            .unwrap_or(defaults.ttl);

        Self {
            secret,
            ttl,
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }
}

/// Registered claims plus the owner's email.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    exp: i64,
    iat: i64,
    iss: String,
}

impl Claims {
    fn into_token_claims(self) -> Result<TokenClaims, AuthError> {
        let user_id = self
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::InvalidToken("subject is not a user id".to_string()))?;
        let expires_at = DateTime::from_timestamp(self.exp, 0)
            .ok_or_else(|| AuthError::InvalidToken("exp out of range".to_string()))?;

        Ok(TokenClaims {
            user_id,
            email: self.email,
            expires_at,
        })
    }
}

pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::default();
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            config,
        }
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: UserId, email: &str) -> Result<AccessToken, AuthError> {
        let issued_at = Utc::now();
        let token = self.sign(&Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: (issued_at + self.config.ttl).timestamp(),
            iat: issued_at.timestamp(),
            iss: self.config.issuer.clone(),
        })?;

        Ok(AccessToken {
            token,
            expires_in: self.config.ttl.num_seconds().max(0) as u64,
        })
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?
            .claims
            .into_token_claims()
    }
}
