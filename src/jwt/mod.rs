//! JWT token handling

use crate::config::JwtConfig;
use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Access token claims (issued on login/register)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (stringified user ID)
    #[serde(default)]
    pub sub: String,
    /// Email of the authenticated user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issuer
    #[serde(default)]
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// JWT token manager
///
/// Single shared-secret symmetric algorithm (HS256). Tokens signed with any
/// other algorithm are rejected before claim inspection.
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Create a Validation with a strict leeway (5 seconds) instead of the
    /// default 60 seconds, so tokens expire promptly while still tolerating
    /// minor clock skew.
    fn strict_validation(&self) -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        v.leeway = 5;
        // No audience claim on these tokens; issuer is checked manually so
        // the mismatch maps to its own error.
        v.validate_aud = false;
        v
    }

    /// Mint an access token for the given user
    pub fn mint(&self, user_id: i64, email: &str) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.config.ttl_minutes);

        let claims = AccessClaims {
            sub: user_id.to_string(),
            email: Some(email.to_string()),
            iss: self.config.issuer.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.encoding_key).map_err(|e| AppError::Internal(e.into()))
    }

    /// Verify a raw token and extract its claims.
    ///
    /// Checks run in order: signing method, signature/expiry, subject
    /// presence, issuer equality.
    pub fn verify(&self, token: &str) -> Result<AccessClaims> {
        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &self.strict_validation())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => AppError::InvalidSigningMethod,
                _ => AppError::InvalidToken,
            })?;

        let claims = token_data.claims;
        if claims.sub.trim().is_empty() {
            return Err(AppError::InvalidSubject);
        }
        if claims.iss != self.config.issuer {
            return Err(AppError::InvalidIssuer);
        }

        Ok(claims)
    }

    /// Token TTL in minutes
    pub fn ttl_minutes(&self) -> i64 {
        self.config.ttl_minutes
    }
}
