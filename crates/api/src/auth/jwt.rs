//! Session tokens.
//!
//! Tokens are HS256-signed JWTs whose payload is exactly
//! `{"isAdmin": bool, "exp": unix_seconds}`. Verification is stateless: a
//! token stays valid until `exp`, there is no revocation list.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{parse_or, required, ConfigError};

/// Claims carried by every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// The token failed verification. Bad signatures, malformed tokens and
/// expired tokens are deliberately indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("token is invalid")]
pub struct TokenInvalid;

/// Signing key and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in hours (default: 24). Also the auth cookie's Max-Age.
    pub expiry_hours: i64,
}

/// Default token lifetime in hours.
const DEFAULT_EXPIRY_HOURS: i64 = 24;

impl JwtConfig {
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `JWT_SECRET`       | **yes**  | --      |
    /// | `JWT_EXPIRY_HOURS` | no       | `24`    |
    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = required(lookup, "JWT_SECRET")?;
        let expiry_hours = parse_or(lookup, "JWT_EXPIRY_HOURS", DEFAULT_EXPIRY_HOURS)?;
        if expiry_hours <= 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRY_HOURS",
                reason: "must be positive".into(),
            });
        }
        Ok(Self {
            secret,
            expiry_hours,
        })
    }

    pub fn lifetime(&self) -> Duration {
        Duration::hours(self.expiry_hours)
    }

    /// Sign a token for `is_admin` that expires one lifetime from now.
    pub fn issue_now(&self, is_admin: bool) -> Result<String, jsonwebtoken::errors::Error> {
        issue(is_admin, self.secret.as_bytes(), Utc::now() + self.lifetime())
    }

    pub fn verify(&self, token: &str) -> Result<bool, TokenInvalid> {
        verify(token, self.secret.as_bytes())
    }
}

/// Sign a token carrying the privilege flag.
pub fn issue(
    is_admin: bool,
    key: &[u8],
    expires_at: DateTime<Utc>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        is_admin,
        exp: expires_at.timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(key),
    )
}

/// Check signature, structure and expiry, returning the privilege flag.
pub fn verify(token: &str, key: &[u8]) -> Result<bool, TokenInvalid> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    decode::<Claims>(token, &DecodingKey::from_secret(key), &validation)
        .map(|data| data.claims.is_admin)
        .map_err(|_| TokenInvalid)
}
