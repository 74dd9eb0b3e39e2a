//! Token-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use filmoteka_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Cookie carrying the session token for browser clients.
pub const AUTH_COOKIE: &str = "authToken";

/// Caller holding a valid session token.
///
/// The token is read from `Authorization: Bearer <token>` and, when that
/// header is absent or empty, from the `authToken` cookie.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub is_admin: bool,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("no token provided".into()))
        })?;

        let is_admin = state.config.jwt.verify(&token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            AppError::Core(CoreError::Unauthorized(e.to_string()))
        })?;

        Ok(AuthUser { is_admin })
    }
}

/// Bearer header first, cookie second.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.strip_prefix("Bearer ").unwrap_or(v).trim())
        .filter(|t| !t.is_empty());

    match bearer {
        Some(token) => Some(token.to_string()),
        None => CookieJar::from_headers(headers)
            .get(AUTH_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty()),
    }
}
