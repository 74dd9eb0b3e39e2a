//! Handlers for registration and login.
//!
//! Both answer with a fresh session token, in the body and in the
//! `authToken` cookie. The admin flag is read from the credential row when
//! the token is issued.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use validator::Validate;

use crate::auth::jwt::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::extract::StrictJson;
use crate::middleware::auth::AUTH_COOKIE;
use crate::response::TokenResponse;
use crate::state::AppState;

/// Request body for `POST /register` and `POST /login`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CredentialsRequest {
    #[validate(length(min = 1, message = "login not found in request or is empty"))]
    pub login: String,
    #[validate(length(min = 1, message = "password not found in request or is empty"))]
    pub password: String,
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    StrictJson(body): StrictJson<CredentialsRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<TokenResponse>)> {
    state.auth.register(&body.login, &body.password).await?;
    let is_admin = state.auth.is_admin(&body.login).await?;
    let (jar, token) = start_session(&state.config.jwt, is_admin)?;
    tracing::info!(login = %body.login, "User registered");
    Ok((StatusCode::CREATED, jar, Json(token)))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    StrictJson(body): StrictJson<CredentialsRequest>,
) -> AppResult<(CookieJar, Json<TokenResponse>)> {
    state
        .auth
        .check_credentials(&body.login, &body.password)
        .await?;
    let is_admin = state.auth.is_admin(&body.login).await?;
    let (jar, token) = start_session(&state.config.jwt, is_admin)?;
    tracing::info!(login = %body.login, is_admin, "User logged in");
    Ok((jar, Json(token)))
}

/// Sign a token and wrap it in the session cookie. The cookie lives exactly
/// as long as the token.
fn start_session(jwt: &JwtConfig, is_admin: bool) -> AppResult<(CookieJar, TokenResponse)> {
    let token = jwt
        .issue_now(is_admin)
        .map_err(|e| AppError::InternalError(format!("Token signing error: {e}")))?;

    let cookie = Cookie::build((AUTH_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(jwt.lifetime().num_seconds()));

    Ok((CookieJar::new().add(cookie), TokenResponse { token }))
}
