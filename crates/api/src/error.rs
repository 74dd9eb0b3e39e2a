use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use filmoteka_core::error::CoreError;
use filmoteka_db::RepoError;
use serde_json::json;

use crate::services::ServiceError;

/// Application-level error type for HTTP handlers.
///
/// Every failure reaching a client passes through [`IntoResponse`] here, the
/// only place where error kinds become HTTP statuses. Bodies are always
/// `{"error": message, "code": CODE}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message. Logged, never shown.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::Service(ServiceError::Repo(err))
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "something went wrong";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Service(err) => classify_service_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
    }
}

/// Repository kinds keep their own statuses. Login failures share one
/// message so callers cannot tell which logins exist.
fn classify_service_error(err: &ServiceError) -> (StatusCode, &'static str, String) {
    match err {
        ServiceError::Repo(repo) => match repo {
            RepoError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", repo.to_string()),
            RepoError::ActorDoesNotExist => {
                (StatusCode::NOT_FOUND, "ACTOR_NOT_FOUND", repo.to_string())
            }
            RepoError::ActorNotBornBeforeRelease => (
                StatusCode::BAD_REQUEST,
                "ACTOR_NOT_BORN_BEFORE_RELEASE",
                repo.to_string(),
            ),
            RepoError::AlreadyExists => (StatusCode::CONFLICT, "CONFLICT", repo.to_string()),
            RepoError::UserNotFound => wrong_credentials(),
            RepoError::Rollback { .. } | RepoError::Database(_) => {
                tracing::error!(error = %repo, "Database error");
                internal()
            }
        },
        ServiceError::WrongPassword => wrong_credentials(),
        ServiceError::Hashing(msg) => {
            tracing::error!(error = %msg, "Password hashing error");
            internal()
        }
    }
}

fn wrong_credentials() -> (StatusCode, &'static str, String) {
    (
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED",
        "wrong login or password".to_string(),
    )
}
