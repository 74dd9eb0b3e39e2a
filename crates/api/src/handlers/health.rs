use axum::extract::State;
use axum::http::StatusCode;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /ping
///
/// 200 when the database answers, 500 otherwise.
pub async fn ping(State(state): State<AppState>) -> AppResult<StatusCode> {
    filmoteka_db::health_check(&state.pool)
        .await
        .map_err(|e| AppError::InternalError(format!("Database ping failed: {e}")))?;
    Ok(StatusCode::OK)
}
