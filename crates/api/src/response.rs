//! Shared response bodies for API handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use filmoteka_core::types::DbId;
use serde::Serialize;

/// Body of a `201 Created` response.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: DbId,
}

/// Body of a successful register/login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `200` with the items, or `204` without a body when there are none.
pub fn list_response<T: Serialize>(items: Vec<T>) -> Response {
    if items.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(items).into_response()
    }
}
