//! Handlers for the `/actor` and `/actors` resources.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use filmoteka_core::catalog::{parse_date, Gender, DEFAULT_LIST_LIMIT};
use filmoteka_core::error::CoreError;
use filmoteka_db::models::actor::{CreateActor, UpdateActor};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{ApiQuery, EntityId, StrictJson};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::PageParams;
use crate::response::{list_response, CreatedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /actor`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateActorRequest {
    #[validate(length(min = 1, message = "name not found in request or is empty"))]
    pub name: String,
    pub gender: String,
    /// `YYYY-MM-DD`.
    pub birthday: String,
}

impl CreateActorRequest {
    fn into_input(self) -> Result<CreateActor, CoreError> {
        Ok(CreateActor {
            gender: self.gender.parse()?,
            birthday: parse_date("birthday", &self.birthday)?,
            name: self.name,
        })
    }
}

/// Request body for `PUT /actor/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateActorRequest {
    #[validate(length(min = 1, message = "name not found in request or is empty"))]
    pub name: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<String>,
}

impl UpdateActorRequest {
    fn into_input(self) -> Result<UpdateActor, CoreError> {
        let input = UpdateActor {
            name: self.name,
            gender: self.gender.as_deref().map(str::parse::<Gender>).transpose()?,
            birthday: self
                .birthday
                .as_deref()
                .map(|raw| parse_date("birthday", raw))
                .transpose()?,
        };
        if input.is_empty() {
            return Err(CoreError::Validation("nothing provided in JSON".into()));
        }
        Ok(input)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /actor
pub async fn create(
    _: RequireAdmin,
    State(state): State<AppState>,
    StrictJson(body): StrictJson<CreateActorRequest>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let input = body.into_input()?;
    let id = state.actors.create(input).await?;
    tracing::info!(actor_id = id, "Actor created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /actor/{id}
pub async fn update(
    _: RequireAdmin,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    StrictJson(body): StrictJson<UpdateActorRequest>,
) -> AppResult<StatusCode> {
    let input = body.into_input()?;
    state.actors.update(id, input).await?;
    tracing::info!(actor_id = id, "Actor updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /actor/{id}
pub async fn delete(
    _: RequireAdmin,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<StatusCode> {
    state.actors.delete(id).await?;
    tracing::info!(actor_id = id, "Actor deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /actors?page=&limit=
pub async fn list(
    _: RequireAuth,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<Response> {
    let pagination = params.pagination(DEFAULT_LIST_LIMIT)?;
    let actors = state.actors.list(pagination).await?;
    Ok(list_response(actors))
}
