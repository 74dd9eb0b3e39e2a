//! Handlers for the `/film` and `/films` resources.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use filmoteka_core::catalog::{parse_date, DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT};
use filmoteka_core::error::CoreError;
use filmoteka_core::types::DbId;
use filmoteka_db::models::film::{CreateFilm, FilmSearch, UpdateFilm};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{ApiQuery, EntityId, StrictJson};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::{FilmListParams, FilmSearchParams};
use crate::response::{list_response, CreatedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /film`. `actorIDs` lists cast ids and may be omitted.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CreateFilmRequest {
    #[validate(length(min = 1, max = 150, message = "title must be 1 to 150 characters long"))]
    pub title: String,
    #[validate(length(
        min = 1,
        max = 1000,
        message = "description must be 1 to 1000 characters long"
    ))]
    pub description: String,
    pub release_date: String,
    #[validate(range(min = 0.0, max = 10.0, message = "rating should be in range [0, 10]"))]
    pub rating: Option<f32>,
    #[serde(default, rename = "actorIDs")]
    pub actor_ids: Vec<DbId>,
}

impl CreateFilmRequest {
    fn into_input(self) -> Result<CreateFilm, CoreError> {
        let rating = self
            .rating
            .ok_or_else(|| CoreError::Validation("rating value is not provided".into()))?;
        Ok(CreateFilm {
            release_date: parse_date("releaseDate", &self.release_date)?,
            title: self.title,
            description: self.description,
            rating,
            actor_ids: self.actor_ids,
        })
    }
}

/// Request body for `PUT /film/{id}`.
///
/// An absent `actorIDs` keeps the cast; `"actorIDs": []` clears it.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct UpdateFilmRequest {
    #[validate(length(min = 1, max = 150, message = "title must be 1 to 150 characters long"))]
    pub title: Option<String>,
    #[validate(length(
        min = 1,
        max = 1000,
        message = "description must be 1 to 1000 characters long"
    ))]
    pub description: Option<String>,
    pub release_date: Option<String>,
    #[validate(range(min = 0.0, max = 10.0, message = "rating should be in range [0, 10]"))]
    pub rating: Option<f32>,
    #[serde(rename = "actorIDs")]
    pub actor_ids: Option<Vec<DbId>>,
}

impl UpdateFilmRequest {
    fn into_input(self) -> Result<UpdateFilm, CoreError> {
        let input = UpdateFilm {
            release_date: self
                .release_date
                .as_deref()
                .map(|raw| parse_date("releaseDate", raw))
                .transpose()?,
            title: self.title,
            description: self.description,
            rating: self.rating,
            actor_ids: self.actor_ids,
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

/// POST /film
pub async fn create(
    _: RequireAdmin,
    State(state): State<AppState>,
    StrictJson(body): StrictJson<CreateFilmRequest>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let input = body.into_input()?;
    let cast_size = input.actor_ids.len();
    let id = state.films.create(input).await?;
    tracing::info!(film_id = id, cast_size, "Film created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /film/{id}
pub async fn update(
    _: RequireAdmin,
    State(state): State<AppState>,
    EntityId(id): EntityId,
    StrictJson(body): StrictJson<UpdateFilmRequest>,
) -> AppResult<StatusCode> {
    let input = body.into_input()?;
    let replaces_cast = input.actor_ids.is_some();
    state.films.update(id, input).await?;
    tracing::info!(film_id = id, replaces_cast, "Film updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /film/{id}
pub async fn delete(
    _: RequireAdmin,
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<StatusCode> {
    state.films.delete(id).await?;
    tracing::info!(film_id = id, "Film deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /films?field=&order=&page=&limit=
///
/// Defaults: `field=rating`, `order=desc`, `page=1`, `limit=10`.
pub async fn list(
    _: RequireAuth,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<FilmListParams>,
) -> AppResult<Response> {
    let (field, order) = params.sort()?;
    let pagination = params.page.pagination(DEFAULT_LIST_LIMIT)?;
    let films = state.films.list(field, order, pagination).await?;
    Ok(list_response(films))
}

/// GET /films/search?title=&name=&page=&limit=
///
/// At least one of `title` and `name` must be non-empty. Default `limit=1`.
pub async fn search(
    _: RequireAuth,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<FilmSearchParams>,
) -> AppResult<Response> {
    let criteria = FilmSearch::new(params.title, params.name);
    if criteria.is_empty() {
        return Err(CoreError::Validation(
            "title or actor name fragment required for search".into(),
        )
        .into());
    }
    let pagination = params.page.pagination(DEFAULT_SEARCH_LIMIT)?;
    let films = state.films.search(criteria, pagination).await?;
    Ok(list_response(films))
}
