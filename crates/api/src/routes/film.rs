use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::film;
use crate::state::AppState;

/// ```text
/// POST   /film          -> create
/// PUT    /film/{id}     -> update
/// DELETE /film/{id}     -> delete
/// GET    /films         -> list
/// GET    /films/search  -> search
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/film", post(film::create))
        .route("/film/{id}", put(film::update).delete(film::delete))
        .route("/films", get(film::list))
        .route("/films/search", get(film::search))
}
