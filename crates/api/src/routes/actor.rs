use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::actor;
use crate::state::AppState;

/// ```text
/// POST   /actor       -> create
/// PUT    /actor/{id}  -> update
/// DELETE /actor/{id}  -> delete
/// GET    /actors      -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/actor", post(actor::create))
        .route("/actor/{id}", put(actor::update).delete(actor::delete))
        .route("/actors", get(actor::list))
}
