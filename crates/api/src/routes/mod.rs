pub mod actor;
pub mod auth;
pub mod film;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// /ping                        health (public)
///
/// /register                    register (public)
/// /login                       login (public)
///
/// /actor                       create (admin)
/// /actor/{id}                  update, delete (admin)
/// /actors                      list (auth)
///
/// /film                        create (admin)
/// /film/{id}                   update, delete (admin)
/// /films                       list (auth)
/// /films/search                search (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(actor::router())
        .merge(film::router())
}
