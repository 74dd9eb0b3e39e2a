use std::sync::Arc;

use filmoteka_db::DbPool;

use crate::config::ServerConfig;
use crate::services::{
    ActorService, AuthService, FilmService, PgActorService, PgAuthService, PgFilmService,
};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything shared sits behind an `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (health checks).
    pub pool: DbPool,
    /// Server configuration; extractors read the signing key from here.
    pub config: Arc<ServerConfig>,
    pub actors: Arc<dyn ActorService>,
    pub films: Arc<dyn FilmService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppState {
    /// State backed by the PostgreSQL services.
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            actors: Arc::new(PgActorService::new(pool.clone())),
            films: Arc::new(PgFilmService::new(pool.clone())),
            auth: Arc::new(PgAuthService::new(pool.clone())),
            pool,
            config: Arc::new(config),
        }
    }
}
