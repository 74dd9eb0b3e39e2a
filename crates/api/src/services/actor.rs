use async_trait::async_trait;
use filmoteka_core::catalog::Pagination;
use filmoteka_core::types::DbId;
use filmoteka_db::models::actor::{ActorWithFilms, CreateActor, UpdateActor};
use filmoteka_db::repositories::ActorRepo;
use filmoteka_db::DbPool;

use super::ServiceError;

#[async_trait]
pub trait ActorService: Send + Sync {
    async fn create(&self, input: CreateActor) -> Result<DbId, ServiceError>;

    /// Partial update; `None` fields keep their stored values.
    async fn update(&self, id: DbId, input: UpdateActor) -> Result<(), ServiceError>;

    async fn delete(&self, id: DbId) -> Result<(), ServiceError>;

    async fn list(&self, pagination: Pagination) -> Result<Vec<ActorWithFilms>, ServiceError>;
}

pub struct PgActorService {
    pool: DbPool,
}

impl PgActorService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActorService for PgActorService {
    async fn create(&self, input: CreateActor) -> Result<DbId, ServiceError> {
        Ok(ActorRepo::create(&self.pool, &input).await?)
    }

    async fn update(&self, id: DbId, input: UpdateActor) -> Result<(), ServiceError> {
        Ok(ActorRepo::update(&self.pool, id, &input).await?)
    }

    async fn delete(&self, id: DbId) -> Result<(), ServiceError> {
        Ok(ActorRepo::delete(&self.pool, id).await?)
    }

    async fn list(&self, pagination: Pagination) -> Result<Vec<ActorWithFilms>, ServiceError> {
        tracing::debug!(%pagination, "Listing actors");
        Ok(ActorRepo::list(&self.pool, pagination).await?)
    }
}
