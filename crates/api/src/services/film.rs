use async_trait::async_trait;
use filmoteka_core::catalog::{FilmSortField, Pagination, SortOrder};
use filmoteka_core::types::DbId;
use filmoteka_db::models::film::{CreateFilm, FilmSearch, FilmWithCast, UpdateFilm};
use filmoteka_db::repositories::FilmRepo;
use filmoteka_db::DbPool;

use super::ServiceError;

#[async_trait]
pub trait FilmService: Send + Sync {
    async fn create(&self, input: CreateFilm) -> Result<DbId, ServiceError>;

    /// Partial update. `actor_ids: Some(..)` replaces the whole cast.
    async fn update(&self, id: DbId, input: UpdateFilm) -> Result<(), ServiceError>;

    async fn delete(&self, id: DbId) -> Result<(), ServiceError>;

    async fn list(
        &self,
        field: FilmSortField,
        order: SortOrder,
        pagination: Pagination,
    ) -> Result<Vec<FilmWithCast>, ServiceError>;

    /// `criteria` must hold at least one fragment.
    async fn search(
        &self,
        criteria: FilmSearch,
        pagination: Pagination,
    ) -> Result<Vec<FilmWithCast>, ServiceError>;
}

pub struct PgFilmService {
    pool: DbPool,
}

impl PgFilmService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FilmService for PgFilmService {
    async fn create(&self, input: CreateFilm) -> Result<DbId, ServiceError> {
        Ok(FilmRepo::create(&self.pool, &input).await?)
    }

    async fn update(&self, id: DbId, input: UpdateFilm) -> Result<(), ServiceError> {
        Ok(FilmRepo::update(&self.pool, id, &input).await?)
    }

    async fn delete(&self, id: DbId) -> Result<(), ServiceError> {
        Ok(FilmRepo::delete(&self.pool, id).await?)
    }

    async fn list(
        &self,
        field: FilmSortField,
        order: SortOrder,
        pagination: Pagination,
    ) -> Result<Vec<FilmWithCast>, ServiceError> {
        tracing::debug!(?field, ?order, %pagination, "Listing films");
        Ok(FilmRepo::list(&self.pool, field, order, pagination).await?)
    }

    async fn search(
        &self,
        criteria: FilmSearch,
        pagination: Pagination,
    ) -> Result<Vec<FilmWithCast>, ServiceError> {
        tracing::debug!(?criteria, %pagination, "Searching films");
        Ok(FilmRepo::search(&self.pool, &criteria, pagination).await?)
    }
}
