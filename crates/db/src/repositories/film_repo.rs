//! Repository for the `films` table and its `film_actor` cast rows.

use filmoteka_core::catalog::{escape_like, FilmSortField, Pagination, SortOrder};
use filmoteka_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::RepoError;
use crate::models::actor::{Actor, ActorRow};
use crate::models::film::{CreateFilm, Film, FilmSearch, FilmWithCast, UpdateFilm};
use crate::tx;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, release_date, rating";

/// Same columns qualified for queries that join `films f`.
const QUALIFIED_COLUMNS: &str = "f.id, f.title, f.description, f.release_date, f.rating";

/// Provides create/update/delete/list/search operations for films.
pub struct FilmRepo;

impl FilmRepo {
    /// Insert a film and its cast in one transaction, returning the new id.
    ///
    /// Nothing is written if any cast row is rejected
    /// ([`RepoError::ActorDoesNotExist`], [`RepoError::ActorNotBornBeforeRelease`]).
    pub async fn create(pool: &PgPool, input: &CreateFilm) -> Result<DbId, RepoError> {
        let mut tx = pool.begin().await?;
        let outcome = Self::create_inner(&mut tx, input).await;
        tx::finish(tx, outcome).await
    }

    /// Apply a partial update. Only non-`None` fields in `input` are written;
    /// `actor_ids: Some(..)` replaces the whole cast.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateFilm) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        let outcome = Self::update_inner(&mut tx, id, input).await;
        tx::finish(tx, outcome).await
    }

    /// Delete a film. Cast rows go with it through the foreign-key cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        let outcome = sqlx::query("DELETE FROM films WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(RepoError::from)
            .and_then(|result| {
                if result.rows_affected() == 0 {
                    Err(RepoError::NotFound)
                } else {
                    Ok(())
                }
            });
        tx::finish(tx, outcome).await
    }

    /// List one page of films ordered by `field`/`order`, ties broken by id.
    pub async fn list(
        pool: &PgPool,
        field: FilmSortField,
        order: SortOrder,
        pagination: Pagination,
    ) -> Result<Vec<FilmWithCast>, RepoError> {
        let mut conn = pool.acquire().await?;

        // Both fragments come from fixed enum mappings, never from input.
        let query = format!(
            "SELECT {COLUMNS} FROM films ORDER BY {} {}, id ASC LIMIT $1 OFFSET $2",
            field.column(),
            order.keyword(),
        );
        let films = sqlx::query_as::<_, Film>(&query)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&mut *conn)
            .await?;

        Self::with_cast(&mut conn, films).await
    }

    /// Find films by title fragment and/or cast member name fragment.
    ///
    /// Matching is a case-insensitive substring test; with both fragments a
    /// film must satisfy both. Results are ordered by id.
    pub async fn search(
        pool: &PgPool,
        criteria: &FilmSearch,
        pagination: Pagination,
    ) -> Result<Vec<FilmWithCast>, RepoError> {
        let mut conn = pool.acquire().await?;

        let title = criteria.title.as_deref().map(escape_like);
        let actor_name = criteria.actor_name.as_deref().map(escape_like);

        let query = format!(
            "SELECT DISTINCT {QUALIFIED_COLUMNS}
             FROM films f
             LEFT JOIN film_actor fa ON fa.film_id = f.id
             LEFT JOIN actors a ON a.id = fa.actor_id
             WHERE ($1::TEXT IS NULL OR f.title ILIKE '%' || $1 || '%')
               AND ($2::TEXT IS NULL OR a.name ILIKE '%' || $2 || '%')
             ORDER BY f.id ASC
             LIMIT $3 OFFSET $4"
        );
        let films = sqlx::query_as::<_, Film>(&query)
            .bind(title)
            .bind(actor_name)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&mut *conn)
            .await?;

        Self::with_cast(&mut conn, films).await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn create_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateFilm,
    ) -> Result<DbId, RepoError> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO films (title, description, release_date, rating)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.release_date)
        .bind(input.rating)
        .fetch_one(&mut **tx)
        .await?;

        Self::insert_cast_inner(tx, id, &input.actor_ids).await?;
        Ok(id)
    }

    /// The film row is locked first so concurrent cast replacements run one
    /// after the other. The old cast is cleared before the scalar update so a
    /// release date change is only checked against the cast the film ends up
    /// with.
    async fn update_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        input: &UpdateFilm,
    ) -> Result<(), RepoError> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM films WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(RepoError::NotFound)?;

        if input.actor_ids.is_some() {
            sqlx::query("DELETE FROM film_actor WHERE film_id = $1")
                .bind(id)
                .execute(&mut **tx)
                .await?;
        }

        sqlx::query(
            "UPDATE films SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                release_date = COALESCE($4, release_date),
                rating = COALESCE($5, rating)
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.release_date)
        .bind(input.rating)
        .execute(&mut **tx)
        .await
        .map_err(RepoError::from_cast_write)?;

        if let Some(actor_ids) = &input.actor_ids {
            Self::insert_cast_inner(tx, id, actor_ids).await?;
        }
        Ok(())
    }

    /// Insert one `film_actor` row per id.
    async fn insert_cast_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        film_id: DbId,
        actor_ids: &[DbId],
    ) -> Result<(), RepoError> {
        for &actor_id in actor_ids {
            sqlx::query("INSERT INTO film_actor (film_id, actor_id) VALUES ($1, $2)")
                .bind(film_id)
                .bind(actor_id)
                .execute(&mut **tx)
                .await
                .map_err(RepoError::from_cast_write)?;
        }
        Ok(())
    }

    async fn with_cast(
        conn: &mut PgConnection,
        films: Vec<Film>,
    ) -> Result<Vec<FilmWithCast>, RepoError> {
        let mut out = Vec::with_capacity(films.len());
        for film in films {
            let actors = Self::cast_for_film(conn, film.id).await?;
            out.push(FilmWithCast { film, actors });
        }
        Ok(out)
    }

    /// Cast of one film, ordered by actor id.
    async fn cast_for_film(
        conn: &mut PgConnection,
        film_id: DbId,
    ) -> Result<Vec<Actor>, RepoError> {
        let rows = sqlx::query_as::<_, ActorRow>(
            "SELECT a.id, a.name, a.gender, a.birthday
             FROM actors a
             JOIN film_actor fa ON fa.actor_id = a.id
             WHERE fa.film_id = $1
             ORDER BY a.id ASC",
        )
        .bind(film_id)
        .fetch_all(conn)
        .await?;
        Ok(rows.into_iter().map(Actor::from).collect())
    }
}
