//! Repository for the `actors` table.

use filmoteka_core::catalog::Pagination;
use filmoteka_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::RepoError;
use crate::models::actor::{ActorRow, ActorWithFilms, CreateActor, UpdateActor};
use crate::models::film::Film;
use crate::tx;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, gender, birthday";

/// Provides create/update/delete/list operations for actors.
pub struct ActorRepo;

impl ActorRepo {
    /// Insert a new actor, returning its generated id.
    pub async fn create(pool: &PgPool, input: &CreateActor) -> Result<DbId, RepoError> {
        let mut tx = pool.begin().await?;
        let outcome = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO actors (name, gender, birthday) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&input.name)
        .bind(input.gender.to_db())
        .bind(input.birthday)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepoError::from);
        tx::finish(tx, outcome).await
    }

    /// Apply a partial update. Only non-`None` fields in `input` are written.
    ///
    /// Fails with [`RepoError::NotFound`] if no actor has this id, and with
    /// [`RepoError::ActorNotBornBeforeRelease`] if the new birthday falls
    /// after the release of a film the actor appears in.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateActor) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        let outcome = sqlx::query_scalar::<_, DbId>(
            "UPDATE actors SET
                name = COALESCE($2, name),
                gender = COALESCE($3, gender),
                birthday = COALESCE($4, birthday)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.gender.map(|g| g.to_db()))
        .bind(input.birthday)
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepoError::from_cast_write)
        .and_then(|updated| updated.map(|_| ()).ok_or(RepoError::NotFound));
        tx::finish(tx, outcome).await
    }

    /// Delete an actor together with their cast memberships.
    ///
    /// Fails with [`RepoError::NotFound`] if nothing was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        let outcome = Self::delete_inner(&mut tx, id).await;
        tx::finish(tx, outcome).await
    }

    /// List actors ordered by id, each with their films.
    pub async fn list(
        pool: &PgPool,
        pagination: Pagination,
    ) -> Result<Vec<ActorWithFilms>, RepoError> {
        let mut conn = pool.acquire().await?;

        let query = format!("SELECT {COLUMNS} FROM actors ORDER BY id ASC LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, ActorRow>(&query)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&mut *conn)
            .await?;

        let mut actors = Vec::with_capacity(rows.len());
        for row in rows {
            let films = Self::films_for_actor(&mut conn, row.id).await?;
            actors.push(ActorWithFilms {
                actor: row.into(),
                films,
            });
        }
        Ok(actors)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn delete_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM film_actor WHERE actor_id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        let result = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    /// Films an actor appears in, ordered by film id.
    async fn films_for_actor(
        conn: &mut PgConnection,
        actor_id: DbId,
    ) -> Result<Vec<Film>, RepoError> {
        let films = sqlx::query_as::<_, Film>(
            "SELECT f.id, f.title, f.description, f.release_date, f.rating
             FROM films f
             JOIN film_actor fa ON fa.film_id = f.id
             WHERE fa.actor_id = $1
             ORDER BY f.id ASC",
        )
        .bind(actor_id)
        .fetch_all(conn)
        .await?;
        Ok(films)
    }
}
