//! Repository for the `auth` credential table.

use filmoteka_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoError;
use crate::models::credential::{CreateCredential, Credential};
use crate::tx;

const COLUMNS: &str = "id, login, password_hash, is_admin";

pub struct CredentialRepo;

impl CredentialRepo {
    /// Register a login. A taken login fails with [`RepoError::AlreadyExists`].
    pub async fn create(pool: &PgPool, input: &CreateCredential) -> Result<DbId, RepoError> {
        let mut tx = pool.begin().await?;
        let outcome = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO auth (login, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(&input.login)
        .bind(&input.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepoError::from_credential_insert);
        tx::finish(tx, outcome).await
    }

    /// Look up a credential by login.
    pub async fn find_by_login(pool: &PgPool, login: &str) -> Result<Credential, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM auth WHERE login = $1");
        sqlx::query_as::<_, Credential>(&query)
            .bind(login)
            .fetch_optional(pool)
            .await?
            .ok_or(RepoError::UserNotFound)
    }

    /// Privilege flag of a login.
    pub async fn is_admin(pool: &PgPool, login: &str) -> Result<bool, RepoError> {
        sqlx::query_scalar::<_, bool>("SELECT is_admin FROM auth WHERE login = $1")
            .bind(login)
            .fetch_optional(pool)
            .await?
            .ok_or(RepoError::UserNotFound)
    }
}
