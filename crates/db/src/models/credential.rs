//! Credential (login) model and DTOs.

use filmoteka_core::types::DbId;
use sqlx::FromRow;

/// A row from the `auth` table.
#[derive(Debug, Clone, FromRow)]
pub struct Credential {
    pub id: DbId,
    pub login: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Granted out-of-band; never written by the API.
    pub is_admin: bool,
}

/// DTO for registering a new login.
#[derive(Debug, Clone)]
pub struct CreateCredential {
    pub login: String,
    pub password_hash: String,
}
