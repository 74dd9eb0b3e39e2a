//! Repository error taxonomy.
//!
//! Callers match on variants; messages are for logs only.

/// SQLSTATE raised by `RAISE EXCEPTION` in the birthday-ordering triggers.
const RAISE_EXCEPTION: &str = "P0001";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The target row does not exist (update/delete).
    #[error("the requested entity does not exist in database")]
    NotFound,

    /// A cast member was born after the film's release date.
    #[error("one or more actors are not born before film release")]
    ActorNotBornBeforeRelease,

    /// A cast list references an actor id with no row.
    #[error("one or more actors mentioned in request do not exist in database")]
    ActorDoesNotExist,

    /// Credential login is already taken.
    #[error("user with this login is already registered")]
    AlreadyExists,

    /// No credential row for the requested login.
    #[error("user not found")]
    UserNotFound,

    /// The operation failed and rolling the transaction back failed too.
    #[error("{cause} (rollback failed: {rollback})")]
    Rollback {
        cause: Box<RepoError>,
        #[source]
        rollback: sqlx::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepoError {
    /// Translate errors raised while writing cast rows, or while changing a
    /// date the birthday-ordering triggers guard.
    pub(crate) fn from_cast_write(err: sqlx::Error) -> Self {
        if has_sqlstate(&err, RAISE_EXCEPTION) {
            RepoError::ActorNotBornBeforeRelease
        } else if has_sqlstate(&err, FOREIGN_KEY_VIOLATION) {
            RepoError::ActorDoesNotExist
        } else {
            RepoError::Database(err)
        }
    }

    /// Translate errors raised while inserting a credential row.
    pub(crate) fn from_credential_insert(err: sqlx::Error) -> Self {
        if has_sqlstate(&err, UNIQUE_VIOLATION) {
            RepoError::AlreadyExists
        } else {
            RepoError::Database(err)
        }
    }
}

fn has_sqlstate(err: &sqlx::Error, code: &str) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(code))
}
