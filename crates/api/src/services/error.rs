use filmoteka_db::RepoError;

/// Failure of a service call. Repository kinds pass through unchanged so the
/// HTTP layer can map each to its own status.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    /// Login exists but the password does not match.
    #[error("wrong password")]
    WrongPassword,

    /// The password hasher failed or a stored hash is unreadable.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl From<argon2::password_hash::Error> for ServiceError {
    fn from(err: argon2::password_hash::Error) -> Self {
        ServiceError::Hashing(err.to_string())
    }
}
