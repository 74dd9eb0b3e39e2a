use async_trait::async_trait;
use filmoteka_db::models::credential::CreateCredential;
use filmoteka_db::repositories::CredentialRepo;
use filmoteka_db::DbPool;

use super::ServiceError;
use crate::auth::password::{hash_password, verify_password};

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Store a new login with a hashed password.
    async fn register(&self, login: &str, password: &str) -> Result<(), ServiceError>;

    /// Succeeds only if the login exists and the password matches.
    async fn check_credentials(&self, login: &str, password: &str) -> Result<(), ServiceError>;

    /// Current privilege flag of a login.
    async fn is_admin(&self, login: &str) -> Result<bool, ServiceError>;
}

pub struct PgAuthService {
    pool: DbPool,
}

impl PgAuthService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, login: &str, password: &str) -> Result<(), ServiceError> {
        let input = CreateCredential {
            login: login.to_string(),
            password_hash: hash_password(password)?,
        };
        CredentialRepo::create(&self.pool, &input).await?;
        Ok(())
    }

    async fn check_credentials(&self, login: &str, password: &str) -> Result<(), ServiceError> {
        let credential = CredentialRepo::find_by_login(&self.pool, login).await?;
        if verify_password(password, &credential.password_hash)? {
            Ok(())
        } else {
            Err(ServiceError::WrongPassword)
        }
    }

    async fn is_admin(&self, login: &str) -> Result<bool, ServiceError> {
        Ok(CredentialRepo::is_admin(&self.pool, login).await?)
    }
}
