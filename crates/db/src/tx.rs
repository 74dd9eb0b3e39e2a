//! Transaction completion helpers.
//!
//! Repositories run their statements against a `Transaction`, then hand the
//! outcome to [`finish`]: success commits, failure rolls back explicitly so a
//! rollback error is reported instead of being swallowed by `Drop`.
//!
//! If the surrounding request future is dropped (client gone, deadline hit)
//! before `finish` runs, sqlx rolls the open transaction back on drop.

use sqlx::{Postgres, Transaction};

use crate::error::RepoError;

pub(crate) async fn finish<T>(
    tx: Transaction<'_, Postgres>,
    outcome: Result<T, RepoError>,
) -> Result<T, RepoError> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(cause) => Err(rollback(tx, cause).await),
    }
}

async fn rollback(tx: Transaction<'_, Postgres>, cause: RepoError) -> RepoError {
    match tx.rollback().await {
        Ok(()) => cause,
        Err(rollback) => {
            tracing::error!(error = %rollback, cause = %cause, "Transaction rollback failed");
            RepoError::Rollback {
                cause: Box::new(cause),
                rollback,
            }
        }
    }
}
