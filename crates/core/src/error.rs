use crate::json_check::JsonCheckError;

/// Request-level error raised before any repository call.
///
/// Each variant maps to exactly one HTTP status in the API crate. Missing
/// rows and conflicts come from the repository layer instead.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// 400. Client-correctable input problem.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 401. Missing or unverifiable credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 403. Verified caller without the required privilege.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl From<JsonCheckError> for CoreError {
    fn from(err: JsonCheckError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
