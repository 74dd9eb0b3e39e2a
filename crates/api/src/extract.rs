//! Request extractors with JSON error rejections.
//!
//! - [`StrictJson`]: body must be `application/json`, free of duplicate keys
//!   and duplicate array scalars, free of unknown fields (via
//!   `#[serde(deny_unknown_fields)]` on the target) and must pass the
//!   target's `validator` rules.
//! - [`EntityId`]: `{id}` path segment that must be a positive integer.
//! - [`ApiQuery`]: `axum::extract::Query` with an [`AppError`] rejection.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use filmoteka_core::error::CoreError;
use filmoteka_core::json_check::check_duplicates;
use filmoteka_core::types::DbId;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

// ---------------------------------------------------------------------------
// JSON body
// ---------------------------------------------------------------------------

/// Validated JSON request body.
#[derive(Debug)]
pub struct StrictJson<T>(pub T);

impl<S, T> FromRequest<S> for StrictJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Err(AppError::BadRequest("wrong MIME type used".into()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        // Runs on the raw bytes: serde would silently keep the last of two
        // equal keys.
        check_duplicates(&bytes).map_err(CoreError::from)?;

        let value: T = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::BadRequest(format!("something is wrong in request: {e}")))?;

        value
            .validate()
            .map_err(|errors| CoreError::Validation(describe(&errors)))?;

        Ok(StrictJson(value))
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Flatten field errors into one message, ordered by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// Path id
// ---------------------------------------------------------------------------

/// Positive integer `{id}` path parameter.
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub DbId);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("id not found in request".into()))?;
        parse_id(&raw).map(EntityId)
    }
}

fn parse_id(raw: &str) -> Result<DbId, AppError> {
    match raw.parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        Ok(_) => Err(AppError::BadRequest("id must be a positive number".into())),
        Err(_) => Err(AppError::BadRequest("not a numeric id provided".into())),
    }
}

// ---------------------------------------------------------------------------
// Query string
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(ApiQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::body::Body;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(deny_unknown_fields)]
    struct Payload {
        #[validate(length(min = 1, message = "name not found in request or is empty"))]
        name: String,
        #[serde(default)]
        tags: Vec<i64>,
    }

    async fn extract(content_type: Option<&str>, body: &'static str) -> Result<Payload, AppError> {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        let req = builder.body(Body::from(body)).unwrap();
        StrictJson::<Payload>::from_request(req, &()).await.map(|StrictJson(p)| p)
    }

    #[tokio::test]
    async fn accepts_well_formed_body() {
        let body = r#"{"name":"x","tags":[1,2]}"#;
        let payload = extract(Some("application/json; charset=utf-8"), body)
            .await
            .unwrap();
        assert_eq!(payload.name, "x");
        assert_eq!(payload.tags, vec![1, 2]);
    }

    #[tokio::test]
    async fn requires_json_content_type() {
        assert_matches!(
            extract(None, r#"{"name":"x"}"#).await,
            Err(AppError::BadRequest(msg)) if msg == "wrong MIME type used"
        );
        assert_matches!(
            extract(Some("text/plain"), r#"{"name":"x"}"#).await,
            Err(AppError::BadRequest(_))
        );
    }

    #[tokio::test]
    async fn duplicate_key_is_rejected_before_decoding() {
        assert_matches!(
            extract(Some("application/json"), r#"{"name":"x","name":""}"#).await,
            Err(AppError::Core(CoreError::Validation(msg))) if msg.contains("$.name")
        );
        assert_matches!(
            extract(Some("application/json"), r#"{"name":"x","tags":[3,3]}"#).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    #[tokio::test]
    async fn unknown_field_is_rejected() {
        assert_matches!(
            extract(Some("application/json"), r#"{"name":"x","extra":1}"#).await,
            Err(AppError::BadRequest(msg)) if msg.contains("extra")
        );
    }

    #[tokio::test]
    async fn validator_rules_apply() {
        assert_matches!(
            extract(Some("application/json"), r#"{"name":""}"#).await,
            Err(AppError::Core(CoreError::Validation(msg)))
                if msg == "name not found in request or is empty"
        );
    }

    #[test]
    fn ids_must_be_positive_numbers() {
        assert_eq!(parse_id("17").unwrap(), 17);
        assert_matches!(parse_id("0"), Err(AppError::BadRequest(_)));
        assert_matches!(parse_id("-3"), Err(AppError::BadRequest(_)));
        assert_matches!(
            parse_id("abc"),
            Err(AppError::BadRequest(msg)) if msg == "not a numeric id provided"
        );
    }
}
