//! Request shape checks shared by the user and auth routers.
//!
//! Bodies are only checked for presence and type: every required field must
//! be a JSON string. Each failing field yields its own [`FieldError`].

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::AppError;

const INVALID_VALUE: &str = "Invalid value";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

/// One rejected field, serialized as `{type, value?, msg, path, location}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: &'static str,
    pub path: &'static str,
    pub location: Location,
}

impl FieldError {
    fn new(path: &'static str, value: Option<Value>, location: Location) -> Self {
        Self {
            kind: "field",
            value,
            msg: INVALID_VALUE,
            path,
            location,
        }
    }
}

/// Payloads whose listed fields must all be present as strings.
pub trait TextFields: DeserializeOwned {
    const FIELDS: &'static [&'static str];
}

/// Returns one error per field in `fields` that is missing or not a string.
pub fn check_text_fields(body: &Value, fields: &'static [&'static str]) -> Vec<FieldError> {
    fields
        .iter()
        .filter_map(|&field| match body.get(field) {
            Some(Value::String(_)) => None,
            other => Some(FieldError::new(field, other.cloned(), Location::Body)),
        })
        .collect()
}

/// JSON body extractor that runs [`check_text_fields`] before deserializing.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: TextFields + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let raw = Bytes::from_request(req, state).await?;
        // an unreadable document validates the same as an empty one
        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        let errors = check_text_fields(&body, T::FIELDS);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        // every required field is a string here, so this only fails on T's own invariants
        serde_json::from_value(body).map(ValidatedJson).map_err(|_| {
            AppError::Validation(
                T::FIELDS
                    .iter()
                    .map(|&f| FieldError::new(f, None, Location::Body))
                    .collect(),
            )
        })
    }
}

/// Integer `:id` path segment. Values past the id column's range are left to
/// the service, which treats them as absent rather than malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        raw.parse::<i64>().map(UserId).map_err(|_| {
            AppError::Validation(vec![FieldError::new(
                "id",
                Some(Value::String(raw)),
                Location::Params,
            )])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[&str] = &["firstName", "lastName", "email", "password"];

    #[test]
    fn accepts_all_string_fields() {
        let body = json!({
            "firstName": "A",
            "lastName": "B",
            "email": "a@b.com",
            "password": "pw"
        });
        assert!(check_text_fields(&body, FIELDS).is_empty());
    }

    #[test]
    fn reports_each_invalid_field_once() {
        let body = json!({ "firstName": "A", "lastName": 42, "email": null });
        let errors = check_text_fields(&body, FIELDS);
        let paths: Vec<_> = errors.iter().map(|e| e.path).collect();
        assert_eq!(paths, vec!["lastName", "email", "password"]);
        assert_eq!(errors[0].value, Some(json!(42)));
        assert_eq!(errors[1].value, Some(Value::Null));
        assert_eq!(errors[2].value, None);
    }

    #[test]
    fn non_object_body_fails_every_field() {
        assert_eq!(check_text_fields(&json!([1, 2]), FIELDS).len(), 4);
        assert_eq!(check_text_fields(&Value::Null, FIELDS).len(), 4);
    }

    #[test]
    fn field_error_serializes_like_a_validator_entry() {
        let err = FieldError::new("email", Some(json!(5)), Location::Body);
        let v = serde_json::to_value(&err).unwrap();
        assert_eq!(
            v,
            json!({
                "type": "field",
                "value": 5,
                "msg": "Invalid value",
                "path": "email",
                "location": "body"
            })
        );

        let missing = FieldError::new("password", None, Location::Body);
        let v = serde_json::to_value(&missing).unwrap();
        assert!(v.get("value").is_none());
    }
}
