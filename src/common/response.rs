use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::validation::Violations;

/// Standard response envelope
///
/// Every endpoint answers with a JSON object carrying a `status` field that
/// mirrors the HTTP status code, plus the payload under a resource-specific
/// key (`"board"`, `"boards"`), a `message`, or both.
///
/// # Example
/// ```
/// use axum::http::StatusCode;
/// use boardhub::common::response::Envelope;
///
/// // {"status":404, "message":"Board not found"}
/// let not_found = Envelope::message(StatusCode::NOT_FOUND, "Board not found");
/// ```
#[derive(Debug)]
pub struct Envelope {
    status: StatusCode,
    body: Map<String, Value>,
}

impl Envelope {
    fn new(status: StatusCode) -> Self {
        let mut body = Map::new();
        body.insert("status".to_owned(), json!(status.as_u16()));
        Self { status, body }
    }

    /// `{"status":200, "<plural>":[record...]}`
    pub fn collection<T: Serialize>(key: &str, records: &[T]) -> crate::Result<Self> {
        let mut envelope = Self::new(StatusCode::OK);
        envelope
            .body
            .insert(key.to_owned(), serde_json::to_value(records)?);
        Ok(envelope)
    }

    /// `{"status":200, "<singular>":record}`
    pub fn record<T: Serialize>(key: &str, record: &T) -> crate::Result<Self> {
        let mut envelope = Self::new(StatusCode::OK);
        envelope
            .body
            .insert(key.to_owned(), serde_json::to_value(record)?);
        Ok(envelope)
    }

    /// `{"status":<code>, "message":"..."}`
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        let mut envelope = Self::new(status);
        envelope
            .body
            .insert("message".to_owned(), Value::String(message.into()));
        envelope
    }

    /// `{"status":422, "errors":{field:[msg...]}, "message":"Validation failed"}`
    pub fn validation_failed(errors: &Violations) -> Self {
        let mut envelope = Self::message(StatusCode::UNPROCESSABLE_ENTITY, "Validation failed");
        envelope.body.insert("errors".to_owned(), json!(errors));
        envelope
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status, Json(Value::Object(self.body))).into_response()
    }
}
