use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use validator::{ValidationError, ValidationErrors};

/// Single entry of a rejected request: which field failed and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    fn from_validation_error(field: &str, error: &ValidationError) -> Self {
        let message = match &error.message {
            Some(message) => message.to_string(),
            None => error.code.to_string(),
        };
        Self::new(field, error.code.to_string(), message)
    }
}

/// Raised when an inbound body does not conform to the request schema.
#[derive(Debug, thiserror::Error)]
#[error("request validation failed")]
pub struct RequestValidationError {
    status: StatusCode,
    violations: Vec<FieldViolation>,
}

impl RequestValidationError {
    pub(crate) fn required(field: &str) -> Self {
        Self::field(field, "required", "field required")
    }

    /// The payload as a whole does not fit the schema.
    pub(crate) fn malformed_body(code: &str, message: impl Into<String>) -> Self {
        Self::field("body", code, message)
    }

    pub(crate) fn field(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self::unprocessable(vec![FieldViolation::new(field, code, message)])
    }

    fn unprocessable(violations: Vec<FieldViolation>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            violations,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// JSON payload returned to callers alongside [`Self::status`].
    pub fn body(&self) -> serde_json::Value {
        json!({
            "error": self.to_string(),
            "detail": self.violations,
        })
    }
}

impl From<ValidationErrors> for RequestValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let field = field.to_string();
                errors
                    .iter()
                    .map(move |error| FieldViolation::from_validation_error(&field, error))
            })
            .collect();
        violations.sort_by(|left, right| left.field.cmp(&right.field));

        Self::unprocessable(violations)
    }
}

impl From<BytesRejection> for RequestValidationError {
    fn from(rejection: BytesRejection) -> Self {
        Self::malformed_body("body_unreadable", rejection.body_text())
    }
}

impl IntoResponse for RequestValidationError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}
