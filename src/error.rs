use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::{json, Map, Value};
use thiserror::Error;
use validator::ValidationErrors;

/// Failure of a call to one of the external collaborators.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request to {service} failed: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} rejected the request: {message}")]
    Rejected {
        service: &'static str,
        message: String,
    },

    #[error("image upload failed")]
    ImageUploadFailed,
}

impl UpstreamError {
    pub fn http(service: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| UpstreamError::Http { service, source }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("malformed request: {0}")]
    BadRequest(String),

    #[error("{field} exceeds the {limit} byte limit")]
    PayloadTooLarge { field: String, limit: usize },

    #[error("{stage} failed: {source}")]
    Upstream {
        stage: &'static str,
        #[source]
        source: UpstreamError,
    },

    #[error("submission already in progress")]
    Busy,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("session error: {0}")]
    Session(#[from] jsonwebtoken::errors::Error),
}

/// Flattens validator output into `{field: [message, ...]}`.
pub fn field_messages(errors: &ValidationErrors) -> Value {
    let mut fields = Map::new();
    for (field, errs) in errors.field_errors() {
        let messages: Vec<Value> = errs
            .iter()
            .map(|e| {
                let text = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                Value::String(text)
            })
            .collect();
        fields.insert(field.to_string(), Value::Array(messages));
    }
    Value::Object(fields)
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) | AppError::Session(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Busy => StatusCode::CONFLICT,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => json!({
                "error": "Validation failed",
                "errors": field_messages(errors),
            }),
            AppError::Session(_) => json!({ "error": "Invalid or expired session" }),
            other => json!({ "error": other.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
