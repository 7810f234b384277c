use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::Error;
use crate::validation::FieldError;

pub const MSG_NOT_FOUND: &str = "Producto no encontrado";
pub const MSG_MALFORMED_BODY: &str = "JSON no valido";
pub const MSG_CORS_REJECTED: &str = "Error de CORS";
pub const MSG_PAYLOAD_TOO_LARGE: &str = "Cuerpo de la peticion demasiado grande";

#[derive(Debug)]
pub enum ApiError {
    /// Every failed field rule of one request
    Validation(Vec<FieldError>),
    MalformedBody,
    PayloadTooLarge,
    NotFound,
    CorsRejected,
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::CorsRejected => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body of a 400 response produced by field validation
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    pub errors: Vec<FieldError>,
}

/// Body of every other error response
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"error": "Producto no encontrado"}))]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        let message = match self {
            ApiError::Validation(errors) => {
                return (status, Json(ValidationErrorBody { errors })).into_response();
            }
            ApiError::MalformedBody => MSG_MALFORMED_BODY.to_string(),
            ApiError::PayloadTooLarge => MSG_PAYLOAD_TOO_LARGE.to_string(),
            ApiError::NotFound => MSG_NOT_FOUND.to_string(),
            ApiError::CorsRejected => MSG_CORS_REJECTED.to_string(),
            ApiError::Internal(msg) => msg,
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound { .. } => ApiError::NotFound,
            Error::Database { context, .. } | Error::Migration { context, .. } => {
                tracing::error!(error = %context, "Store operation failed");
                ApiError::Internal(context)
            }
            Error::Validation(msg)
            | Error::Config(msg)
            | Error::Transport(msg)
            | Error::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                ApiError::Internal(msg)
            }
            Error::Io(err) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::Internal(err.to_string())
            }
        }
    }
}
