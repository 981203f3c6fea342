use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

/// A single violated input constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    /// Name of the offending body field.
    #[schema(example = "full_name")]
    pub field: String,
    #[schema(example = "Full name must be at least 3 characters long")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `PERSISTENCE_ERROR`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Title must be at least 3 characters long")]
    pub message: String,
    /// Every violated field constraint, in field order. Only present on
    /// validation failures of a request body.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid fields: {}", join_messages(.0))]
    InvalidFields(Vec<FieldError>),
    #[error("not found: {0}")]
    NotFound(String),
    /// A store write rejected a payload that passed validation.
    #[error("persistence failed: {0}")]
    Persistence(String),
    #[error("internal error: {0}")]
    Internal(String),
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// Map a failed store write during create/update.
    pub fn persistence(err: DbErr) -> Self {
        AppError::Persistence(err.to_string())
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                    errors: Vec::new(),
                },
            ),
            AppError::InvalidFields(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: join_messages(&errors),
                    errors,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                    errors: Vec::new(),
                },
            ),
            AppError::Persistence(msg) => {
                tracing::warn!("Store rejected write: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        code: "PERSISTENCE_ERROR",
                        message: msg,
                        errors: Vec::new(),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: detail,
                        errors: Vec::new(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}
