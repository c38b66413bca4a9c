use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{FromRequest, FromRequestParts},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fields::FieldErrors;
use jobs::JobError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use user::UserError;

/// API Error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Logged in full, rendered without detail.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure for OpenAPI documentation
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Convert error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for the error type
    pub fn error_code(&self) -> &str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn body(&self) -> ApiErrorResponse {
        let (message, details) = match self {
            ApiError::Validation(fields) => (self.to_string(), Some(json!({ "fields": fields }))),
            ApiError::Internal(_) => ("An internal error occurred".to_string(), None),
            _ => (self.to_string(), None),
        };

        ApiErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message,
                details,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            error!("Internal error while handling request: {}", detail);
        }
        let status = self.status_code();
        (status, Json(self.body())).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(fields) => ApiError::Validation(fields),
            UserError::UserNotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailTaken(_) | UserError::UserOwnsJobs(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::InvalidToken(_) => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            UserError::PermissionDenied(message) => ApiError::Forbidden(message),
            UserError::Database(_) | UserError::PasswordHash(_) | UserError::Configuration(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::NotFound(message) => ApiError::NotFound(message),
            JobError::Forbidden(message) => ApiError::Forbidden(message),
            JobError::Validation(fields) => ApiError::Validation(fields),
            JobError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<entities::EntitiesError> for ApiError {
    fn from(err: entities::EntitiesError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<database::DatabaseError> for ApiError {
    fn from(err: database::DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// JSON body extractor whose rejections use the API error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections use the API error shape.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Path extractor whose rejections use the API error shape.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
