//! HTTP-level error handling for the admissions API
//!
//! This module provides the error type for the non-GraphQL routes using
//! thiserror, with automatic HTTP status code mapping via Axum's
//! IntoResponse trait. GraphQL resolvers report failures through the
//! schema instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::graphql::loaders::LoaderError;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client-side handling
    pub code: &'static str,
    /// Human-readable error message
    pub message: String,
}

/// Error type for the HTTP surface outside GraphQL
#[derive(Error, Debug)]
pub enum ApiError {
    /// Database query failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database connection pool exhausted
    #[error("database connection unavailable")]
    DatabaseUnavailable,

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        let error_response = ErrorResponse {
            code: self.error_code(),
            message: self.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<LoaderError> for ApiError {
    fn from(err: LoaderError) -> Self {
        match err {
            LoaderError::Database(e) => Self::Database(e),
            other => Self::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::DatabaseUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Internal("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ApiError::DatabaseUnavailable.error_code(),
            "DATABASE_UNAVAILABLE"
        );
        assert_eq!(
            ApiError::Configuration("missing".into()).error_code(),
            "CONFIGURATION_ERROR"
        );
    }

    #[test]
    fn test_loader_errors_map_to_api_errors() {
        let err = ApiError::from(LoaderError::UnknownColumn("bogus".into()));
        assert_eq!(err.error_code(), "INTERNAL_ERROR");

        let err = ApiError::from(LoaderError::Database(sqlx::Error::RowNotFound));
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Configuration("PORT is not a number".into());
        assert_eq!(err.to_string(), "configuration error: PORT is not a number");
    }
}
