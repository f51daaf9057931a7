//! Error types for QuickPoll
//!
//! Provides an error handling system with:
//! - Distinct error types for user-facing and infrastructure failures
//! - HTTP status code mapping
//! - Error codes for log correlation
//!
//! Search validation and missing vote selections are recovered by the
//! handlers and rendered as messages with a 200. Everything else reaches
//! the client through `IntoResponse for AppError`.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Search form validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required.")]
    Empty,

    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },

    #[error("'{word}' has been identified as an unhelpful word.")]
    BlockedWord { word: String },
}

/// Lookups that surface as a bare 404
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    #[error("no question with id {id}")]
    UnknownId { id: String },

    #[error("question {id} is not published yet")]
    UnpublishedQuestion { id: i32 },

    #[error("page {page} is out of range")]
    PageOutOfRange { page: String },
}

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    MissingVoteSelection,

    // Resource errors (4xxx)
    UnknownQuestion,
    UnpublishedQuestion,
    PageOutOfRange,

    // Database errors (7xxx)
    DatabaseError,
    ConnectionError,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::MissingVoteSelection => 1002,

            ErrorCode::UnknownQuestion => 4001,
            ErrorCode::UnpublishedQuestion => 4002,
            ErrorCode::PageOutOfRange => 4003,

            ErrorCode::DatabaseError => 7001,
            ErrorCode::ConnectionError => 7002,

            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(#[from] NotFound),

    #[error("You didn't select a choice.")]
    MissingVoteSelection,

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Database connection error: {message}")]
    DatabaseConnection { message: String },

    // Internal errors
    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::MissingVoteSelection => ErrorCode::MissingVoteSelection,
            AppError::NotFound(NotFound::UnknownId { .. }) => ErrorCode::UnknownQuestion,
            AppError::NotFound(NotFound::UnpublishedQuestion { .. }) => ErrorCode::UnpublishedQuestion,
            AppError::NotFound(NotFound::PageOutOfRange { .. }) => ErrorCode::PageOutOfRange,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::DatabaseConnection { .. } => ErrorCode::ConnectionError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Recovered into a re-render by the handlers; 200 if one leaks through
            AppError::Validation(_) |
            AppError::MissingVoteSelection => StatusCode::OK,

            // 404 Not Found
            AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            AppError::Database(_) |
            AppError::DatabaseConnection { .. } |
            AppError::Internal { .. } |
            AppError::Configuration { .. } |
            AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Shorthand for an unknown question id
    pub fn unknown_id(id: impl ToString) -> Self {
        AppError::NotFound(NotFound::UnknownId { id: id.to_string() })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        // Log based on severity
        if self.is_server_error() {
            tracing::error!(
                error = %message,
                code = code.as_code(),
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %message,
                code = code.as_code(),
                status = status.as_u16(),
                "Client error"
            );
        }

        // Detail stays in the logs; the page only carries the reason phrase
        let body = match &self {
            AppError::Validation(err) => format!("<p class=\"error\">{}</p>", err),
            AppError::MissingVoteSelection => format!("<p class=\"error\">{}</p>", self),
            _ => format!(
                "<!doctype html><html><head><meta charset=\"utf-8\"><title>{reason}</title></head>\
                 <body><h1>{reason}</h1></body></html>",
                reason = status.canonical_reason().unwrap_or("Error"),
            ),
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration {
            message: err.to_string()
        }
    }
}
