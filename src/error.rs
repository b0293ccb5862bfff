//! Custom error types and handling
//!
//! This module defines the judging error taxonomy and the application's HTTP
//! error type, including its conversion to responses for the Axum framework.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Errors raised while judging a submission.
///
/// The first four variants are judging outcomes: the judges translate them
/// into a verdict status right where they happen. The remaining variants are
/// infrastructure failures and propagate to the caller of the judge.
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Compilation failed:\n{0}")]
    Compilation(String),

    #[error("Time limit of {limit_ms}ms exceeded")]
    Timeout { limit_ms: u64 },

    #[error("{message}")]
    Process { exit_code: i32, message: String },

    #[error("Failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Remote judge error: {0}")]
    Remote(String),
}

impl JudgeError {
    /// Whether this error is a system failure rather than a judging outcome
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Spawn { .. } | Self::Io(_) | Self::Remote(_))
    }
}

impl From<reqwest::Error> for JudgeError {
    fn from(err: reqwest::Error) -> Self {
        JudgeError::Remote(err.to_string())
    }
}

impl From<base64::DecodeError> for JudgeError {
    fn from(err: base64::DecodeError) -> Self {
        JudgeError::Remote(format!("invalid base64 payload: {}", err))
    }
}

/// Result type alias using JudgeError
pub type JudgeResult<T> = Result<T, JudgeError>;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Judge errors
    #[error("Execution environment error: {0}")]
    Execution(String),

    #[error("Remote judge unavailable: {0}")]
    RemoteJudge(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Execution(_) => "EXECUTION_ERROR",
            Self::RemoteJudge(_) => "REMOTE_JUDGE_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::RemoteJudge(_) => StatusCode::BAD_GATEWAY,
            Self::Execution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log execution failures but don't expose details to clients
        let message = match &self {
            AppError::Execution(e) => {
                tracing::error!("Execution environment error: {}", e);
                "The judge could not execute the submission".to_string()
            }
            AppError::RemoteJudge(e) => {
                tracing::error!("Remote judge error: {}", e);
                self.to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<JudgeError> for AppError {
    fn from(err: JudgeError) -> Self {
        match err {
            JudgeError::Remote(msg) => AppError::RemoteJudge(msg),
            JudgeError::UnsupportedLanguage(_) => AppError::Validation(err.to_string()),
            other => AppError::Execution(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_classification() {
        assert!(JudgeError::Remote("down".into()).is_infrastructure());
        assert!(JudgeError::Io(std::io::Error::other("disk")).is_infrastructure());
        assert!(!JudgeError::Timeout { limit_ms: 10 }.is_infrastructure());
        assert!(!JudgeError::Compilation("x".into()).is_infrastructure());
        assert!(!JudgeError::UnsupportedLanguage("ruby".into()).is_infrastructure());
    }

    #[test]
    fn test_judge_error_maps_to_http_status() {
        let err: AppError = JudgeError::Remote("503".into()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), "REMOTE_JUDGE_ERROR");

        let err: AppError = JudgeError::Spawn {
            program: "python3".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_execution_error_details_stay_private() {
        let err: AppError = JudgeError::Io(std::io::Error::other("/tmp/codearena-judge is full")).into();
        assert_eq!(err.error_code(), "EXECUTION_ERROR");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_timeout_message() {
        let err = JudgeError::Timeout { limit_ms: 500 };
        assert_eq!(err.to_string(), "Time limit of 500ms exceeded");
    }
}
