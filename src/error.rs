// Error types for ghusers.
// Crate-level errors plus the user-facing taxonomy shown in the UI.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhUsersError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Missing GITHUB_TOKEN environment variable")]
    MissingToken,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GhUsersError>;

const NETWORK_MESSAGE: &str = "Network error. Please check your connection.";
const DATABASE_MESSAGE: &str = "A local database error occurred.";

/// Error categories surfaced to the user as transient messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    NetworkError { message: String },
    HttpApiError { message: String, code: u16 },
    DatabaseError { message: String },
    UnknownError { message: String },
}

impl AppError {
    pub fn message(&self) -> &str {
        match self {
            AppError::NetworkError { message }
            | AppError::HttpApiError { message, .. }
            | AppError::DatabaseError { message }
            | AppError::UnknownError { message } => message,
        }
    }

    /// Friendlier text for the handful of statuses users actually hit.
    fn http_message(status: StatusCode) -> &'static str {
        match status {
            StatusCode::NOT_FOUND => "Resource not found.",
            StatusCode::UNPROCESSABLE_ENTITY => "Validation failed. Please check your input.",
            StatusCode::SERVICE_UNAVAILABLE => "Service is temporarily unavailable.",
            _ => "API error occurred.",
        }
    }
}

impl From<&GhUsersError> for AppError {
    fn from(err: &GhUsersError) -> Self {
        match err {
            // A body that fails to decode is not a connectivity problem.
            GhUsersError::Network(e) if e.is_decode() => AppError::UnknownError {
                message: e.to_string(),
            },
            GhUsersError::Network(_) | GhUsersError::Io(_) => AppError::NetworkError {
                message: NETWORK_MESSAGE.to_string(),
            },
            GhUsersError::Http { status, .. } => AppError::HttpApiError {
                message: Self::http_message(*status).to_string(),
                code: status.as_u16(),
            },
            GhUsersError::Database(_) => AppError::DatabaseError {
                message: DATABASE_MESSAGE.to_string(),
            },
            other => AppError::UnknownError {
                message: other.to_string(),
            },
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::HttpApiError { message, code } => write!(f, "{} ({})", message, code),
            other => f.write_str(other.message()),
        }
    }
}
