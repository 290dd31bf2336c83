use std::collections::BTreeMap;

use thiserror::Error;

/// Field-level problem found before a request is sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::Negative { field } => field,
        }
    }
}

/// The backend could not be reached or answered with something unreadable.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("local storage failed: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("local storage migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        errors: BTreeMap<String, Vec<String>>,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Transport(_))
    }

    /// HTTP status of an [`AppError::Api`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.into())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Transport(err.into())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Transport(err.into())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Transport(err.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
