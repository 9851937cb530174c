// Error types for the portal and the result alias used by handlers.
use thiserror::Error;

pub mod response;
pub mod backend;
pub mod validation;
pub mod gate;

pub use backend::{BackendError, BackendResult};
pub use validation::ValidationError;
pub use gate::GateError;
pub use response::SessionExpired;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // A 401 from the backend becomes Auth so the session is dropped.
    #[error("Backend error: {0}")]
    Backend(BackendError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Gate(#[from] GateError),

    #[error("Invalid path: {0}")]
    Path(#[from] axum::extract::rejection::PathRejection),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unauthorized => {
                AppError::Auth("Session expired. Please login again.".to_string())
            }
            other => AppError::Backend(other),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
