use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Cannot connect to server. Please check if the server is running.")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response from server: {0}")]
    Malformed(String),
}

pub type BackendResult<T> = Result<T, BackendError>;
