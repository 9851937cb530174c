use thiserror::Error;

/// Client-side validation failures, reported inline before any request
/// reaches the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please fill in all required fields ({0} is missing)")]
    MissingField(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number")]
    InvalidPhone,

    #[error("Please enter a valid budget amount")]
    InvalidBudget,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("A positive project value is required to complete a lead")]
    InvalidProjectValue,

    #[error("Unknown lead status: {0}")]
    UnknownStatus(String),
}
