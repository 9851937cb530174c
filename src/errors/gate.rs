use thiserror::Error;

/// Requests that do not fit the user's current training stage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    #[error("Unknown training video {0}")]
    UnknownVideo(u32),

    #[error("Complete Video {required} before accessing Video {requested}")]
    VideoLocked { requested: u32, required: u32 },

    #[error("Watch all training videos before taking the quiz")]
    QuizUnavailable,

    #[error("Pass the quiz before submitting training completion")]
    QuizNotPassed,

    #[error("Training completion has already been submitted")]
    AlreadySubmitted,

    #[error("Dashboard access has already been granted")]
    AlreadyGranted,

    #[error("Candidate {0} has not completed training and scheduling")]
    CandidateNotReady(String),

    #[error("Candidate {0} not found")]
    CandidateNotFound(String),
}
