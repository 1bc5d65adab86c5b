use thiserror::Error;

#[derive(Debug, Error)]
pub enum LotteryError {
    #[error("not initialized: run 'lottery init'")]
    NotInitialized,

    #[error("Need at least 2 participants (found {found})")]
    InsufficientParticipants { found: usize },

    #[error("Name already signed up: {0}")]
    DuplicateName(String),

    #[error("Email already signed up: {0}")]
    DuplicateEmail(String),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid roster '{0}': must be A or B")]
    InvalidRoster(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LotteryError>;
