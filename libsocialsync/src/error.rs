//! Error types for Social Sync

use thiserror::Error;

use crate::types::ContentType;

pub type Result<T> = std::result::Result<T, SocialSyncError>;

#[derive(Error, Debug)]
pub enum SocialSyncError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Schedule rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cannot submit: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Image search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Publish failed: {0}")]
    Publish(#[from] PublishError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SocialSyncError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SocialSyncError::InvalidInput(_) => 3,
            SocialSyncError::Validation(_) => 3,
            SocialSyncError::Submission(_) => 3,
            SocialSyncError::Config(_) => 2,
            SocialSyncError::Search(_) => 1,
            SocialSyncError::Publish(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Schedule dialog validation failures
///
/// These are shown inline on the schedule dialog; the messages are the
/// ones the user sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a date")]
    MissingDate,

    #[error("Please select a time")]
    MissingTime,

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time '{0}' (expected HH:MM)")]
    InvalidTime(String),

    #[error("Please select a future date and time")]
    NotFuture,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("no {0} accounts selected")]
    NoAudience(ContentType),

    #[error("draft has no text and no images")]
    EmptyDraft,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Parse(String),

    #[error("No access key configured for the image search provider")]
    MissingCredentials,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("Publish endpoint rejected the request: {0}")]
    Rejected(String),

    #[error("Publish endpoint unavailable: {0}")]
    Unavailable(String),
}
