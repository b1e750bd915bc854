use thiserror::Error;

#[derive(Debug, Error)]
pub enum YpError {
    #[error("voice profile not found: {0}")]
    VoiceNotFound(String),

    #[error("unknown Tom user: {0}")]
    UnknownUser(String),

    #[error("unknown intent: {0}")]
    UnknownIntent(String),

    #[error("unknown personality mode: {0}")]
    UnknownMode(String),

    #[error("unknown content type: {0}")]
    UnknownContentType(String),

    #[error("invalid consolidation rules: {0}")]
    InvalidRules(String),

    #[error("invalid gap '{keyword}': {reason}")]
    InvalidGap { keyword: String, reason: String },

    #[error("unrecognized scoring input for '{keyword}': {reason}")]
    StrictScoring { keyword: String, reason: String },

    #[error("gap file not found: {0}")]
    GapFileNotFound(String),

    #[error("task store error: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, YpError>;
