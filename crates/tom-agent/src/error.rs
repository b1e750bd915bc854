use thiserror::Error;
use yp_core::{TomUser, YpError};

#[derive(Debug, Error)]
pub enum TomError {
    #[error(transparent)]
    Core(#[from] YpError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("generation failed: {0}")]
    Generation(String),

    #[error("output does not match schema '{schema}': {reason}")]
    Schema { schema: &'static str, reason: String },

    #[error("no WhatsApp number configured for user {0}")]
    MissingPhone(TomUser),

    #[error("messaging failed: {0}")]
    Messaging(String),

    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },
}
