//! Side-effecting tools, one per routable intent.
//!
//! Every handler follows the same shape: optionally ask for clarification,
//! otherwise make exactly one external call, format the result, and send
//! it to the user. External failures become an apology message plus
//! [`ToolOutcome::Error`]; they are not returned as `Err`.

pub mod policy_writer;
pub mod product_viz;
pub mod trend_search;

use crate::messaging::Messenger;
use crate::Result;
use serde::{Deserialize, Serialize};
use yp_core::{Intent, TomUser};

pub use policy_writer::PolicyWriterTool;
pub use product_viz::{GeminiImageGenerator, ImageGenerator, ProductVizTool};
pub use trend_search::{PerplexityTrendSource, TrendSearchTool, TrendSource, TrendingTopic};

#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// The intent this handler serves.
    fn intent(&self) -> Intent;

    /// `Err` is reserved for failures outside the external call itself,
    /// such as an undeliverable clarification message.
    async fn handle(&self, user: TomUser, message: &str) -> Result<ToolOutcome>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolOutcome {
    Clarification { message: String },
    Success(ToolSuccess),
    Error { message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSuccess {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trends: Vec<TrendingTopic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_note: Option<String>,
}

impl ToolOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            ToolOutcome::Clarification { .. } => "clarification",
            ToolOutcome::Success(_) => "success",
            ToolOutcome::Error { .. } => "error",
        }
    }
}

/// Tell the user something went wrong and build the error outcome. A
/// failed apology is logged, never raised.
pub(crate) async fn apologize(
    messenger: &dyn Messenger,
    user: TomUser,
    tool: &'static str,
    apology: &str,
    error: &crate::TomError,
) -> ToolOutcome {
    tracing::error!(tool, %user, error = %error, "tool call failed");
    if let Err(e) = messenger.send_text(user, apology).await {
        tracing::warn!(tool, %user, error = %e, "apology not delivered");
    }
    ToolOutcome::Error {
        message: error.to_string(),
    }
}

/// First `max` characters followed by an ellipsis.
pub(crate) fn excerpt(text: &str, max: usize) -> String {
    let head: String = text.chars().take(max).collect();
    format!("{head}...")
}
