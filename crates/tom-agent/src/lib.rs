//! `tom-agent`: the async side of Tom, the team's chief-of-staff agent.
//!
//! Inbound WhatsApp messages are classified, checked against per-user
//! permissions, and dispatched to at most one tool. Everything that talks
//! to the network sits behind a trait so handlers and the router can be
//! exercised with in-memory fakes.
//!
//! # Architecture
//!
//! ```text
//! (user, message)
//!     │
//!     ▼
//! TomRouter         ← allow-list, confidence floor, tool owner
//!     │
//!     ├── SmartClassifier   ← pattern table, then one FAST-tier call
//!     │       │
//!     │       ▼
//!     │   StructuredGenerator (Anthropic Messages API)
//!     ▼
//! ToolHandler       ← product viz / trend search / policy draft
//!     │
//!     ├── ImageGenerator (Gemini) · TrendSource (Perplexity)
//!     ▼
//! Messenger         ← WhatsApp Cloud API
//! ```

pub mod classify;
pub mod error;
pub mod generation;
pub mod messaging;
pub mod router;
pub mod tools;

#[cfg(test)]
pub(crate) mod fakes;

use std::sync::Arc;
use yp_core::config::TomConfig;
use yp_core::intent::{AccessPolicy, IntentClassifier};

pub use classify::SmartClassifier;
pub use error::TomError;
pub use generation::{AnthropicGenerator, ModelTier, StructuredGenerator, StructuredOutput};
pub use messaging::{Messenger, WhatsAppMessenger};
pub use router::{RouteResult, TomRouter};
pub use tools::{ToolHandler, ToolOutcome, ToolSuccess};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, TomError>;

/// Build a router wired to the production collaborators. Credentials come
/// from the environment; a missing key degrades the matching collaborator
/// rather than failing here.
pub fn router_from_config(config: &TomConfig) -> Result<TomRouter> {
    let timeout = config.request_timeout();
    let generator: Arc<dyn StructuredGenerator> =
        Arc::new(AnthropicGenerator::from_env(config.models.clone(), timeout)?);
    let messenger: Arc<dyn Messenger> = Arc::new(WhatsAppMessenger::from_env(config)?);
    let images = Arc::new(tools::GeminiImageGenerator::from_env(timeout)?);
    let trends = Arc::new(tools::PerplexityTrendSource::from_env(timeout)?);

    let classifier = SmartClassifier::new(
        IntentClassifier::builtin()?,
        generator.clone(),
        config.fast_confidence_threshold,
    );

    Ok(
        TomRouter::new(AccessPolicy::builtin(), classifier, config.route_confidence_threshold)
            .with_handler(Arc::new(tools::ProductVizTool::new(images, messenger.clone())))
            .with_handler(Arc::new(tools::TrendSearchTool::new(trends, messenger.clone())))
            .with_handler(Arc::new(tools::PolicyWriterTool::new(generator, messenger))),
    )
}
