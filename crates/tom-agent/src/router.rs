use crate::classify::SmartClassifier;
use crate::tools::{ToolHandler, ToolOutcome};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use yp_core::intent::AccessPolicy;
use yp_core::{Intent, TomUser};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub handled: bool,
    pub tool: Intent,
    pub result: ToolOutcome,
}

/// Gatekeeper between an inbound message and the side-effecting tools.
///
/// A message reaches a handler only if the classified intent is on the
/// user's allow-list, the classification is confident enough, and the user
/// is the intent's owner. `None` means "not a tool request, answer
/// conversationally".
pub struct TomRouter {
    policy: AccessPolicy,
    classifier: SmartClassifier,
    threshold: f64,
    handlers: BTreeMap<Intent, Arc<dyn ToolHandler>>,
}

impl TomRouter {
    pub fn new(policy: AccessPolicy, classifier: SmartClassifier, threshold: f64) -> Self {
        Self {
            policy,
            classifier,
            threshold,
            handlers: BTreeMap::new(),
        }
    }

    /// Register `handler` for the intent it serves. A later handler for the
    /// same intent replaces the earlier one.
    pub fn with_handler(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        self.handlers.insert(handler.intent(), handler);
        self
    }

    pub fn classifier(&self) -> &SmartClassifier {
        &self.classifier
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub async fn route(&self, user: TomUser, message: &str) -> Option<RouteResult> {
        if self.policy.allowed_intents(user).is_empty() {
            tracing::debug!(%user, "user has no allowed intents");
            return None;
        }

        let c = self.classifier.classify(message, &user.cos_profile_id()).await;
        tracing::debug!(%user, intent = %c.intent, confidence = c.confidence, "classified");

        if !self.policy.is_allowed(user, c.intent) {
            tracing::debug!(%user, intent = %c.intent, "intent not allowed for user");
            return None;
        }
        if c.confidence < self.threshold {
            return None;
        }
        if self.policy.owner_of(c.intent) != Some(user) {
            return None;
        }

        let handler = self.handlers.get(&c.intent)?;
        match handler.handle(user, message).await {
            Ok(result) => {
                tracing::info!(%user, tool = %c.intent, outcome = result.kind(), "tool handled");
                Some(RouteResult {
                    handled: true,
                    tool: c.intent,
                    result,
                })
            }
            Err(e) => {
                tracing::error!(%user, tool = %c.intent, error = %e, "tool handler failed");
                None
            }
        }
    }
}
