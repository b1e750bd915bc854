use super::{apologize, ToolHandler, ToolOutcome, ToolSuccess};
use crate::generation::{generate_structured, ModelTier, StructuredGenerator, StructuredOutput};
use crate::messaging::Messenger;
use crate::Result;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};
use yp_core::{Intent, TomUser};

pub const REWRITE_PROMPT_MESSAGE: &str = "📝 Send me the text you'd like me to rewrite in Apple style.\n\nJust paste the current response and I'll make it premium.";
const APOLOGY: &str = "⚠️ Couldn't draft that response. Try rephrasing or send more context.";

/// Shortest rewrite body worth sending to the model.
const MIN_REWRITE_CHARS: usize = 10;

const APPLE_STYLE_PROMPT: &str = r#"You are an Apple Support writing expert. Rewrite customer communications to sound premium, empathetic, and solution-focused.

RULES:
1. Start with acknowledgment of the customer's situation
2. NEVER use: "unfortunately", "we can't", "policy states", "sorry but"
3. Always offer a path forward, even if it's small
4. End on a positive, forward-looking note
5. Sound human, warm, and genuinely helpful - not corporate
6. Keep responses concise (under 200 words for email, under 100 for chat)
7. Use the customer's name when available
8. Focus on what we CAN do, not what we can't

EXAMPLES OF GOOD VS BAD:
❌ "Unfortunately, our policy doesn't allow refunds after 30 days."
✅ "I completely understand wanting to make sure this works for you. While we're outside our standard window, let me see what options we can explore together."

❌ "Sorry, that feature isn't available."
✅ "Great question! That feature is on our roadmap. In the meantime, here's how you can achieve something similar..."

❌ "Your request has been received and will be processed."
✅ "I'm on it! You'll hear back from me personally within 24 hours.""#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Empathetic,
    Professional,
    Celebratory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDraft {
    pub customer_response: String,
    #[serde(default)]
    pub internal_note: Option<String>,
    pub tone: Tone,
}

impl StructuredOutput for PolicyDraft {
    const SCHEMA_NAME: &'static str = "policy_draft";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "customerResponse": { "type": "string" },
                "internalNote": { "type": "string" },
                "tone": { "type": "string", "enum": ["empathetic", "professional", "celebratory"] }
            },
            "required": ["customerResponse", "tone"]
        })
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.customer_response.trim().is_empty() {
            return Err("customerResponse is empty".to_string());
        }
        Ok(())
    }
}

static REWRITE_RE: OnceLock<Regex> = OnceLock::new();

fn rewrite_re() -> &'static Regex {
    REWRITE_RE.get_or_init(|| Regex::new(r"(?i)rewrite|rephrase|make this better|fix this").unwrap())
}

#[derive(Debug, PartialEq, Eq)]
enum Request {
    /// Rewrite the given text.
    Rewrite(String),
    /// Rewrite requested but no text to work on.
    RewriteMissingText,
    /// Draft from a situation description.
    Draft,
}

fn parse_request(message: &str) -> Request {
    let re = rewrite_re();
    if !re.is_match(message) {
        return Request::Draft;
    }
    let text = re.replace_all(message, "").trim().to_string();
    if text.chars().count() < MIN_REWRITE_CHARS {
        Request::RewriteMissingText
    } else {
        Request::Rewrite(text)
    }
}

fn rewrite_prompt(text: &str) -> String {
    format!("Rewrite this in Apple Support style:\n\n{text}")
}

fn draft_prompt(situation: &str) -> String {
    format!(
        "Draft a customer response for this situation:\n\nSituation: {situation}\n\nCreate a premium, empathetic response that resolves the situation positively."
    )
}

pub fn format_draft(draft: &PolicyDraft) -> String {
    let note = draft
        .internal_note
        .as_deref()
        .map(|n| format!("📋 _Internal note: {n}_"))
        .unwrap_or_default();
    format!(
        "🍎 *APPLE-STYLE DRAFT*\n\n{}\n\n{note}\n\n_Reply \"send\" to approve, or describe changes._",
        draft.customer_response
    )
}

// ─── Handler ──────────────────────────────────────────────────────────────

pub struct PolicyWriterTool {
    generator: Arc<dyn StructuredGenerator>,
    messenger: Arc<dyn Messenger>,
}

impl PolicyWriterTool {
    pub fn new(generator: Arc<dyn StructuredGenerator>, messenger: Arc<dyn Messenger>) -> Self {
        Self { generator, messenger }
    }

    async fn write(&self, prompt: &str) -> Result<PolicyDraft> {
        generate_structured::<PolicyDraft>(self.generator.as_ref(), ModelTier::Smart, APPLE_STYLE_PROMPT, prompt)
            .await
    }
}

#[async_trait::async_trait]
impl ToolHandler for PolicyWriterTool {
    fn intent(&self) -> Intent {
        Intent::PolicyDraft
    }

    async fn handle(&self, user: TomUser, message: &str) -> Result<ToolOutcome> {
        let prompt = match parse_request(message) {
            Request::RewriteMissingText => {
                self.messenger.send_text(user, REWRITE_PROMPT_MESSAGE).await?;
                return Ok(ToolOutcome::Clarification {
                    message: REWRITE_PROMPT_MESSAGE.to_string(),
                });
            }
            Request::Rewrite(text) => rewrite_prompt(&text),
            Request::Draft => draft_prompt(message),
        };

        let draft = match self.write(&prompt).await {
            Ok(d) => d,
            Err(e) => return Ok(apologize(self.messenger.as_ref(), user, "policy_writer", APOLOGY, &e).await),
        };

        if let Err(e) = self.messenger.send_text(user, &format_draft(&draft)).await {
            return Ok(apologize(self.messenger.as_ref(), user, "policy_writer", APOLOGY, &e).await);
        }

        Ok(ToolOutcome::Success(ToolSuccess {
            draft: Some(draft.customer_response),
            internal_note: draft.internal_note,
            ..Default::default()
        }))
    }
}
