use crate::generation::{generate_structured, ModelTier, StructuredGenerator, StructuredOutput};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use yp_core::intent::{Classification, IntentClassifier};
use yp_core::Intent;

/// Model reply for intent classification.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntentReply {
    intent: Intent,
    confidence: f64,
    #[serde(default)]
    extracted_details: Option<BTreeMap<String, Value>>,
}

impl StructuredOutput for IntentReply {
    const SCHEMA_NAME: &'static str = "tom_intent";

    fn json_schema() -> Value {
        let intents: Vec<&str> = Intent::all().iter().map(|i| i.as_str()).collect();
        json!({
            "type": "object",
            "properties": {
                "intent": { "type": "string", "enum": intents },
                "confidence": { "type": "number", "minimum": 0, "maximum": 1 },
                "extractedDetails": { "type": "object" }
            },
            "required": ["intent", "confidence"]
        })
    }

    fn validate(&self) -> Result<(), String> {
        if (0.0..=1.0).contains(&self.confidence) {
            Ok(())
        } else {
            Err(format!("confidence {} is outside 0-1", self.confidence))
        }
    }
}

fn classification_prompt(profile_id: &str) -> String {
    let intents = Intent::all()
        .iter()
        .map(|i| format!("- {}: {}", i.as_str(), i.description()))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Classify the user's intent. User's voice profile: {profile_id}\n\nAvailable intents:\n{intents}"
    )
}

// ─── SmartClassifier ──────────────────────────────────────────────────────

/// Pattern classifier first; a model call only when the pattern result is
/// not confident enough.
pub struct SmartClassifier {
    fast: IntentClassifier,
    generator: Arc<dyn StructuredGenerator>,
    threshold: f64,
}

impl SmartClassifier {
    pub fn new(fast: IntentClassifier, generator: Arc<dyn StructuredGenerator>, threshold: f64) -> Self {
        Self {
            fast,
            generator,
            threshold,
        }
    }

    pub fn fast(&self) -> &IntentClassifier {
        &self.fast
    }

    /// Never fails. Any generator error, including a reply that does not
    /// match the schema, yields the fast-path result.
    pub async fn classify(&self, message: &str, profile_id: &str) -> Classification {
        let fast = self.fast.classify_fast(message);
        if fast.confidence >= self.threshold {
            return fast;
        }

        let prompt = classification_prompt(profile_id);
        match generate_structured::<IntentReply>(self.generator.as_ref(), ModelTier::Fast, &prompt, message).await {
            Ok(reply) => Classification {
                intent: reply.intent,
                confidence: reply.confidence,
                extracted_details: reply.extracted_details,
            },
            Err(e) => {
                tracing::debug!(error = %e, "smart classification failed, using pattern result");
                fast
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::ScriptedGenerator;

    fn classifier(generator: Arc<ScriptedGenerator>) -> SmartClassifier {
        SmartClassifier::new(IntentClassifier::builtin().unwrap(), generator, 0.7)
    }

    #[tokio::test]
    async fn confident_pattern_skips_the_model() {
        let gen = Arc::new(ScriptedGenerator::failing());
        let c = classifier(gen.clone());
        let out = c.classify("sketch a foam trainer", "JAMES_COS").await;
        assert_eq!(out.intent, Intent::ProductVisualization);
        assert_eq!(out.confidence, 0.8);
        assert_eq!(gen.calls(), 0);
    }

    #[tokio::test]
    async fn uncertain_message_uses_the_model() {
        let gen = Arc::new(ScriptedGenerator::replying(json!({
            "intent": "TREND_SEARCH",
            "confidence": 0.92
        })));
        let c = classifier(gen.clone());
        let out = c.classify("can you search trends for NBA", "MIKE_COS").await;
        assert_eq!(out.intent, Intent::TrendSearch);
        assert_eq!(out.confidence, 0.92);
        assert_eq!(gen.calls(), 1);

        let req = gen.last_request().unwrap();
        assert_eq!(req.tier, ModelTier::Fast);
        assert!(req.system_prompt.contains("MIKE_COS"));
        assert!(req.system_prompt.contains("POLICY_DRAFT"));
        assert_eq!(req.user_prompt, "can you search trends for NBA");
    }

    #[tokio::test]
    async fn generator_failure_falls_back_to_pattern_result() {
        let gen = Arc::new(ScriptedGenerator::failing());
        let out = classifier(gen).classify("hey tom", "MIKE_COS").await;
        assert_eq!(out, Classification::new(Intent::GeneralChat, 0.5));
    }

    #[tokio::test]
    async fn schema_mismatch_falls_back() {
        let gen = Arc::new(ScriptedGenerator::replying(json!({ "intent": "DANCE", "confidence": 0.9 })));
        let out = classifier(gen).classify("hey tom", "MIKE_COS").await;
        assert_eq!(out.intent, Intent::GeneralChat);

        let gen = Arc::new(ScriptedGenerator::replying(json!({ "intent": "TASK_CAPTURE", "confidence": 7 })));
        let out = classifier(gen).classify("hey tom", "MIKE_COS").await;
        assert_eq!(out.intent, Intent::GeneralChat);
    }

    #[tokio::test]
    async fn extracted_details_pass_through() {
        let gen = Arc::new(ScriptedGenerator::replying(json!({
            "intent": "TASK_CAPTURE",
            "confidence": 0.75,
            "extractedDetails": { "task": "call the gym" }
        })));
        let out = classifier(gen).classify("gym call tomorrow", "ADAM_COS").await;
        let details = out.extracted_details.unwrap();
        assert_eq!(details["task"], "call the gym");
    }
}
