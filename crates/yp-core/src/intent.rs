use crate::error::Result;
use crate::pattern::PatternTable;
use crate::types::{Intent, TomUser};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Confidence reported for any pattern hit.
pub const PATTERN_CONFIDENCE: f64 = 0.8;
/// Confidence reported when no pattern matches.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

// ---------------------------------------------------------------------------
// Classification (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub intent: Intent,
    /// In `[0, 1]`.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_details: Option<BTreeMap<String, serde_json::Value>>,
}

impl Classification {
    pub fn new(intent: Intent, confidence: f64) -> Self {
        Self {
            intent,
            confidence,
            extracted_details: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Intent patterns
// ---------------------------------------------------------------------------

/// Evaluated top to bottom; the first hit decides. `GeneralChat` has no
/// patterns and is only ever the fallback.
const INTENT_PATTERNS: &[(&str, Intent)] = &[
    (r"sketch|visualize|draw|design|prototype|concept|picture|image", Intent::ProductVisualization),
    (r"what would .* look like", Intent::ProductVisualization),
    (r"can you show me", Intent::ProductVisualization),
    (r"trending|viral|what's hot|pulse|what should i cover", Intent::TrendSearch),
    (r"what('s| is) happening in (nba|basketball|sports)", Intent::TrendSearch),
    (r"content ideas?|topic ideas?", Intent::TrendSearch),
    (r"paper|study|research|summarize this|pdf|journal", Intent::ResearchDigest),
    (r"what does the science say", Intent::ResearchDigest),
    (r"explain this (paper|study|research)", Intent::ResearchDigest),
    (r"policy|response|customer|draft|rewrite", Intent::PolicyDraft),
    (r"how should (i|we) respond", Intent::PolicyDraft),
    (r"write a (response|reply|email)", Intent::PolicyDraft),
    (r"radar|summary|what's happening|team update", Intent::ExecutiveSummary),
    (r"what('s| is) the status|give me the rundown", Intent::ExecutiveSummary),
    (r"how('s| is) the team doing", Intent::ExecutiveSummary),
    (r"remind me|add to .*(backlog|list|todo)", Intent::TaskCapture),
    (r"i need to|don't forget", Intent::TaskCapture),
    (r"^todo:|^task:", Intent::TaskCapture),
];

// ---------------------------------------------------------------------------
// IntentClassifier
// ---------------------------------------------------------------------------

/// Synchronous pattern-based classifier. Pure: the same message always
/// yields the same classification.
pub struct IntentClassifier {
    table: PatternTable<Intent>,
}

impl IntentClassifier {
    pub fn new(table: PatternTable<Intent>) -> Self {
        Self { table }
    }

    pub fn builtin() -> Result<Self> {
        Ok(Self::new(PatternTable::compile(INTENT_PATTERNS)?))
    }

    pub fn classify_fast(&self, message: &str) -> Classification {
        match self.table.first_match(message) {
            Some(intent) => Classification::new(intent, PATTERN_CONFIDENCE),
            None => Classification::new(Intent::GeneralChat, FALLBACK_CONFIDENCE),
        }
    }
}

// ---------------------------------------------------------------------------
// AccessPolicy
// ---------------------------------------------------------------------------

/// Which intents each user may trigger, and which single user owns each
/// side-effecting tool. The router checks both independently.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    allowed: BTreeMap<TomUser, Vec<Intent>>,
    owners: BTreeMap<Intent, TomUser>,
}

impl AccessPolicy {
    pub fn new(allowed: BTreeMap<TomUser, Vec<Intent>>, owners: BTreeMap<Intent, TomUser>) -> Self {
        Self { allowed, owners }
    }

    pub fn builtin() -> Self {
        use Intent::*;
        let allowed = BTreeMap::from([
            (TomUser::Mike, vec![ExecutiveSummary, TaskCapture, GeneralChat]),
            (
                TomUser::James,
                vec![ProductVisualization, ResearchDigest, TaskCapture, GeneralChat],
            ),
            (TomUser::Adam, vec![TrendSearch, TaskCapture, GeneralChat]),
            (TomUser::Annie, vec![PolicyDraft, TaskCapture, GeneralChat]),
        ]);
        let owners = BTreeMap::from([
            (ProductVisualization, TomUser::James),
            (TrendSearch, TomUser::Adam),
            (PolicyDraft, TomUser::Annie),
            (ExecutiveSummary, TomUser::Mike),
        ]);
        Self::new(allowed, owners)
    }

    pub fn allowed_intents(&self, user: TomUser) -> &[Intent] {
        self.allowed.get(&user).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn is_allowed(&self, user: TomUser, intent: Intent) -> bool {
        self.allowed_intents(user).contains(&intent)
    }

    /// The single user a tool executes for, if the intent has a tool.
    pub fn owner_of(&self, intent: Intent) -> Option<TomUser> {
        self.owners.get(&intent).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::builtin().unwrap()
    }

    #[test]
    fn pattern_hit_has_fixed_confidence() {
        let c = classifier().classify_fast("Can you sketch a new ball?");
        assert_eq!(c.intent, Intent::ProductVisualization);
        assert_eq!(c.confidence, PATTERN_CONFIDENCE);
    }

    #[test]
    fn declaration_order_breaks_ties() {
        // "design" (visualization) is declared before "customer" (policy).
        let c = classifier().classify_fast("design a customer email");
        assert_eq!(c.intent, Intent::ProductVisualization);
    }

    #[test]
    fn each_intent_is_reachable() {
        let c = classifier();
        assert_eq!(c.classify_fast("what's trending right now").intent, Intent::TrendSearch);
        assert_eq!(c.classify_fast("summarize this pdf").intent, Intent::ResearchDigest);
        assert_eq!(c.classify_fast("how should we respond").intent, Intent::PolicyDraft);
        assert_eq!(c.classify_fast("give me the rundown").intent, Intent::ExecutiveSummary);
        assert_eq!(c.classify_fast("todo: call the printer").intent, Intent::TaskCapture);
    }

    #[test]
    fn no_match_falls_back_to_general_chat() {
        let c = classifier().classify_fast("can you search trends for NBA");
        assert_eq!(c, Classification::new(Intent::GeneralChat, FALLBACK_CONFIDENCE));
    }

    #[test]
    fn classify_fast_is_deterministic() {
        let c = classifier();
        for msg in ["remind me to stretch", "yo", "what would a foam ball look like"] {
            assert_eq!(c.classify_fast(msg), c.classify_fast(msg));
        }
    }

    #[test]
    fn policy_allow_lists_and_owners() {
        let p = AccessPolicy::builtin();
        assert!(!p.is_allowed(TomUser::Mike, Intent::TrendSearch));
        assert!(p.is_allowed(TomUser::Adam, Intent::TrendSearch));
        assert_eq!(p.owner_of(Intent::PolicyDraft), Some(TomUser::Annie));
        assert_eq!(p.owner_of(Intent::GeneralChat), None);
    }

    #[test]
    fn classification_serializes_camel_case() {
        let mut c = Classification::new(Intent::TaskCapture, 0.9);
        c.extracted_details = Some(BTreeMap::from([("task".to_string(), serde_json::json!("x"))]));
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["intent"], "TASK_CAPTURE");
        assert!(json.get("extractedDetails").is_some());
    }
}
