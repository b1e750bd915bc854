use super::VoiceProfile;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// More than this many `!` in one piece of content is a violation.
pub const MAX_EXCLAMATIONS: usize = 3;

const WEAK_PATTERNS: &[&str] = &[
    r"\bmaybe\b",
    r"\bperhaps\b",
    r"\bmight\b",
    r"\bcould\b",
    r"\bi think\b",
    r"\bi believe\b",
    r"\bfeel free\b",
    r"\bno worries\b",
];

/// The subset of weak phrasing `enforce_voice` strips outright.
const STRIPPABLE_PATTERNS: &[&str] = &[
    r"\bmaybe\s+",
    r"\bperhaps\s+",
    r"\bI think\s+",
    r"\bfeel free to\s+",
];

static WEAK_RE: OnceLock<Vec<Regex>> = OnceLock::new();
static STRIP_RE: OnceLock<Vec<Regex>> = OnceLock::new();

fn compile_all(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|s| Regex::new(&format!("(?i){s}")).unwrap())
        .collect()
}

fn weak_re() -> &'static [Regex] {
    WEAK_RE.get_or_init(|| compile_all(WEAK_PATTERNS))
}

fn strip_re() -> &'static [Regex] {
    STRIP_RE.get_or_init(|| compile_all(STRIPPABLE_PATTERNS))
}

fn term_re(term: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))).ok()
}

// ---------------------------------------------------------------------------
// VoiceReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceReport {
    pub is_valid: bool,
    pub violations: Vec<String>,
}

// ---------------------------------------------------------------------------
// validate / enforce
// ---------------------------------------------------------------------------

/// Check `content` against a voice. Every rule runs; violations accumulate
/// in rule order: banned words, disallowed terms, weak language, then
/// exclamation count.
pub fn validate_voice(content: &str, voice: &VoiceProfile) -> VoiceReport {
    let mut violations = Vec::new();
    let lower = content.to_lowercase();

    for word in &voice.banned_words {
        if lower.contains(&word.to_lowercase()) {
            violations.push(format!("Banned word detected: \"{word}\""));
        }
    }

    for (wrong, right) in &voice.preferred_terms {
        if term_re(wrong).is_some_and(|re| re.is_match(content)) {
            violations.push(format!("Use \"{right}\" instead of \"{wrong}\""));
        }
    }

    for (re, src) in weak_re().iter().zip(WEAK_PATTERNS) {
        if re.is_match(content) {
            violations.push(format!("Weak language detected: {src}"));
        }
    }

    let exclamations = content.matches('!').count();
    if exclamations > MAX_EXCLAMATIONS {
        violations.push(format!(
            "Too many exclamation marks ({exclamations}). Keep it under {MAX_EXCLAMATIONS}."
        ));
    }

    VoiceReport {
        is_valid: violations.is_empty(),
        violations,
    }
}

/// Best-effort auto-fix. Swaps disallowed terms for their preferred forms
/// and strips "maybe", "perhaps", "I think" and "feel free to".
///
/// This is deliberately partial: banned words, exclamation marks and the
/// remaining weak phrases are left alone, so `validate_voice` may still
/// report violations on the output.
pub fn enforce_voice(content: &str, voice: &VoiceProfile) -> String {
    let mut fixed = content.to_string();

    for (wrong, right) in &voice.preferred_terms {
        if let Some(re) = term_re(wrong) {
            fixed = re.replace_all(&fixed, NoExpand(right)).into_owned();
        }
    }

    for re in strip_re() {
        fixed = re.replace_all(&fixed, "").into_owned();
    }

    fixed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::VoiceRegistry;

    fn voice(id: &str) -> VoiceProfile {
        VoiceRegistry::builtin().get(id).unwrap().clone()
    }

    #[test]
    fn banned_word_and_exclamations() {
        let report = validate_voice("This is totally amazing!!!!", &voice("JAMES"));
        assert!(!report.is_valid);
        assert!(report.violations.iter().any(|v| v.contains("\"amazing\"")));
        assert!(report
            .violations
            .iter()
            .any(|v| v.starts_with("Too many exclamation marks (4)")));
    }

    #[test]
    fn clean_content_is_valid() {
        let report = validate_voice("Stand tall. Load the arch. Three sets of ten.", &voice("JAMES"));
        assert!(report.is_valid, "{:?}", report.violations);
    }

    #[test]
    fn violations_accumulate_in_rule_order() {
        let report = validate_voice("Maybe try this exercise, I think!", &voice("JAMES"));
        let v = &report.violations;
        assert_eq!(v[0], "Use \"drill\" instead of \"exercise\"");
        assert!(v[1].contains("maybe"));
        assert!(v[2].contains("i think"));
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn preferred_terms_respect_word_boundaries() {
        // "exercises" is not the word "exercise".
        let report = validate_voice("Three exercises today.", &voice("JAMES"));
        assert!(report.is_valid, "{:?}", report.violations);
    }

    #[test]
    fn exactly_three_exclamations_is_fine() {
        let report = validate_voice("Go! Go! Go!", &voice("ADAM"));
        assert!(report.is_valid);
    }

    #[test]
    fn enforce_replaces_terms_case_insensitively() {
        let fixed = enforce_voice("Exercise daily. This exercise works.", &voice("JAMES"));
        assert_eq!(fixed, "drill daily. This drill works.");
    }

    #[test]
    fn enforce_strips_weak_phrases() {
        let fixed = enforce_voice("I think maybe feel free to start slow.", &voice("ADAM"));
        assert_eq!(fixed, "start slow.");
    }

    #[test]
    fn enforce_is_partial() {
        let v = voice("JAMES");
        let fixed = enforce_voice("Amazing!!!! You might like it.", &v);
        let report = validate_voice(&fixed, &v);
        assert!(!report.is_valid);
        assert!(fixed.contains("!!!!"));
    }
}
