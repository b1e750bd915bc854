use crate::error::Result;
use crate::pattern::PatternTable;
use crate::types::Mode;

// ---------------------------------------------------------------------------
// Trigger table
// ---------------------------------------------------------------------------

/// Mode triggers in evaluation order: technical, then motivational, then
/// relational.
///
/// Order is the tie-break. A message with both a technical and a
/// motivational trigger ("launch the build") always detects as `Jarvis`,
/// regardless of how many motivational words it carries.
const MODE_TRIGGERS: &[(&str, Mode)] = &[
    // technical
    (r"error|bug|crash|fail|deploy|build|server|database|api|log|metric", Mode::Jarvis),
    (r"convex|github|vercel|fly\.io|inngest|stripe", Mode::Jarvis),
    (r"what('s| is) the status|check the|show me the", Mode::Jarvis),
    // motivational
    (r"launch|scale|grow|goal|target|dominate|crush|win", Mode::Robbins),
    (r"let's go|ready to|time to|we need to", Mode::Robbins),
    (r"100k|million|massive|huge|big", Mode::Robbins),
    // relational
    (r"how are you|feeling|team|feedback|thanks|thank you", Mode::Lasso),
    (r"help me understand|what do you think|advice", Mode::Lasso),
    (r"morning|good (morning|afternoon|evening)", Mode::Lasso),
];

// ---------------------------------------------------------------------------
// ModeDetector
// ---------------------------------------------------------------------------

pub struct ModeDetector {
    table: PatternTable<Mode>,
}

impl ModeDetector {
    pub fn new(table: PatternTable<Mode>) -> Self {
        Self { table }
    }

    pub fn builtin() -> Result<Self> {
        Ok(Self::new(PatternTable::compile(MODE_TRIGGERS)?))
    }

    /// Pick the personality mode for `message`. Falls back to `Lasso`;
    /// never returns `Auto`.
    pub fn detect(&self, message: &str) -> Mode {
        self.table.first_match(message).unwrap_or(Mode::Lasso)
    }

    /// Resolve a caller override: `Auto` or no override means detect.
    pub fn resolve(&self, message: &str, forced: Option<Mode>) -> Mode {
        match forced {
            Some(Mode::Auto) | None => self.detect(message),
            Some(mode) => mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ModeDetector {
        ModeDetector::builtin().unwrap()
    }

    #[test]
    fn technical_messages_are_jarvis() {
        assert_eq!(detector().detect("Server is down!"), Mode::Jarvis);
        assert_eq!(detector().detect("anything on fly.io?"), Mode::Jarvis);
        assert_eq!(detector().detect("what's the status"), Mode::Jarvis);
    }

    #[test]
    fn motivational_messages_are_robbins() {
        assert_eq!(detector().detect("We hit 100k today"), Mode::Robbins);
        assert_eq!(detector().detect("ready to go"), Mode::Robbins);
    }

    #[test]
    fn relational_only_messages_are_lasso() {
        for msg in ["thank you so much", "how are you", "good evening", "what do you think"] {
            assert_eq!(detector().detect(msg), Mode::Lasso, "{msg}");
        }
    }

    #[test]
    fn technical_beats_motivational() {
        assert_eq!(detector().detect("time to deploy"), Mode::Jarvis);
        assert_eq!(detector().detect("massive crash"), Mode::Jarvis);
    }

    #[test]
    fn no_trigger_defaults_to_lasso_never_auto() {
        let mode = detector().detect("hmm");
        assert_eq!(mode, Mode::Lasso);
        assert_ne!(mode, Mode::Auto);
    }

    #[test]
    fn resolve_honours_override_except_auto() {
        let d = detector();
        assert_eq!(d.resolve("server crash", Some(Mode::Robbins)), Mode::Robbins);
        assert_eq!(d.resolve("server crash", Some(Mode::Auto)), Mode::Jarvis);
        assert_eq!(d.resolve("server crash", None), Mode::Jarvis);
    }
}
