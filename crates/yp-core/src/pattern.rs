use crate::error::Result;
use regex::Regex;

// ---------------------------------------------------------------------------
// PatternRule
// ---------------------------------------------------------------------------

/// A single `(pattern, label)` pair. Patterns are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct PatternRule<L> {
    pub pattern: Regex,
    pub label: L,
}

// ---------------------------------------------------------------------------
// PatternTable
// ---------------------------------------------------------------------------

/// Ordered decision list: the first rule whose pattern matches wins.
///
/// Rule order is the only tie-break. A message that matches rules for
/// several labels always resolves to the label of the earliest rule, no
/// matter how many later rules also match.
#[derive(Debug, Clone)]
pub struct PatternTable<L> {
    rules: Vec<PatternRule<L>>,
}

impl<L: Copy> PatternTable<L> {
    /// Compile `(source, label)` pairs in order.
    pub fn compile(entries: &[(&str, L)]) -> Result<Self> {
        let rules = entries
            .iter()
            .map(|(src, label)| {
                Ok(PatternRule {
                    pattern: Regex::new(&format!("(?i){src}"))?,
                    label: *label,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Label of the first matching rule, if any.
    pub fn first_match(&self, text: &str) -> Option<L> {
        self.rules
            .iter()
            .find_map(|r| r.pattern.is_match(text).then_some(r.label))
    }

    /// Source of the first matching rule, for diagnostics.
    pub fn first_match_source(&self, text: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.pattern.is_match(text))
            .map(|r| r.pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earliest_rule_wins() {
        let table = PatternTable::compile(&[("alpha", 1), ("beta", 2), ("alpha|beta", 3)]).unwrap();
        assert_eq!(table.first_match("beta then alpha"), Some(1));
        assert_eq!(table.first_match("only BETA"), Some(2));
        assert_eq!(table.first_match("gamma"), None);
    }

    #[test]
    fn bad_pattern_is_an_error() {
        assert!(PatternTable::compile(&[("(unclosed", 1)]).is_err());
    }
}
