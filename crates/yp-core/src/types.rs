use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Tom's personality blend for a single reply.
///
/// `Auto` is a caller-supplied override sentinel meaning "detect from the
/// message"; the mode detector itself never returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Jarvis,
    Robbins,
    Lasso,
    Auto,
}

impl Mode {
    pub fn all() -> &'static [Mode] {
        &[Mode::Jarvis, Mode::Robbins, Mode::Lasso, Mode::Auto]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Jarvis => "jarvis",
            Mode::Robbins => "robbins",
            Mode::Lasso => "lasso",
            Mode::Auto => "auto",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = crate::error::YpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jarvis" => Ok(Mode::Jarvis),
            "robbins" => Ok(Mode::Robbins),
            "lasso" => Ok(Mode::Lasso),
            "auto" => Ok(Mode::Auto),
            other => Err(crate::error::YpError::UnknownMode(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    GeneralChat,
    TaskCapture,
    ProductVisualization,
    TrendSearch,
    ResearchDigest,
    PolicyDraft,
    ExecutiveSummary,
}

impl Intent {
    pub fn all() -> &'static [Intent] {
        &[
            Intent::GeneralChat,
            Intent::TaskCapture,
            Intent::ProductVisualization,
            Intent::TrendSearch,
            Intent::ResearchDigest,
            Intent::PolicyDraft,
            Intent::ExecutiveSummary,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::GeneralChat => "GENERAL_CHAT",
            Intent::TaskCapture => "TASK_CAPTURE",
            Intent::ProductVisualization => "PRODUCT_VISUALIZATION",
            Intent::TrendSearch => "TREND_SEARCH",
            Intent::ResearchDigest => "RESEARCH_DIGEST",
            Intent::PolicyDraft => "POLICY_DRAFT",
            Intent::ExecutiveSummary => "EXECUTIVE_SUMMARY",
        }
    }

    /// One-line description used in the LLM classification prompt.
    pub fn description(self) -> &'static str {
        match self {
            Intent::GeneralChat => "General conversation, questions, etc.",
            Intent::TaskCapture => "User wants to add something to their todo/backlog",
            Intent::ProductVisualization => "User wants to see a product concept/sketch",
            Intent::TrendSearch => "User wants to know what's trending",
            Intent::ResearchDigest => "User wants a paper/study summarized",
            Intent::PolicyDraft => "User wants help drafting a customer response",
            Intent::ExecutiveSummary => "User wants a team/company status update",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = crate::error::YpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::all()
            .iter()
            .copied()
            .find(|i| i.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::error::YpError::UnknownIntent(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// TomUser
// ---------------------------------------------------------------------------

/// Team members Tom works for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TomUser {
    Mike,
    James,
    Adam,
    Annie,
}

impl TomUser {
    pub fn all() -> &'static [TomUser] {
        &[TomUser::Mike, TomUser::James, TomUser::Adam, TomUser::Annie]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TomUser::Mike => "mike",
            TomUser::James => "james",
            TomUser::Adam => "adam",
            TomUser::Annie => "annie",
        }
    }

    /// Chief-of-staff voice profile id, e.g. `ADAM_COS`.
    pub fn cos_profile_id(self) -> String {
        format!("{}_COS", self.as_str().to_uppercase())
    }

    /// Environment variable holding this user's WhatsApp number.
    pub fn phone_env_var(self) -> String {
        format!("TOM_PHONE_{}", self.as_str().to_uppercase())
    }
}

impl fmt::Display for TomUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TomUser {
    type Err = crate::error::YpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mike" => Ok(TomUser::Mike),
            "james" => Ok(TomUser::James),
            "adam" => Ok(TomUser::Adam),
            "annie" => Ok(TomUser::Annie),
            _ => Err(crate::error::YpError::UnknownUser(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Pillar,
    Spoke,
    Qa,
    Drill,
}

impl ContentType {
    pub fn all() -> &'static [ContentType] {
        &[
            ContentType::Pillar,
            ContentType::Spoke,
            ContentType::Qa,
            ContentType::Drill,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Pillar => "pillar",
            ContentType::Spoke => "spoke",
            ContentType::Qa => "qa",
            ContentType::Drill => "drill",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentType {
    type Err = crate::error::YpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pillar" => Ok(ContentType::Pillar),
            "spoke" => Ok(ContentType::Spoke),
            "qa" => Ok(ContentType::Qa),
            "drill" => Ok(ContentType::Drill),
            other => Err(crate::error::YpError::UnknownContentType(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_parses_case_insensitively() {
        assert_eq!("trend_search".parse::<Intent>().unwrap(), Intent::TrendSearch);
        assert_eq!("POLICY_DRAFT".parse::<Intent>().unwrap(), Intent::PolicyDraft);
        assert!("DANCE".parse::<Intent>().is_err());
    }

    #[test]
    fn intent_serializes_screaming_snake() {
        let json = serde_json::to_string(&Intent::ProductVisualization).unwrap();
        assert_eq!(json, "\"PRODUCT_VISUALIZATION\"");
    }

    #[test]
    fn user_cos_profile_id() {
        assert_eq!(TomUser::Adam.cos_profile_id(), "ADAM_COS");
        assert_eq!(TomUser::Annie.phone_env_var(), "TOM_PHONE_ANNIE");
    }

    #[test]
    fn mode_from_str_rejects_unknown() {
        assert_eq!("lasso".parse::<Mode>().unwrap(), Mode::Lasso);
        assert!("yoda".parse::<Mode>().is_err());
    }
}
