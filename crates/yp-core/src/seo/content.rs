//! Per-keyword heuristics: content type, slug, title, visuals, product CTA
//! and expert attribution.

use crate::types::ContentType;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const MAX_SLUG_LEN: usize = 60;

pub const ADAM: &str = "adam-harrington";
pub const JAMES: &str = "james-scott";

/// Clusters that belong to the movement-science expert.
const JAMES_TERRITORY: &[&str] = &["barefoot", "injury-prevention", "footwork", "speed-agility"];

/// Keyword fragments that put a NeoBall call to action on the page.
pub const NEOBALL_TRIGGERS: &[&str] = &[
    "silent",
    "quiet",
    "apartment",
    "indoor",
    "no bounce",
    "hotel",
    "upstairs",
    "home",
];

const QUESTION_PREFIXES: &[&str] = &["how", "what", "why", "can", "is"];

/// Question phrasing wins over "drill"; singular "drill" (without "drills")
/// makes a drill card; everything else is a spoke. Prefixes are raw string
/// prefixes, so "island drills" counts as a question.
pub fn determine_content_type(keyword: &str) -> ContentType {
    let kw = keyword.to_lowercase();
    if QUESTION_PREFIXES.iter().any(|p| kw.starts_with(p)) || kw.contains('?') {
        return ContentType::Qa;
    }
    if kw.contains("drill") && !kw.contains("drills") {
        return ContentType::Drill;
    }
    ContentType::Spoke
}

static SLUG_STRIP: OnceLock<Regex> = OnceLock::new();
static SLUG_SPACE: OnceLock<Regex> = OnceLock::new();
static SLUG_DASHES: OnceLock<Regex> = OnceLock::new();

pub fn generate_slug(keyword: &str) -> String {
    let strip = SLUG_STRIP.get_or_init(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
    let space = SLUG_SPACE.get_or_init(|| Regex::new(r"\s+").unwrap());
    let dashes = SLUG_DASHES.get_or_init(|| Regex::new(r"-+").unwrap());

    let lower = keyword.to_lowercase();
    let s = strip.replace_all(&lower, "");
    let s = space.replace_all(&s, "-");
    let s = dashes.replace_all(&s, "-");
    s.chars().take(MAX_SLUG_LEN).collect()
}

/// Capitalize each space-separated word; apartment and home keywords get a
/// "(No Gym Needed)" suffix.
pub fn suggested_title(keyword: &str) -> String {
    let base = keyword
        .split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ");
    let lower = keyword.to_lowercase();
    if lower.contains("apartment") || lower.contains("home") {
        format!("{base} (No Gym Needed)")
    } else {
        base
    }
}

pub fn has_neoball_cta(keyword: &str) -> bool {
    let lower = keyword.to_lowercase();
    NEOBALL_TRIGGERS.iter().any(|t| lower.contains(t))
}

/// Visual asset the page needs. First matching rule wins.
pub fn visual_requirement(keyword: &str, cluster: &str, content_type: ContentType) -> &'static str {
    let kw = keyword.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| kw.contains(n));

    if has(&["best", "review"]) {
        "ComparisonChart"
    } else if has(&["drill", "exercise"]) {
        "DrillDiagram"
    } else if has(&["program", "training"]) {
        "ProgressionTimeline"
    } else if has(&["apartment", "small space", "hotel"]) {
        "SpaceLayoutDiagram"
    } else if has(&["year old", "kids", "youth"]) {
        "AgeProgressionChart"
    } else if cluster == "silent-basketball" {
        "NoiseComparisonChart"
    } else if content_type == ContentType::Pillar {
        "HeroInfographic"
    } else {
        "CoachingDiagram"
    }
}

// ---------------------------------------------------------------------------
// Expert attribution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertAttribution {
    pub primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adam_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub james_role: Option<String>,
}

fn is_james_territory(cluster: &str) -> bool {
    JAMES_TERRITORY.contains(&cluster)
}

/// NeoBall and silent-basketball pages carry both experts; otherwise the
/// cluster decides.
pub fn expert_attribution(cluster: &str, has_neoball_cta: bool) -> ExpertAttribution {
    if has_neoball_cta || cluster == "silent-basketball" {
        return ExpertAttribution {
            primary: ADAM.to_string(),
            secondary: Some(JAMES.to_string()),
            adam_role: Some("Founder, YP Basketball Foundations".to_string()),
            james_role: Some("Co-founder & Inventor, NeoBall".to_string()),
        };
    }
    if is_james_territory(cluster) {
        return ExpertAttribution {
            primary: JAMES.to_string(),
            secondary: None,
            adam_role: None,
            james_role: Some("Movement Scientist & Barefoot Training Expert".to_string()),
        };
    }
    ExpertAttribution {
        primary: ADAM.to_string(),
        secondary: None,
        adam_role: Some("NBA Skills Coach & Founder, YP Basketball Foundations".to_string()),
        james_role: None,
    }
}

/// Single-expert field kept for consumers that predate dual attribution.
pub fn cluster_expert(cluster: &str) -> &'static str {
    if is_james_territory(cluster) {
        JAMES
    } else {
        ADAM
    }
}
