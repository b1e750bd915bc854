pub mod lint;
mod profiles;

use crate::error::{Result, YpError};
use crate::types::{ContentType, TomUser};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub use lint::{enforce_voice, validate_voice, VoiceReport};

// ---------------------------------------------------------------------------
// VoiceProfile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceKind {
    /// Athlete-facing content author.
    ContentExpert,
    /// Internal Tom persona for one team member.
    ChiefOfStaff,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToAction {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub id: String,
    pub kind: VoiceKind,
    pub name: String,
    pub title: String,
    /// Content domains this voice owns.
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub credentials: Vec<String>,
    pub system_prompt_prefix: String,
    #[serde(default)]
    pub signature_hooks: Vec<String>,
    #[serde(default)]
    pub speech_patterns: Vec<String>,
    #[serde(default)]
    pub banned_words: Vec<String>,
    /// Disallowed term → preferred term.
    #[serde(default)]
    pub preferred_terms: BTreeMap<String, String>,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub must_include: Vec<String>,
    #[serde(default)]
    pub must_avoid: Vec<String>,
    #[serde(default)]
    pub signature_block: String,
    #[serde(default)]
    pub coach_voice_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_cta: Option<CallToAction>,
}

// ---------------------------------------------------------------------------
// VoiceRegistry
// ---------------------------------------------------------------------------

/// Read-only id → profile map, built once at startup.
#[derive(Debug, Clone)]
pub struct VoiceRegistry {
    profiles: HashMap<String, VoiceProfile>,
    domain_owners: BTreeMap<String, String>,
}

/// Fallback content voice when nothing more specific applies.
pub const BRAND_VOICE_ID: &str = "YP";

impl VoiceRegistry {
    pub fn new(profiles: Vec<VoiceProfile>, domain_owners: BTreeMap<String, String>) -> Self {
        Self {
            profiles: profiles.into_iter().map(|p| (p.id.clone(), p)).collect(),
            domain_owners,
        }
    }

    pub fn builtin() -> Self {
        Self::new(profiles::builtin_profiles(), profiles::domain_ownership())
    }

    pub fn get(&self, id: &str) -> Result<&VoiceProfile> {
        self.profiles
            .get(id)
            .ok_or_else(|| YpError::VoiceNotFound(id.to_string()))
    }

    pub fn cos_for(&self, user: TomUser) -> Result<&VoiceProfile> {
        self.get(&user.cos_profile_id())
    }

    /// Profiles sorted by id.
    pub fn list(&self) -> Vec<&VoiceProfile> {
        let mut all: Vec<_> = self.profiles.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub fn expert_for_domain(&self, domain: &str) -> &str {
        self.domain_owners
            .get(domain)
            .map(String::as_str)
            .unwrap_or(BRAND_VOICE_ID)
    }

    pub fn voice_for_domain(&self, domain: &str) -> Result<&VoiceProfile> {
        self.get(self.expert_for_domain(domain))
    }
}

pub fn is_cos_id(id: &str) -> bool {
    id.ends_with("_COS")
}

const JAMES_TOPIC_KEYWORDS: &[&str] = &[
    "barefoot", "foot", "feet", "ankle", "mobility", "movement", "agility", "speed",
    "strength", "injury", "sever", "osgood", "plantar", "arch", "heel", "balance",
    "proprioception",
];

const ADAM_TOPIC_KEYWORDS: &[&str] = &[
    "basketball", "shooting", "dribbl", "ball handling", "handles", "crossover", "layup",
    "free throw", "three point", "jump shot", "form", "release", "chicken wing",
    "follow through", "hoop", "court",
];

/// Pick a content expert from topic keywords. Ties go to the brand voice.
pub fn infer_expert_from_topic(topic: &str) -> &'static str {
    let lower = topic.to_lowercase();
    let count = |kws: &[&str]| kws.iter().filter(|kw| lower.contains(*kw)).count();
    let james = count(JAMES_TOPIC_KEYWORDS);
    let adam = count(ADAM_TOPIC_KEYWORDS);
    match james.cmp(&adam) {
        std::cmp::Ordering::Greater => "JAMES",
        std::cmp::Ordering::Less => "ADAM",
        std::cmp::Ordering::Equal => BRAND_VOICE_ID,
    }
}

// ---------------------------------------------------------------------------
// Content prompt
// ---------------------------------------------------------------------------

fn content_type_instructions(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Pillar => {
            "You are writing a comprehensive PILLAR PAGE (2,500-4,000 words).
This is an authoritative guide that will be cited by AI search engines.
Structure: Hero definition (40-60 words) → Table of Contents → 7-8 chapters → FAQ → CTA"
        }
        ContentType::Spoke => {
            "You are writing a TOPIC PAGE (1,200-2,000 words).
This is a focused sub-topic that links to a parent pillar.
Structure: Definition block → Why it matters → Core content → Common mistakes → Age modifications → Related content"
        }
        ContentType::Qa => {
            "You are writing a PARENT SIDELINES Q&A page (800-1,200 words).
This is an AEO traffic magnet targeting a specific parent question.
Structure: Question as H1 → Direct answer (40-60 words) → Key takeaways → Full explanation → Expert insight → Recommended drill → CTA"
        }
        ContentType::Drill => {
            "You are writing a DRILL CARD (400-600 words equivalent).
This is a structured, atomic content unit for a single exercise.
Structure: Title → Description → Steps (3-6) → Coaching cues (4) → Common mistake + fix → Duration/reps"
        }
    }
}

/// System prompt for generating `content_type` content in `voice`.
pub fn build_content_system_prompt(voice: &VoiceProfile, content_type: ContentType) -> String {
    let bullets = |items: &[String], quoted: bool| {
        items
            .iter()
            .map(|s| if quoted { format!("- \"{s}\"") } else { format!("- {s}") })
            .collect::<Vec<_>>()
            .join("\n")
    };
    let replacements = voice
        .preferred_terms
        .iter()
        .map(|(wrong, right)| format!("- \"{wrong}\" → \"{right}\""))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{prefix}\n\n---\n\nCONTENT TYPE: {ctype}\n{instructions}\n\n---\n\nVOICE ENFORCEMENT:\n\n\
         Signature hooks to use (pick 1-2 where natural):\n{hooks}\n\n\
         Speech patterns:\n{patterns}\n\n\
         Words to AVOID: {banned}\n\n\
         Word replacements (use the RIGHT term):\n{replacements}\n\n\
         MUST INCLUDE:\n{include}\n\n\
         MUST AVOID:\n{avoid}\n\n---\n\n\
         Coach voice format: \"{coach} [insight]\"\n\n\
         Sign off as: {sign}",
        prefix = voice.system_prompt_prefix,
        ctype = content_type.as_str().to_uppercase(),
        instructions = content_type_instructions(content_type),
        hooks = bullets(&voice.signature_hooks, true),
        patterns = bullets(&voice.speech_patterns, true),
        banned = voice.banned_words.join(", "),
        include = bullets(&voice.must_include, false),
        avoid = bullets(&voice.must_avoid, false),
        coach = voice.coach_voice_prefix,
        sign = voice.signature_block,
    )
}
