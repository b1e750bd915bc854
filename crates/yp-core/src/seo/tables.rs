//! Static knowledge-graph tables: pillars, consolidation rules, link
//! requirements and scoring multipliers.

use crate::error::{Result, YpError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

// ---------------------------------------------------------------------------
// Table records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarDefinition {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub cluster: String,
    pub expert: String,
    pub description: String,
    pub target_word_count: u32,
    #[serde(default)]
    pub product_tie_in: Option<String>,
    pub visual_required: String,
}

/// Several gap keywords collapsing onto one canonical page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationRule {
    pub primary_keyword: String,
    pub primary_slug: String,
    pub absorbs: Vec<String>,
    pub search_intent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRequirement {
    pub must_link_to: Vec<String>,
    #[serde(default)]
    pub can_link_to: Vec<String>,
}

/// Where a cluster's spokes hang in the hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarRoute {
    pub pillar_id: String,
    pub pillar_slug: String,
}

// ---------------------------------------------------------------------------
// SeoTables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SeoTables {
    pub pillars: Vec<PillarDefinition>,
    pub rules: Vec<ConsolidationRule>,
    /// Keyed by spoke slug (the rule's primary slug or generated slug).
    pub link_requirements: HashMap<String, LinkRequirement>,
    /// Fallback required links per cluster.
    pub default_links: HashMap<String, Vec<String>>,
    pub pillar_routes: HashMap<String, PillarRoute>,
    pub fallback_route: PillarRoute,
    pub intent_multipliers: BTreeMap<String, f64>,
    pub cluster_multipliers: BTreeMap<String, f64>,
}

/// Lower-cased lookups derived from the consolidation rules.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    pub absorbed: HashSet<String>,
    pub primaries: HashMap<String, usize>,
}

impl SeoTables {
    /// Validate and return the built-in tables.
    pub fn builtin() -> Result<Self> {
        let tables = Self {
            pillars: builtin_pillars(),
            rules: builtin_rules(),
            link_requirements: builtin_link_requirements(),
            default_links: builtin_default_links(),
            pillar_routes: builtin_pillar_routes(),
            fallback_route: route("home-training-guide", "/basketball/home-training"),
            intent_multipliers: owned_map(&[
                ("informational", 1.0),
                ("commercial", 1.3),
                ("transactional", 0.8),
                ("navigational", 0.5),
            ]),
            cluster_multipliers: owned_map(&[
                ("silent-basketball", 2.5),
                ("home-training", 1.5),
                ("shooting", 1.3),
                ("barefoot", 1.4),
                ("injury-prevention", 1.2),
                ("ball-handling", 1.2),
                ("footwork", 1.1),
                ("speed-agility", 1.1),
                ("youth-development", 1.0),
                ("general", 0.8),
            ]),
        };
        tables.rule_index()?;
        Ok(tables)
    }

    /// Build the absorbed / primary lookups, enforcing that the rules are
    /// consistent: no keyword is both a primary and absorbed, no primary is
    /// declared twice, and no keyword is absorbed by two rules.
    pub fn rule_index(&self) -> Result<RuleIndex> {
        let mut index = RuleIndex::default();
        let mut absorbed_by: HashMap<String, &str> = HashMap::new();

        for (i, rule) in self.rules.iter().enumerate() {
            let primary = rule.primary_keyword.to_lowercase();
            if index.primaries.insert(primary.clone(), i).is_some() {
                return Err(YpError::InvalidRules(format!(
                    "primary keyword '{}' is declared more than once",
                    rule.primary_keyword
                )));
            }
            for kw in &rule.absorbs {
                let kw = kw.to_lowercase();
                if let Some(prev) = absorbed_by.insert(kw.clone(), &rule.primary_keyword) {
                    return Err(YpError::InvalidRules(format!(
                        "'{kw}' is absorbed by both '{prev}' and '{}'",
                        rule.primary_keyword
                    )));
                }
                index.absorbed.insert(kw);
            }
        }

        let mut overlap: Vec<&String> = index
            .absorbed
            .iter()
            .filter(|kw| index.primaries.contains_key(*kw))
            .collect();
        if !overlap.is_empty() {
            overlap.sort();
            let list: Vec<&str> = overlap.iter().map(|s| s.as_str()).collect();
            return Err(YpError::InvalidRules(format!(
                "keywords are both primary and absorbed: {}",
                list.join(", ")
            )));
        }

        Ok(index)
    }

    pub fn route_for(&self, cluster: &str) -> &PillarRoute {
        self.pillar_routes.get(cluster).unwrap_or(&self.fallback_route)
    }

    /// Required and optional internal links for a spoke.
    pub fn links_for(&self, slug: &str, cluster: &str, parent_pillar: &str) -> (Vec<String>, Vec<String>) {
        if let Some(req) = self.link_requirements.get(slug) {
            return (req.must_link_to.clone(), req.can_link_to.clone());
        }
        let must = self
            .default_links
            .get(cluster)
            .cloned()
            .unwrap_or_else(|| vec![parent_pillar.to_string()]);
        (must, Vec::new())
    }
}

// ---------------------------------------------------------------------------
// Built-in data
// ---------------------------------------------------------------------------

fn owned_map(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn route(id: &str, slug: &str) -> PillarRoute {
    PillarRoute {
        pillar_id: id.to_string(),
        pillar_slug: slug.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn pillar(
    id: &str,
    title: &str,
    slug: &str,
    cluster: &str,
    expert: &str,
    description: &str,
    target_word_count: u32,
    product_tie_in: Option<&str>,
    visual_required: &str,
) -> PillarDefinition {
    PillarDefinition {
        id: id.to_string(),
        title: title.to_string(),
        slug: slug.to_string(),
        cluster: cluster.to_string(),
        expert: expert.to_string(),
        description: description.to_string(),
        target_word_count,
        product_tie_in: product_tie_in.map(str::to_string),
        visual_required: visual_required.to_string(),
    }
}

fn builtin_pillars() -> Vec<PillarDefinition> {
    vec![
        pillar(
            "silent-training-guide",
            "The Complete Guide to Silent Basketball Training",
            "/basketball/silent-training",
            "silent-basketball",
            "adam-harrington",
            "Master guide covering pocket control, apartment drills, and noise-free training methods.",
            3500,
            Some("neoball"),
            "HeroInfographic",
        ),
        pillar(
            "home-training-guide",
            "Basketball Training at Home: No Gym Required",
            "/basketball/home-training",
            "home-training",
            "adam-harrington",
            "Complete home training system for developing basketball skills without a court.",
            3000,
            None,
            "SpaceRequirementsChart",
        ),
        pillar(
            "ball-handling-guide",
            "Youth Ball Handling Development Guide",
            "/basketball/ball-handling",
            "ball-handling",
            "adam-harrington",
            "Progressive ball handling curriculum from beginner to advanced.",
            2800,
            None,
            "ProgressionLadder",
        ),
        pillar(
            "shooting-form-guide",
            "Youth Shooting Form: The Complete Blueprint",
            "/basketball/shooting",
            "shooting",
            "adam-harrington",
            "Comprehensive shooting form development for youth athletes.",
            3000,
            None,
            "FormBreakdown",
        ),
        pillar(
            "barefoot-training-guide",
            "Barefoot Training for Young Athletes",
            "/barefoot-training",
            "barefoot",
            "james-scott",
            "Science-based approach to foot strength and athletic development.",
            2500,
            None,
            "FootAnatomyDiagram",
        ),
        pillar(
            "footwork-guide",
            "Basketball Footwork Fundamentals",
            "/basketball/footwork",
            "footwork",
            "james-scott",
            "Movement patterns and footwork drills for basketball.",
            2500,
            None,
            "FootworkPatterns",
        ),
    ]
}

fn rule(primary: &str, slug: &str, absorbs: &[&str], intent: &str) -> ConsolidationRule {
    ConsolidationRule {
        primary_keyword: primary.to_string(),
        primary_slug: slug.to_string(),
        absorbs: owned(absorbs),
        search_intent: intent.to_string(),
    }
}

fn builtin_rules() -> Vec<ConsolidationRule> {
    vec![
        // silent basketball
        rule(
            "silent basketball",
            "silent-basketball",
            &["silent practice basketball", "silent dribbling ball", "silent basketball exercises", "basketball training no bounce"],
            "concept-understanding",
        ),
        rule(
            "quiet basketball",
            "quiet-basketball",
            &["quiet basketball ball", "quiet practice basketball", "quiet ball handling", "basketball training quiet"],
            "concept-understanding",
        ),
        rule(
            "quiet basketball drills apartment",
            "quiet-basketball-drills-apartment",
            &[
                "apartment basketball drills",
                "basketball drills for apartments",
                "basketball practice apartment",
                "apartment safe basketball drills",
                "quiet basketball drills, apartment friendly",
            ],
            "drill-seeking",
        ),
        rule(
            "silent basketball for apartments",
            "silent-basketball-apartments",
            &["apartment basketball ball", "basketball for apartment", "apartment friendly basketball"],
            "product-seeking",
        ),
        rule(
            "apartment basketball training",
            "apartment-basketball-training",
            &["basketball training apartment living", "apartment basketball training kids"],
            "program-seeking",
        ),
        rule(
            "best quiet basketball",
            "best-quiet-basketball",
            &["indoor basketball ball quiet", "basketball that doesnt bounce loud", "low bounce basketball"],
            "commercial-comparison",
        ),
        rule(
            "silent basketball drills",
            "silent-basketball-drills",
            &["silent dribbling drills", "no bounce basketball drills", "no noise basketball drills", "silent ball handling drills"],
            "drill-seeking",
        ),
        rule(
            "silent basketball training program",
            "silent-basketball-training-program",
            &["silent basketball conditioning"],
            "program-seeking",
        ),
        rule(
            "hotel room basketball drills",
            "hotel-room-basketball-drills",
            &["basketball drills hotel room"],
            "situation-specific",
        ),
        rule(
            "basketball drills upstairs",
            "basketball-drills-upstairs",
            &["basketball drills upstairs apartment"],
            "situation-specific",
        ),
        rule(
            "quiet basketball drills for kids",
            "quiet-basketball-drills-kids",
            &["silent basketball for kids", "silent basketball drills youth", "quiet youth basketball drills"],
            "age-specific",
        ),
        // home training
        rule(
            "basketball training at home",
            "basketball-training-at-home",
            &["basketball training alone at home", "how to get better at basketball at home", "basketball skills to practice at home"],
            "program-seeking",
        ),
        rule(
            "indoor basketball drills no hoop",
            "indoor-basketball-drills-no-hoop",
            &["basketball drills without a hoop", "kids basketball drills without hoop", "can you improve at basketball without a hoop"],
            "constraint-based",
        ),
        rule(
            "basketball drills for kids at home",
            "basketball-drills-kids-at-home",
            &["basketball skills for kids at home", "basketball drills for 7 year olds at home", "basketball drills for 10 year olds at home"],
            "age-specific",
        ),
        rule(
            "small space basketball drills",
            "small-space-basketball-drills",
            &["basketball drills small space quiet", "best basketball drills for small spaces", "indoor basketball drills small space"],
            "constraint-based",
        ),
        rule(
            "how to practice basketball alone",
            "practice-basketball-alone",
            &["basketball drills to do by yourself", "solo basketball workout", "what basketball drills can i do at home"],
            "solo-training",
        ),
    ]
}

fn links(must: &[&str], can: &[&str]) -> LinkRequirement {
    LinkRequirement {
        must_link_to: owned(must),
        can_link_to: owned(can),
    }
}

fn builtin_link_requirements() -> HashMap<String, LinkRequirement> {
    HashMap::from([
        (
            "silent-basketball".to_string(),
            links(
                &["silent-training-guide", "best-quiet-basketball", "pocket-control-drills"],
                &["apartment-basketball-training", "hotel-room-basketball-drills"],
            ),
        ),
        (
            "quiet-basketball".to_string(),
            links(
                &["silent-training-guide", "silent-basketball"],
                &["quiet-basketball-drills-apartment", "best-quiet-basketball"],
            ),
        ),
        (
            "quiet-basketball-drills-apartment".to_string(),
            links(
                &["silent-training-guide", "apartment-basketball-training", "best-quiet-basketball"],
                &["silent-basketball-drills", "pocket-control-drills"],
            ),
        ),
        (
            "apartment-basketball-training".to_string(),
            links(
                &["silent-training-guide", "quiet-basketball-drills-apartment"],
                &["best-quiet-basketball", "small-space-basketball-drills"],
            ),
        ),
        (
            "best-quiet-basketball".to_string(),
            links(
                &["silent-training-guide", "neoball-product"],
                &["silent-basketball", "apartment-basketball-training"],
            ),
        ),
        (
            "silent-basketball-drills".to_string(),
            links(
                &["silent-training-guide", "pocket-control-drills"],
                &["quiet-basketball-drills-apartment", "silent-basketball-training-program"],
            ),
        ),
        (
            "hotel-room-basketball-drills".to_string(),
            links(
                &["silent-training-guide", "silent-basketball-drills"],
                &["best-quiet-basketball", "pocket-control-drills"],
            ),
        ),
        (
            "silent-basketball-training-program".to_string(),
            links(
                &["silent-training-guide", "silent-basketball-drills", "pocket-control-drills"],
                &["apartment-basketball-training", "best-quiet-basketball"],
            ),
        ),
    ])
}

fn builtin_default_links() -> HashMap<String, Vec<String>> {
    HashMap::from([
        ("silent-basketball".to_string(), owned(&["silent-training-guide", "best-quiet-basketball"])),
        ("home-training".to_string(), owned(&["home-training-guide", "small-space-basketball-drills"])),
        ("ball-handling".to_string(), owned(&["ball-handling-guide", "figure-8-dribbling"])),
        ("shooting".to_string(), owned(&["shooting-form-guide"])),
        ("barefoot".to_string(), owned(&["barefoot-training-guide"])),
        ("footwork".to_string(), owned(&["footwork-guide"])),
        ("general".to_string(), owned(&["home-training-guide"])),
    ])
}

fn builtin_pillar_routes() -> HashMap<String, PillarRoute> {
    HashMap::from([
        ("silent-basketball".to_string(), route("silent-training-guide", "/basketball/silent-training")),
        ("home-training".to_string(), route("home-training-guide", "/basketball/home-training")),
        ("ball-handling".to_string(), route("ball-handling-guide", "/basketball/ball-handling")),
        ("shooting".to_string(), route("shooting-form-guide", "/basketball/shooting")),
        ("barefoot".to_string(), route("barefoot-training-guide", "/barefoot-training")),
        ("footwork".to_string(), route("footwork-guide", "/basketball/footwork")),
        ("injury-prevention".to_string(), route("barefoot-training-guide", "/barefoot-training")),
        ("speed-agility".to_string(), route("footwork-guide", "/basketball/footwork")),
        ("youth-development".to_string(), route("home-training-guide", "/basketball/home-training")),
        ("general".to_string(), route("home-training-guide", "/basketball/home-training")),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_are_consistent() {
        let tables = SeoTables::builtin().unwrap();
        let index = tables.rule_index().unwrap();
        assert_eq!(index.primaries.len(), tables.rules.len());
        assert!(index.absorbed.contains("silent dribbling ball"));
        assert!(!index.absorbed.contains("silent basketball"));
    }

    #[test]
    fn absorbed_primary_overlap_is_rejected() {
        let mut tables = SeoTables::builtin().unwrap();
        tables.rules[1].absorbs.push("Silent Basketball".to_string());
        let err = tables.rule_index().unwrap_err();
        assert!(err.to_string().contains("both primary and absorbed"), "{err}");
    }

    #[test]
    fn double_absorption_is_rejected() {
        let mut tables = SeoTables::builtin().unwrap();
        tables.rules[2].absorbs.push("quiet ball handling".to_string());
        assert!(matches!(tables.rule_index(), Err(YpError::InvalidRules(_))));
    }

    #[test]
    fn duplicate_primary_is_rejected() {
        let mut tables = SeoTables::builtin().unwrap();
        let dup = tables.rules[0].clone();
        tables.rules.push(dup);
        assert!(tables.rule_index().is_err());
    }

    #[test]
    fn routes_fall_back_to_home_training() {
        let tables = SeoTables::builtin().unwrap();
        assert_eq!(tables.route_for("speed-agility").pillar_id, "footwork-guide");
        assert_eq!(tables.route_for("underwater").pillar_id, "home-training-guide");
    }

    #[test]
    fn links_prefer_explicit_then_cluster_then_parent() {
        let tables = SeoTables::builtin().unwrap();
        let (must, can) = tables.links_for("best-quiet-basketball", "silent-basketball", "x");
        assert!(must.contains(&"neoball-product".to_string()));
        assert_eq!(can.len(), 2);

        let (must, can) = tables.links_for("some-shooting-spoke", "shooting", "shooting-form-guide");
        assert_eq!(must, vec!["shooting-form-guide"]);
        assert!(can.is_empty());

        let (must, _) = tables.links_for("x", "speed-agility", "footwork-guide");
        assert_eq!(must, vec!["footwork-guide"]);
    }
}
