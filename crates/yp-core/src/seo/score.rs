use super::gap::Gap;
use super::tables::SeoTables;
use serde::Serialize;

/// Multiplier applied to keywords that are a consolidation rule's primary.
pub const PRIMARY_BOOST: f64 = 1.2;

/// Multiplier used when an intent or cluster is missing from the tables.
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreDiagnostics {
    pub score: i64,
    pub intent_multiplier: f64,
    pub cluster_multiplier: f64,
    pub primary_boost: f64,
    /// Non-empty when the intent or cluster fell back to the neutral multiplier.
    pub warnings: Vec<String>,
}

/// `round(volume * (1 - difficulty/100) * intent * cluster * boost)`.
pub fn calculate_priority_score(tables: &SeoTables, gap: &Gap, is_primary: bool) -> i64 {
    score_with_diagnostics(tables, gap, is_primary).score
}

/// Same score as [`calculate_priority_score`], plus the multipliers used and
/// a warning for every table lookup that missed.
pub fn score_with_diagnostics(tables: &SeoTables, gap: &Gap, is_primary: bool) -> ScoreDiagnostics {
    let mut warnings = Vec::new();

    let intent_multiplier = match tables.intent_multipliers.get(&gap.intent) {
        Some(m) => *m,
        None => {
            warnings.push(format!("unknown intent '{}', using {NEUTRAL_MULTIPLIER}", gap.intent));
            NEUTRAL_MULTIPLIER
        }
    };
    let cluster_multiplier = match tables.cluster_multipliers.get(&gap.cluster) {
        Some(m) => *m,
        None => {
            warnings.push(format!("unknown cluster '{}', using {NEUTRAL_MULTIPLIER}", gap.cluster));
            NEUTRAL_MULTIPLIER
        }
    };
    let primary_boost = if is_primary { PRIMARY_BOOST } else { 1.0 };

    let base = gap.volume as f64 * (1.0 - f64::from(gap.difficulty) / 100.0);
    // f64::round rounds half away from zero; base is never negative here.
    let score = (base * intent_multiplier * cluster_multiplier * primary_boost).round() as i64;

    ScoreDiagnostics {
        score,
        intent_multiplier,
        cluster_multiplier,
        primary_boost,
        warnings,
    }
}

/// Task priority bucket, 1 (critical) through 4 (low).
pub fn priority_bucket(cluster: &str, score: i64) -> u8 {
    match (cluster == "silent-basketball", score) {
        (true, s) if s > 3000 => 1,
        (true, _) => 2,
        (false, s) if s > 2000 => 2,
        (false, s) if s < 1000 => 4,
        _ => 3,
    }
}
