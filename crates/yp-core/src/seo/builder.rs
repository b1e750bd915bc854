use super::content::{
    cluster_expert, determine_content_type, expert_attribution, generate_slug, has_neoball_cta,
    suggested_title, visual_requirement,
};
use super::gap::Gap;
use super::score::{priority_bucket, score_with_diagnostics};
use super::tables::{PillarDefinition, SeoTables};
use super::task::{SeoPayload, SeoTask, TASK_CREATED_BY, TASK_DOMAIN, TASK_STATUS_PENDING};
use crate::error::{Result, YpError};
use crate::types::ContentType;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const PILLAR_PRIORITY_SCORE: i64 = 10_000;
pub const DEFAULT_SEARCH_INTENT: &str = "informational";
pub const NEOBALL_PROJECT: &str = "neoball-territory";
pub const CONTENT_PROJECT: &str = "yp-content";

/// Turns a gap list into the sorted task list: one task per pillar, then
/// one per non-absorbed gap.
#[derive(Debug, Clone)]
pub struct TaskBuilder<'a> {
    tables: &'a SeoTables,
    strict: bool,
    neoball_project: String,
    content_project: String,
}

impl<'a> TaskBuilder<'a> {
    pub fn new(tables: &'a SeoTables) -> Self {
        Self {
            tables,
            strict: false,
            neoball_project: NEOBALL_PROJECT.to_string(),
            content_project: CONTENT_PROJECT.to_string(),
        }
    }

    /// Fail the batch on unknown intents or clusters instead of scoring
    /// them with the neutral multiplier.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn projects(mut self, neoball: impl Into<String>, content: impl Into<String>) -> Self {
        self.neoball_project = neoball.into();
        self.content_project = content.into();
        self
    }

    /// Build every task, stamped with `now_ms`. The output depends on
    /// nothing but the inputs.
    pub fn build(&self, gaps: &[Gap], now_ms: i64) -> Result<Vec<SeoTask>> {
        let index = self.tables.rule_index()?;

        // First occurrence wins when a keyword repeats.
        let mut volumes: HashMap<String, u64> = HashMap::new();
        for gap in gaps {
            volumes.entry(gap.keyword.to_lowercase()).or_insert(gap.volume);
        }

        let mut tasks: Vec<SeoTask> = self
            .tables
            .pillars
            .iter()
            .map(|p| self.pillar_task(p, now_ms))
            .collect();

        let mut spoke_index = 0usize;
        for gap in gaps {
            let kw_lower = gap.keyword.to_lowercase();
            if index.absorbed.contains(&kw_lower) {
                continue;
            }
            let rule = index.primaries.get(&kw_lower).map(|&i| &self.tables.rules[i]);

            let mut consolidates = Vec::new();
            let mut total_volume = gap.volume;
            if let Some(rule) = rule {
                for absorbed in &rule.absorbs {
                    if let Some(v) = volumes.get(&absorbed.to_lowercase()) {
                        consolidates.push(absorbed.clone());
                        total_volume += v;
                    }
                }
            }

            let diag = score_with_diagnostics(self.tables, gap, rule.is_some());
            if !diag.warnings.is_empty() {
                if self.strict {
                    return Err(YpError::StrictScoring {
                        keyword: gap.keyword.clone(),
                        reason: diag.warnings.join("; "),
                    });
                }
                for w in &diag.warnings {
                    tracing::warn!(keyword = %gap.keyword, "{w}");
                }
            }

            let content_type = determine_content_type(&gap.keyword);
            let slug = match rule {
                Some(r) => r.primary_slug.clone(),
                None => generate_slug(&gap.keyword),
            };
            let route = self.tables.route_for(&gap.cluster);
            let (must_link, can_link) = self.tables.links_for(&slug, &gap.cluster, &route.pillar_id);
            let neoball = has_neoball_cta(&kw_lower);
            let title = suggested_title(&gap.keyword);
            let project = if gap.cluster == "silent-basketball" {
                &self.neoball_project
            } else {
                &self.content_project
            };

            if rule.is_some() {
                tracing::info!(
                    keyword = %gap.keyword,
                    consolidated = consolidates.len(),
                    total_volume,
                    "primary keyword"
                );
            }

            tasks.push(SeoTask {
                task_id: format!("opp_{}_{spoke_index:03}", gap.cluster.replace('-', "_")),
                title: format!("[{}] {title}", content_type.as_str().to_uppercase()),
                description: format!(
                    "Generate {content_type} content for \"{}\" ({} vol, {} KD)",
                    gap.keyword, gap.volume, gap.difficulty
                ),
                domain: TASK_DOMAIN.to_string(),
                project: project.clone(),
                status: TASK_STATUS_PENDING.to_string(),
                priority: priority_bucket(&gap.cluster, diag.score),
                created_by: TASK_CREATED_BY.to_string(),
                payload: SeoPayload {
                    keyword: gap.keyword.clone(),
                    volume: gap.volume,
                    difficulty: gap.difficulty,
                    intent: gap.intent.clone(),
                    content_type,
                    slug: format!("{}/{slug}", route.pillar_slug),
                    suggested_title: title,
                    parent_pillar: route.pillar_id.clone(),
                    parent_pillar_slug: route.pillar_slug.clone(),
                    internal_links_required: must_link,
                    internal_links_optional: can_link,
                    consolidates,
                    total_volume_with_consolidated: total_volume,
                    expert: cluster_expert(&gap.cluster).to_string(),
                    expert_attribution: Some(expert_attribution(&gap.cluster, neoball)),
                    cluster: gap.cluster.clone(),
                    sport: gap.sport.clone(),
                    age_group: gap.age_group.clone(),
                    visual_required: visual_requirement(&gap.keyword, &gap.cluster, content_type)
                        .to_string(),
                    has_neoball_cta: neoball,
                    priority_score: diag.score,
                    search_intent: rule
                        .map(|r| r.search_intent.clone())
                        .unwrap_or_else(|| DEFAULT_SEARCH_INTENT.to_string()),
                    score_warnings: diag.warnings,
                },
                created_at: now_ms,
                updated_at: now_ms,
            });
            spoke_index += 1;
        }

        sort_tasks(&mut tasks);
        Ok(tasks)
    }

    fn pillar_task(&self, pillar: &PillarDefinition, now_ms: i64) -> SeoTask {
        SeoTask {
            task_id: format!("pillar_{}", pillar.id),
            title: format!("[PILLAR] {}", pillar.title),
            description: pillar.description.clone(),
            domain: TASK_DOMAIN.to_string(),
            project: self.neoball_project.clone(),
            status: TASK_STATUS_PENDING.to_string(),
            priority: 1,
            created_by: TASK_CREATED_BY.to_string(),
            payload: SeoPayload {
                keyword: pillar.title.to_lowercase(),
                volume: 0,
                difficulty: 0,
                intent: DEFAULT_SEARCH_INTENT.to_string(),
                content_type: ContentType::Pillar,
                slug: pillar.slug.clone(),
                suggested_title: pillar.title.clone(),
                parent_pillar: pillar.id.clone(),
                parent_pillar_slug: pillar.slug.clone(),
                internal_links_required: Vec::new(),
                internal_links_optional: Vec::new(),
                consolidates: Vec::new(),
                total_volume_with_consolidated: 0,
                expert: pillar.expert.clone(),
                expert_attribution: None,
                cluster: pillar.cluster.clone(),
                sport: "basketball".to_string(),
                age_group: None,
                visual_required: pillar.visual_required.clone(),
                has_neoball_cta: pillar.product_tie_in.as_deref() == Some("neoball"),
                priority_score: PILLAR_PRIORITY_SCORE,
                search_intent: "comprehensive-guide".to_string(),
                score_warnings: Vec::new(),
            },
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

/// Pillars first, then priority bucket ascending, then score descending.
/// `sort_by` is stable, so equal keys keep insertion order.
pub fn sort_tasks(tasks: &mut [SeoTask]) {
    tasks.sort_by(compare_tasks);
}

fn compare_tasks(a: &SeoTask, b: &SeoTask) -> Ordering {
    b.is_pillar()
        .cmp(&a.is_pillar())
        .then_with(|| a.priority.cmp(&b.priority))
        .then_with(|| b.payload.priority_score.cmp(&a.payload.priority_score))
}
