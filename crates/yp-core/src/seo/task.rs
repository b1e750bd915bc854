use super::content::ExpertAttribution;
use crate::types::ContentType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const TASK_DOMAIN: &str = "seo";
pub const TASK_STATUS_PENDING: &str = "pending";
pub const TASK_CREATED_BY: &str = "seed-seo-tasks";

/// One content-authoring task, in the task store's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoTask {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub domain: String,
    pub project: String,
    pub status: String,
    /// 1 (critical) through 4 (low).
    pub priority: u8,
    pub created_by: String,
    pub payload: SeoPayload,
    /// Unix milliseconds.
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoPayload {
    pub keyword: String,
    pub volume: u64,
    pub difficulty: u32,
    pub intent: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub slug: String,
    pub suggested_title: String,
    pub parent_pillar: String,
    pub parent_pillar_slug: String,
    pub internal_links_required: Vec<String>,
    pub internal_links_optional: Vec<String>,
    pub consolidates: Vec<String>,
    pub total_volume_with_consolidated: u64,
    pub expert: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert_attribution: Option<ExpertAttribution>,
    pub cluster: String,
    pub sport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    pub visual_required: String,
    #[serde(rename = "hasNeoBallCTA")]
    pub has_neoball_cta: bool,
    pub priority_score: i64,
    pub search_intent: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub score_warnings: Vec<String>,
}

impl SeoTask {
    pub fn is_pillar(&self) -> bool {
        self.payload.content_type == ContentType::Pillar
    }
}

// ---------------------------------------------------------------------------
// TaskSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub silent_basketball: usize,
    pub neoball_cta: usize,
    /// Bucket → count, always holding keys 1 through 4.
    pub by_priority: BTreeMap<u8, usize>,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[SeoTask]) -> Self {
        let mut summary = TaskSummary {
            total: tasks.len(),
            by_type: ContentType::all()
                .iter()
                .map(|t| (t.as_str().to_string(), 0))
                .collect(),
            by_priority: (1..=4).map(|p| (p, 0)).collect(),
            ..Default::default()
        };
        for task in tasks {
            *summary
                .by_type
                .entry(task.payload.content_type.as_str().to_string())
                .or_default() += 1;
            *summary.by_priority.entry(task.priority).or_default() += 1;
            if task.payload.cluster == "silent-basketball" {
                summary.silent_basketball += 1;
            }
            if task.payload.has_neoball_cta {
                summary.neoball_cta += 1;
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(content_type: ContentType) -> SeoTask {
        SeoTask {
            task_id: "opp_shooting_000".into(),
            title: "[SPOKE] Shooting Form".into(),
            description: String::new(),
            domain: TASK_DOMAIN.into(),
            project: "yp-content".into(),
            status: TASK_STATUS_PENDING.into(),
            priority: 3,
            created_by: TASK_CREATED_BY.into(),
            payload: SeoPayload {
                keyword: "shooting form".into(),
                volume: 500,
                difficulty: 30,
                intent: "informational".into(),
                content_type,
                slug: "shooting-form".into(),
                suggested_title: "Shooting Form".into(),
                parent_pillar: "shooting-form-guide".into(),
                parent_pillar_slug: "/basketball/shooting".into(),
                internal_links_required: vec![],
                internal_links_optional: vec![],
                consolidates: vec![],
                total_volume_with_consolidated: 500,
                expert: "adam-harrington".into(),
                expert_attribution: None,
                cluster: "shooting".into(),
                sport: "basketball".into(),
                age_group: None,
                visual_required: "video".into(),
                has_neoball_cta: false,
                priority_score: 455,
                search_intent: "informational".into(),
                score_warnings: vec![],
            },
            created_at: 1,
            updated_at: 1,
        }
    }

    #[test]
    fn wire_names() {
        let v = serde_json::to_value(task(ContentType::Spoke)).unwrap();
        assert_eq!(v["taskId"], "opp_shooting_000");
        assert_eq!(v["createdBy"], "seed-seo-tasks");
        assert_eq!(v["payload"]["type"], "spoke");
        assert_eq!(v["payload"]["hasNeoBallCTA"], false);
        assert_eq!(v["payload"]["totalVolumeWithConsolidated"], 500);
        assert!(v["payload"].get("scoreWarnings").is_none());
        assert!(v["payload"].get("ageGroup").is_none());
    }

    #[test]
    fn summary_always_has_every_bucket() {
        let s = TaskSummary::from_tasks(&[task(ContentType::Pillar)]);
        assert_eq!(s.total, 1);
        assert_eq!(s.by_type["pillar"], 1);
        assert_eq!(s.by_type["drill"], 0);
        assert_eq!(s.by_priority.len(), 4);
        assert_eq!(s.by_priority[&3], 1);
        assert!(task(ContentType::Pillar).is_pillar());
        assert!(!task(ContentType::Qa).is_pillar());
    }
}
