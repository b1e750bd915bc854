//! Idempotent upsert of seeded tasks into the task store.

use super::task::SeoTask;
use crate::error::{Result, YpError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_CONVEX_MUTATION: &str = "agentFs:seedSEOTask";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertAction {
    Created,
    Updated,
}

/// Anything that can upsert a task by `task_id`.
pub trait TaskStore {
    fn upsert(&mut self, task: &SeoTask) -> Result<UpsertAction>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
}

/// Upsert every task in order. A failed upsert is logged and counted; the
/// rest of the batch still runs.
pub fn upload_tasks(store: &mut dyn TaskStore, tasks: &[SeoTask]) -> UploadSummary {
    let mut summary = UploadSummary::default();
    for task in tasks {
        match store.upsert(task) {
            Ok(UpsertAction::Created) => summary.created += 1,
            Ok(UpsertAction::Updated) => summary.updated += 1,
            Err(e) => {
                tracing::error!(task_id = %task.task_id, error = %e, "upload failed");
                summary.failed += 1;
            }
        }
        let done = summary.created + summary.updated;
        if done > 0 && done % 10 == 0 {
            tracing::info!(done, total = tasks.len(), "upload progress");
        }
    }
    tracing::info!(
        created = summary.created,
        updated = summary.updated,
        failed = summary.failed,
        "upload complete"
    );
    summary
}

// ---------------------------------------------------------------------------
// Convex
// ---------------------------------------------------------------------------

/// Calls a Convex mutation over the HTTP API (`POST {url}/api/mutation`).
pub struct ConvexTaskStore {
    client: reqwest::blocking::Client,
    base_url: String,
    mutation: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConvexResponse {
    status: String,
    #[serde(default)]
    value: Option<serde_json::Value>,
    #[serde(default)]
    error_message: Option<String>,
}

impl ConvexTaskStore {
    pub fn new(base_url: &str, mutation: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            mutation: mutation.to_string(),
        })
    }
}

impl TaskStore for ConvexTaskStore {
    fn upsert(&mut self, task: &SeoTask) -> Result<UpsertAction> {
        let args = json!({
            "taskId": task.task_id,
            "title": task.title,
            "description": task.description,
            "domain": task.domain,
            "project": task.project,
            "priority": task.priority,
            "createdBy": task.created_by,
            "payload": task.payload,
        });
        let body = json!({ "path": self.mutation, "args": args, "format": "json" });

        let resp: ConvexResponse = self
            .client
            .post(format!("{}/api/mutation", self.base_url))
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        if resp.status != "success" {
            return Err(YpError::Store(
                resp.error_message
                    .unwrap_or_else(|| format!("mutation returned status '{}'", resp.status)),
            ));
        }
        let action = resp
            .value
            .as_ref()
            .and_then(|v| v.get("action"))
            .and_then(|a| a.as_str());
        Ok(match action {
            Some("created") => UpsertAction::Created,
            _ => UpsertAction::Updated,
        })
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Task store backed by a map; used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    pub tasks: BTreeMap<String, SeoTask>,
}

impl TaskStore for MemoryTaskStore {
    fn upsert(&mut self, task: &SeoTask) -> Result<UpsertAction> {
        match self.tasks.insert(task.task_id.clone(), task.clone()) {
            Some(_) => Ok(UpsertAction::Updated),
            None => Ok(UpsertAction::Created),
        }
    }
}
