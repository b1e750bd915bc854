use crate::error::{Result, YpError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A keyword worth ranking for that no page covers yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub keyword: String,
    pub volume: u64,
    /// Keyword difficulty, 0–100.
    pub difficulty: u32,
    pub intent: String,
    pub cluster: String,
    pub sport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapFile {
    pub gaps: Vec<Gap>,
}

impl GapFile {
    /// Parse and validate a `{ "gaps": [...] }` document.
    pub fn parse(json: &str) -> Result<Self> {
        let file: GapFile = serde_json::from_str(json)?;
        for gap in &file.gaps {
            if gap.difficulty > 100 {
                return Err(YpError::InvalidGap {
                    keyword: gap.keyword.clone(),
                    reason: format!("difficulty {} is outside 0-100", gap.difficulty),
                });
            }
            if gap.keyword.trim().is_empty() {
                return Err(YpError::InvalidGap {
                    keyword: gap.keyword.clone(),
                    reason: "empty keyword".to_string(),
                });
            }
        }
        Ok(file)
    }

    /// Read the gap file. A missing or malformed file is fatal for the batch.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(YpError::GapFileNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data)
    }
}
