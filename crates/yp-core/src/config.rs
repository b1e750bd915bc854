use crate::error::Result;
use crate::paths;
use crate::seo::upload::DEFAULT_CONVEX_MUTATION;
use crate::types::TomUser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// SeoConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoConfig {
    #[serde(default = "default_gaps_path")]
    pub gaps_path: PathBuf,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Unknown intents or clusters fail the batch instead of scoring at 1.0.
    #[serde(default)]
    pub strict_tables: bool,
    #[serde(default = "default_neoball_project")]
    pub neoball_project: String,
    #[serde(default = "default_content_project")]
    pub content_project: String,
    #[serde(default = "default_convex_mutation")]
    pub convex_mutation: String,
}

fn default_gaps_path() -> PathBuf {
    PathBuf::from(paths::DEFAULT_GAPS_FILE)
}

fn default_output_path() -> PathBuf {
    PathBuf::from(paths::DEFAULT_TASKS_FILE)
}

fn default_neoball_project() -> String {
    crate::seo::builder::NEOBALL_PROJECT.to_string()
}

fn default_content_project() -> String {
    crate::seo::builder::CONTENT_PROJECT.to_string()
}

fn default_convex_mutation() -> String {
    DEFAULT_CONVEX_MUTATION.to_string()
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            gaps_path: default_gaps_path(),
            output_path: default_output_path(),
            strict_tables: false,
            neoball_project: default_neoball_project(),
            content_project: default_content_project(),
            convex_mutation: default_convex_mutation(),
        }
    }
}

// ---------------------------------------------------------------------------
// TomConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_fast_model")]
    pub fast: String,
    #[serde(default = "default_smart_model")]
    pub smart: String,
}

fn default_fast_model() -> String {
    "claude-3-5-haiku-latest".to_string()
}

fn default_smart_model() -> String {
    "claude-sonnet-4-5".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            fast: default_fast_model(),
            smart: default_smart_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomConfig {
    /// Fast-path confidence at or above which the smart classifier skips
    /// the model call.
    #[serde(default = "default_fast_threshold")]
    pub fast_confidence_threshold: f64,
    /// Classifications below this never reach a tool.
    #[serde(default = "default_route_threshold")]
    pub route_confidence_threshold: f64,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub models: ModelConfig,
    /// Outbound phone number per user. `TOM_PHONE_<USER>` overrides.
    #[serde(default)]
    pub phones: BTreeMap<TomUser, String>,
}

fn default_fast_threshold() -> f64 {
    0.7
}

fn default_route_threshold() -> f64 {
    0.6
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for TomConfig {
    fn default() -> Self {
        Self {
            fast_confidence_threshold: default_fast_threshold(),
            route_confidence_threshold: default_route_threshold(),
            request_timeout_secs: default_timeout_secs(),
            models: ModelConfig::default(),
            phones: BTreeMap::new(),
        }
    }
}

impl TomConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Phone number for `user`: environment first, then config.
    pub fn phone_for(&self, user: TomUser) -> Option<String> {
        std::env::var(user.phone_env_var())
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.phones.get(&user).cloned())
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub seo: SeoConfig,
    #[serde(default)]
    pub tom: TomConfig,
}

impl Config {
    /// Load `.yp/config.yaml` under `root`; a missing file yields defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::config_path(root), data.as_bytes())
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let tom = &self.tom;

        for (name, value) in [
            ("tom.fast_confidence_threshold", tom.fast_confidence_threshold),
            ("tom.route_confidence_threshold", tom.route_confidence_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("{name}={value} is outside 0.0-1.0"),
                });
            }
        }

        if tom.route_confidence_threshold > tom.fast_confidence_threshold {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "route threshold {} is above the fast-path threshold {}; \
                     model-classified requests that beat the fast path can still be dropped",
                    tom.route_confidence_threshold, tom.fast_confidence_threshold
                ),
            });
        }

        if tom.request_timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "tom.request_timeout_secs must be greater than 0".to_string(),
            });
        } else if tom.request_timeout_secs > 300 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "tom.request_timeout_secs={} is unusually long",
                    tom.request_timeout_secs
                ),
            });
        }

        for (label, model) in [("fast", &tom.models.fast), ("smart", &tom.models.smart)] {
            if model.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("tom.models.{label} is empty"),
                });
            }
        }

        for (user, phone) in &tom.phones {
            let digits = phone.trim_start_matches('+');
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("tom.phones.{user} '{phone}' is not an international number"),
                });
            }
        }

        if self.seo.convex_mutation.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "seo.convex_mutation is empty".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
