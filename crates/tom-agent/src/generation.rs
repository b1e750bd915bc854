use crate::{Result, TomError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use yp_core::config::ModelConfig;

pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

// ─── Request / trait ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Cheap, low-latency model for classification.
    Fast,
    /// Stronger model for writing.
    Smart,
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub tier: ModelTier,
    pub schema_name: String,
    /// JSON Schema the reply must satisfy.
    pub schema: Value,
    pub system_prompt: String,
    pub user_prompt: String,
}

/// A model endpoint that returns JSON shaped by a schema.
#[async_trait::async_trait]
pub trait StructuredGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<Value>;
}

/// A typed reply with its schema and any checks serde cannot express.
pub trait StructuredOutput: DeserializeOwned + Send {
    const SCHEMA_NAME: &'static str;

    fn json_schema() -> Value;

    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// Call `generator` and decode the reply as `T`. A reply that does not
/// deserialize or fails `T::validate` is a [`TomError::Schema`].
pub async fn generate_structured<T: StructuredOutput>(
    generator: &dyn StructuredGenerator,
    tier: ModelTier,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<T> {
    let value = generator
        .generate(GenerationRequest {
            tier,
            schema_name: T::SCHEMA_NAME.to_string(),
            schema: T::json_schema(),
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
        })
        .await?;

    let out: T = serde_json::from_value(value).map_err(|e| TomError::Schema {
        schema: T::SCHEMA_NAME,
        reason: e.to_string(),
    })?;
    out.validate().map_err(|reason| TomError::Schema {
        schema: T::SCHEMA_NAME,
        reason,
    })?;
    Ok(out)
}

// ─── Anthropic ────────────────────────────────────────────────────────────

/// Messages API client that forces a single tool call whose input schema is
/// the requested output schema.
pub struct AnthropicGenerator {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    models: ModelConfig,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Value>,
    tools: Vec<Value>,
    tool_choice: Value,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    input: Option<Value>,
}

impl AnthropicGenerator {
    pub fn new(api_key: Option<String>, models: ModelConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: ANTHROPIC_API_URL.to_string(),
            api_key,
            models,
        })
    }

    /// Key from `ANTHROPIC_API_KEY`; without it every call fails and callers
    /// take their fallback path.
    pub fn from_env(models: ModelConfig, timeout: Duration) -> Result<Self> {
        let key = std::env::var("ANTHROPIC_API_KEY").ok().filter(|k| !k.is_empty());
        Self::new(key, models, timeout)
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Fast => &self.models.fast,
            ModelTier::Smart => &self.models.smart,
        }
    }
}

#[async_trait::async_trait]
impl StructuredGenerator for AnthropicGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<Value> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(TomError::NotConfigured("ANTHROPIC_API_KEY"))?;

        let body = MessagesRequest {
            model: self.model_for(request.tier),
            max_tokens: MAX_TOKENS,
            system: &request.system_prompt,
            messages: vec![json!({ "role": "user", "content": request.user_prompt })],
            tools: vec![json!({
                "name": request.schema_name,
                "description": "Return the result in this exact shape.",
                "input_schema": request.schema,
            })],
            tool_choice: json!({ "type": "tool", "name": request.schema_name }),
        };

        let resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TomError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = resp.json().await?;
        parsed
            .content
            .into_iter()
            .find(|b| b.block_type == "tool_use")
            .and_then(|b| b.input)
            .ok_or_else(|| TomError::Generation("reply had no tool_use block".to_string()))
    }
}
