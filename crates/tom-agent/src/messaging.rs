use crate::{Result, TomError};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;
use yp_core::config::TomConfig;
use yp_core::TomUser;

pub const WHATSAPP_API_URL: &str = "https://graph.facebook.com/v18.0";

/// Outbound channel to a team member.
#[async_trait::async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, user: TomUser, text: &str) -> Result<()>;

    async fn send_image(&self, user: TomUser, image_url: &str, caption: &str) -> Result<()>;
}

// ─── WhatsApp Cloud API ───────────────────────────────────────────────────

pub struct WhatsAppMessenger {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    phone_number_id: Option<String>,
    phones: BTreeMap<TomUser, String>,
}

impl WhatsAppMessenger {
    pub fn new(
        token: Option<String>,
        phone_number_id: Option<String>,
        phones: BTreeMap<TomUser, String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: WHATSAPP_API_URL.to_string(),
            token,
            phone_number_id,
            phones,
        })
    }

    /// Credentials from `WHATSAPP_API_TOKEN` / `WHATSAPP_PHONE_NUMBER_ID`;
    /// numbers from `TOM_PHONE_<USER>` or the config file.
    pub fn from_env(config: &TomConfig) -> Result<Self> {
        let var = |k: &str| std::env::var(k).ok().filter(|v| !v.is_empty());
        let phones = TomUser::all()
            .iter()
            .filter_map(|u| config.phone_for(*u).map(|p| (*u, p)))
            .collect();
        Self::new(
            var("WHATSAPP_API_TOKEN"),
            var("WHATSAPP_PHONE_NUMBER_ID"),
            phones,
            config.request_timeout(),
        )
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Resolve the recipient and post one message. Without API credentials
    /// the send is logged and skipped; an unknown recipient is always an
    /// error.
    async fn post(&self, user: TomUser, payload: serde_json::Value, summary: &str) -> Result<()> {
        let phone = self.phones.get(&user).ok_or(TomError::MissingPhone(user))?;

        let (Some(token), Some(number_id)) = (&self.token, &self.phone_number_id) else {
            tracing::warn!(%user, summary, "WhatsApp API not configured, skipping send");
            return Ok(());
        };

        let mut body = payload;
        body["messaging_product"] = json!("whatsapp");
        body["to"] = json!(phone);

        let resp = self
            .client
            .post(format!("{}/{number_id}/messages", self.base_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(TomError::Messaging(format!("WhatsApp API error: {text}")));
        }
        Ok(())
    }
}

fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}

#[async_trait::async_trait]
impl Messenger for WhatsAppMessenger {
    async fn send_text(&self, user: TomUser, text: &str) -> Result<()> {
        let payload = json!({ "type": "text", "text": { "body": text } });
        self.post(user, payload, &preview(text)).await
    }

    async fn send_image(&self, user: TomUser, image_url: &str, caption: &str) -> Result<()> {
        let payload = json!({ "type": "image", "image": { "link": image_url, "caption": caption } });
        self.post(user, payload, &preview(caption)).await
    }
}
