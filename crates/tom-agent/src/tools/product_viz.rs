use super::{apologize, excerpt, ToolHandler, ToolOutcome, ToolSuccess};
use crate::messaging::Messenger;
use crate::{Result, TomError};
use regex::Regex;
use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use yp_core::{Intent, TomUser};

pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
const GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

/// Descriptions shorter than this are candidates for clarification.
const MIN_DESCRIPTION_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VizStyle {
    Sketch,
    Render,
    Technical,
}

impl VizStyle {
    pub fn prompt(self) -> &'static str {
        match self {
            VizStyle::Sketch => "2D product concept sketch, clean lines, minimal shading, industrial design style, black and white line drawing",
            VizStyle::Render => "3D rendered product visualization, studio lighting, white background, photorealistic",
            VizStyle::Technical => "Technical drawing with dimensions, exploded view, engineering blueprint style, annotations",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    /// Remote URL, or a `data:` URL for inline bytes.
    pub image_url: String,
    pub revised_prompt: String,
}

#[async_trait::async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, description: &str, style: VizStyle) -> Result<GeneratedImage>;
}

pub fn full_prompt(description: &str, style: VizStyle) -> String {
    format!(
        "{}: {description}.\n\
         Context: Youth sports training equipment or athletic performance product.\n\
         Style: Modern, premium, functional design aesthetic.\n\
         Important: Do NOT include any text, labels, or words in the image.",
        style.prompt()
    )
}

static DETAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Too short AND missing every detail keyword.
pub fn needs_clarification(description: &str) -> bool {
    let detail = DETAIL_RE
        .get_or_init(|| Regex::new(r"(?i)material|size|shape|function|mechanism|feature").unwrap());
    description.chars().count() < MIN_DESCRIPTION_CHARS && !detail.is_match(description)
}

pub const CLARIFICATION_MESSAGE: &str = "🎨 I can sketch that! A few quick questions to nail the concept:

1. **Material?** (rubber, plastic, metal, fabric, foam)
2. **Size?** (palm-sized, basketball-sized, body-length, etc.)
3. **Key feature?** (mechanism, texture, attachment point)

Reply with details and I'll generate a concept sketch.";

// ─── Handler ──────────────────────────────────────────────────────────────

pub struct ProductVizTool {
    images: Arc<dyn ImageGenerator>,
    messenger: Arc<dyn Messenger>,
}

impl ProductVizTool {
    pub fn new(images: Arc<dyn ImageGenerator>, messenger: Arc<dyn Messenger>) -> Self {
        Self { images, messenger }
    }

    async fn deliver(&self, user: TomUser, description: &str, image: &GeneratedImage) -> Result<()> {
        let based_on = excerpt(description, 100);
        if image.image_url.starts_with("data:") {
            // TODO: upload inline images to storage so they can go out via send_image.
            self.messenger
                .send_text(
                    user,
                    &format!(
                        "🎨 Concept sketch generated! The image is processing and will be sent shortly.\n\nBased on: \"{based_on}\""
                    ),
                )
                .await
        } else {
            self.messenger
                .send_image(
                    user,
                    &image.image_url,
                    &format!("🎨 Here's your concept sketch!\n\nBased on: \"{based_on}\"\n\nReply with feedback to iterate."),
                )
                .await
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for ProductVizTool {
    fn intent(&self) -> Intent {
        Intent::ProductVisualization
    }

    async fn handle(&self, user: TomUser, message: &str) -> Result<ToolOutcome> {
        if needs_clarification(message) {
            self.messenger.send_text(user, CLARIFICATION_MESSAGE).await?;
            return Ok(ToolOutcome::Clarification {
                message: CLARIFICATION_MESSAGE.to_string(),
            });
        }

        let result = match self.images.generate(message, VizStyle::Sketch).await {
            Ok(image) => self.deliver(user, message, &image).await.map(|_| image),
            Err(e) => Err(e),
        };

        match result {
            Ok(image) => Ok(ToolOutcome::Success(ToolSuccess {
                image_url: Some(image.image_url),
                ..Default::default()
            })),
            Err(e) => {
                let apology = format!(
                    "⚠️ Couldn't generate the sketch right now. Try describing it differently, or I can note it for later.\n\nError: {e}"
                );
                Ok(apologize(self.messenger.as_ref(), user, "product_viz", &apology, &e).await)
            }
        }
    }
}

// ─── Gemini ───────────────────────────────────────────────────────────────

pub struct GeminiImageGenerator {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiImageGenerator {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: GEMINI_API_URL.to_string(),
            api_key,
        })
    }

    pub fn from_env(timeout: Duration) -> Result<Self> {
        Self::new(
            std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            timeout,
        )
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

fn inline_image(reply: &Value) -> Option<String> {
    reply["candidates"][0]["content"]["parts"]
        .as_array()?
        .iter()
        .find_map(|part| {
            let inline = part.get("inlineData")?;
            let mime = inline.get("mimeType")?.as_str()?;
            let data = inline.get("data")?.as_str()?;
            Some(format!("data:{mime};base64,{data}"))
        })
}

#[async_trait::async_trait]
impl ImageGenerator for GeminiImageGenerator {
    async fn generate(&self, description: &str, style: VizStyle) -> Result<GeneratedImage> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(TomError::NotConfigured("GEMINI_API_KEY"))?;
        let prompt = full_prompt(description, style);

        let resp = self
            .client
            .post(format!(
                "{}/v1beta/models/{GEMINI_MODEL}:generateContent",
                self.base_url
            ))
            .header("x-goog-api-key", key)
            .json(&json!({
                "contents": [{ "parts": [{ "text": format!("Generate an image: {prompt}") }] }],
                "generationConfig": { "responseModalities": ["image", "text"] }
            }))
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

        let reply: Value = resp.json().await?;
        let image_url =
            inline_image(&reply).ok_or_else(|| TomError::Generation("No image generated".to_string()))?;
        Ok(GeneratedImage {
            image_url,
            revised_prompt: prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FakeImages, RecordingMessenger, Sent};

    fn tool(images: FakeImages, messenger: Arc<RecordingMessenger>) -> ProductVizTool {
        ProductVizTool::new(Arc::new(images), messenger)
    }

    #[test]
    fn clarification_requires_short_and_vague() {
        assert!(needs_clarification("a new ball"));
        // Short but names a detail.
        assert!(!needs_clarification("foam ball, palm size"));
        // Long without detail keywords.
        assert!(!needs_clarification("a weighted trainer that clips onto a shoe for agility work"));
    }

    #[test]
    fn style_prompt_leads() {
        let p = full_prompt("grip trainer", VizStyle::Technical);
        assert!(p.starts_with("Technical drawing"));
        assert!(p.contains(": grip trainer."));
    }

    #[tokio::test]
    async fn vague_request_asks_for_detail() {
        let messenger = Arc::new(RecordingMessenger::default());
        let images = FakeImages::ok("https://img/1.png");
        let out = tool(images.clone(), messenger.clone())
            .handle(TomUser::James, "a new ball")
            .await
            .unwrap();
        assert!(matches!(out, ToolOutcome::Clarification { .. }));
        assert_eq!(images.calls(), 0);
        assert_eq!(messenger.sent(), vec![Sent::Text(TomUser::James, CLARIFICATION_MESSAGE.to_string())]);
    }

    #[tokio::test]
    async fn remote_image_is_sent_as_image() {
        let messenger = Arc::new(RecordingMessenger::default());
        let out = tool(FakeImages::ok("https://img/1.png"), messenger.clone())
            .handle(TomUser::James, "silent ball with a foam shell and soft material core")
            .await
            .unwrap();
        let ToolOutcome::Success(s) = out else { panic!("expected success") };
        assert_eq!(s.image_url.as_deref(), Some("https://img/1.png"));

        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        let Sent::Image(user, url, caption) = &sent[0] else { panic!("expected image") };
        assert_eq!(*user, TomUser::James);
        assert_eq!(url, "https://img/1.png");
        assert!(caption.contains("Based on: \"silent ball"));
    }

    #[tokio::test]
    async fn inline_image_sends_processing_text() {
        let messenger = Arc::new(RecordingMessenger::default());
        let out = tool(FakeImages::ok("data:image/png;base64,AAAA"), messenger.clone())
            .handle(TomUser::James, "a ball with a soft material shell")
            .await
            .unwrap();
        assert_eq!(out.kind(), "success");
        let Sent::Text(_, text) = &messenger.sent()[0] else { panic!("expected text") };
        assert!(text.contains("processing"));
    }

    #[tokio::test]
    async fn generation_failure_apologizes() {
        let messenger = Arc::new(RecordingMessenger::default());
        let out = tool(FakeImages::failing(), messenger.clone())
            .handle(TomUser::James, "a ball with a soft material shell")
            .await
            .unwrap();
        assert_eq!(out.kind(), "error");
        let Sent::Text(_, text) = &messenger.sent()[0] else { panic!("expected text") };
        assert!(text.starts_with("⚠️ Couldn't generate the sketch"));
    }

    #[tokio::test]
    async fn undeliverable_clarification_is_an_err() {
        let messenger = Arc::new(RecordingMessenger::failing());
        let result = tool(FakeImages::ok("https://img"), messenger)
            .handle(TomUser::James, "a ball")
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn gemini_inline_data_becomes_data_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash-exp:generateContent")
            .match_header("x-goog-api-key", "g-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"here"},{"inlineData":{"mimeType":"image/png","data":"QUJD"}}]}}]}"#,
            )
            .create_async()
            .await;

        let g = GeminiImageGenerator::new(Some("g-key".into()), Duration::from_secs(5))
            .unwrap()
            .with_base_url(&server.url());
        let img = g.generate("grip trainer", VizStyle::Sketch).await.unwrap();
        assert_eq!(img.image_url, "data:image/png;base64,QUJD");
        assert!(img.revised_prompt.starts_with("2D product concept sketch"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn gemini_without_image_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"no can do"}]}}]}"#)
            .create_async()
            .await;

        let g = GeminiImageGenerator::new(Some("k".into()), Duration::from_secs(5))
            .unwrap()
            .with_base_url(&server.url());
        let err = g.generate("x", VizStyle::Sketch).await.unwrap_err();
        assert!(matches!(err, TomError::Generation(_)));
    }
}
