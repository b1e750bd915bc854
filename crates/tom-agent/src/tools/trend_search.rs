use super::{apologize, ToolHandler, ToolOutcome, ToolSuccess};
use crate::messaging::Messenger;
use crate::{Result, TomError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use yp_core::{Intent, TomUser};

pub const PERPLEXITY_API_URL: &str = "https://api.perplexity.ai";
const PERPLEXITY_MODEL: &str = "llama-3.1-sonar-large-128k-online";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendCategory {
    Nba,
    YouthSports,
    BasketballSkills,
    General,
}

impl TrendCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendCategory::Nba => "nba",
            TrendCategory::YouthSports => "youth_sports",
            TrendCategory::BasketballSkills => "basketball_skills",
            TrendCategory::General => "general",
        }
    }

    /// Human form, e.g. "youth sports".
    pub fn label(self) -> String {
        self.as_str().replace('_', " ")
    }

    fn focus(self) -> &'static str {
        match self {
            TrendCategory::Nba => "NBA news, player performances, trade rumors, and viral moments from the last 48 hours",
            TrendCategory::YouthSports => "Youth basketball training trends, parent concerns, youth development news",
            TrendCategory::BasketballSkills => "Basketball skill development trends, training techniques going viral, shooting form discussions",
            TrendCategory::General => "Sports performance, athletic training, and fitness trends",
        }
    }
}

static CATEGORY_RES: OnceLock<Vec<(Regex, TrendCategory)>> = OnceLock::new();

/// First matching keyword group wins; no match means NBA.
pub fn category_for(message: &str) -> TrendCategory {
    let table = CATEGORY_RES.get_or_init(|| {
        [
            (r"(?i)youth|kids|young|aau", TrendCategory::YouthSports),
            (r"(?i)skills?|training|drill|technique", TrendCategory::BasketballSkills),
            (r"(?i)general|fitness|performance", TrendCategory::General),
        ]
        .into_iter()
        .map(|(src, cat)| (Regex::new(src).unwrap(), cat))
        .collect()
    });
    table
        .iter()
        .find(|(re, _)| re.is_match(message))
        .map(|(_, cat)| *cat)
        .unwrap_or(TrendCategory::Nba)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingTopic {
    pub title: String,
    pub why_trending: String,
    pub content_angle: String,
    /// 🔴 now, 🟡 this week, 🟢 evergreen.
    pub urgency: String,
}

#[async_trait::async_trait]
pub trait TrendSource: Send + Sync {
    async fn search(&self, category: TrendCategory) -> Result<Vec<TrendingTopic>>;
}

pub fn format_trends(trends: &[TrendingTopic]) -> String {
    trends
        .iter()
        .enumerate()
        .map(|(i, t)| {
            format!(
                "{}. {} *{}*\n_{}_\n💡 {}",
                i + 1,
                t.urgency,
                t.title,
                t.why_trending,
                t.content_angle
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ─── Handler ──────────────────────────────────────────────────────────────

pub struct TrendSearchTool {
    source: Arc<dyn TrendSource>,
    messenger: Arc<dyn Messenger>,
}

impl TrendSearchTool {
    pub fn new(source: Arc<dyn TrendSource>, messenger: Arc<dyn Messenger>) -> Self {
        Self { source, messenger }
    }
}

#[async_trait::async_trait]
impl ToolHandler for TrendSearchTool {
    fn intent(&self) -> Intent {
        Intent::TrendSearch
    }

    async fn handle(&self, user: TomUser, message: &str) -> Result<ToolOutcome> {
        let category = category_for(message);

        let trends = match self.source.search(category).await {
            Ok(t) => t,
            Err(e) => {
                let apology = "⚠️ Error searching trends. Try again later.";
                return Ok(apologize(self.messenger.as_ref(), user, "trend_search", apology, &e).await);
            }
        };

        if trends.is_empty() {
            let apology = "⚠️ Couldn't find trending topics right now. Try again in a few minutes.";
            let e = TomError::Generation("No trends found".to_string());
            return Ok(apologize(self.messenger.as_ref(), user, "trend_search", apology, &e).await);
        }

        let text = format!(
            "🏀 *TRENDING IN {}*\n\n{}\n\n_Reply with a number to get a full content brief._",
            category.label().to_uppercase(),
            format_trends(&trends)
        );
        if let Err(e) = self.messenger.send_text(user, &text).await {
            let apology = "⚠️ Error searching trends. Try again later.";
            return Ok(apologize(self.messenger.as_ref(), user, "trend_search", apology, &e).await);
        }

        Ok(ToolOutcome::Success(ToolSuccess {
            trends,
            ..Default::default()
        }))
    }
}

// ─── Perplexity ───────────────────────────────────────────────────────────

pub struct PerplexityTrendSource {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl PerplexityTrendSource {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: PERPLEXITY_API_URL.to_string(),
            api_key,
        })
    }

    pub fn from_env(timeout: Duration) -> Result<Self> {
        Self::new(
            std::env::var("PERPLEXITY_API_KEY").ok().filter(|k| !k.is_empty()),
            timeout,
        )
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

fn system_prompt(category: TrendCategory) -> String {
    format!(
        "You are a sports media trend analyst. Find current trending topics related to: {}

Return EXACTLY 3-5 topics in this JSON format:
[{{\"title\": \"...\", \"whyTrending\": \"...\", \"contentAngle\": \"...\", \"urgency\": \"🔴|🟡|🟢\"}}]

Urgency levels:
🔴 = Hot NOW (last 24 hours) - post immediately
🟡 = This week - good to cover soon
🟢 = Evergreen - can cover anytime

Focus on topics that Adam Harrington (NBA skills trainer, Global Director of Basketball) can create content about.
Content angles should be specific: \"60-second breakdown\", \"myth-busting\", \"tutorial\", \"reaction\", etc.",
        category.focus()
    )
}

static ARRAY_RE: OnceLock<Regex> = OnceLock::new();

/// Pull the first JSON array out of free-form model text.
fn parse_trend_list(content: &str) -> Result<Vec<TrendingTopic>> {
    let re = ARRAY_RE.get_or_init(|| Regex::new(r"(?s)\[.*\]").unwrap());
    let m = re
        .find(content)
        .ok_or_else(|| TomError::Generation("reply contained no trend list".to_string()))?;
    Ok(serde_json::from_str(m.as_str())?)
}

#[async_trait::async_trait]
impl TrendSource for PerplexityTrendSource {
    async fn search(&self, category: TrendCategory) -> Result<Vec<TrendingTopic>> {
        let Some(key) = self.api_key.as_deref() else {
            tracing::warn!(category = category.as_str(), "PERPLEXITY_API_KEY not configured, using canned trends");
            return Ok(canned_trends(category));
        };

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(key)
            .json(&json!({
                "model": PERPLEXITY_MODEL,
                "messages": [
                    { "role": "system", "content": system_prompt(category) },
                    {
                        "role": "user",
                        "content": format!(
                            "What's trending in {} right now that a basketball skills trainer should know about?",
                            category.label()
                        )
                    }
                ]
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
        let content = reply["choices"][0]["message"]["content"].as_str().unwrap_or("");
        parse_trend_list(content)
    }
}

fn topic(title: &str, why: &str, angle: &str, urgency: &str) -> TrendingTopic {
    TrendingTopic {
        title: title.to_string(),
        why_trending: why.to_string(),
        content_angle: angle.to_string(),
        urgency: urgency.to_string(),
    }
}

/// Offline stand-ins used when no search key is configured.
pub fn canned_trends(category: TrendCategory) -> Vec<TrendingTopic> {
    match category {
        TrendCategory::Nba => vec![
            topic(
                "Wemby's Block Party",
                "Victor Wembanyama had 6 blocks in last night's game, social media exploding",
                "60-second breakdown of his timing and positioning techniques",
                "🔴",
            ),
            topic(
                "Steph's Practice Routine",
                "New training footage released showing Curry's warmup",
                "Recreate and explain for youth players - 'Curry Warmup Challenge'",
                "🟡",
            ),
        ],
        TrendCategory::YouthSports => vec![topic(
            "AAU Season Prep",
            "Spring AAU season starting, parents searching for prep tips",
            "5-week pre-season conditioning plan for 12-14 year olds",
            "🟡",
        )],
        TrendCategory::BasketballSkills => vec![topic(
            "Euro Step Debate",
            "Discussion about legal vs travel on social media",
            "Clear rules breakdown + practice drill",
            "🟢",
        )],
        TrendCategory::General => vec![topic(
            "Sleep & Performance",
            "New study on sleep impact on reaction time in athletes",
            "Key findings + practical sleep tips for young athletes",
            "🟢",
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FakeTrends, RecordingMessenger, Sent};

    #[test]
    fn categories() {
        assert_eq!(category_for("what's trending with AAU kids"), TrendCategory::YouthSports);
        assert_eq!(category_for("any viral shooting drill?"), TrendCategory::BasketballSkills);
        assert_eq!(category_for("fitness trends"), TrendCategory::General);
        assert_eq!(category_for("what's trending"), TrendCategory::Nba);
        // youth beats skills
        assert_eq!(category_for("youth skills trending"), TrendCategory::YouthSports);
    }

    #[test]
    fn formats_numbered_list() {
        let text = format_trends(&canned_trends(TrendCategory::Nba));
        assert!(text.starts_with("1. 🔴 *Wemby's Block Party*\n_Victor"));
        assert!(text.contains("\n\n2. 🟡 *Steph's Practice Routine*"));
    }

    #[test]
    fn parses_array_inside_prose() {
        let content = r#"Here you go:
[{"title":"A","whyTrending":"B","contentAngle":"C","urgency":"🟢"}]
Hope that helps."#;
        let trends = parse_trend_list(content).unwrap();
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].content_angle, "C");
        assert!(parse_trend_list("nothing here").is_err());
    }

    #[tokio::test]
    async fn success_sends_formatted_trends() {
        let messenger = Arc::new(RecordingMessenger::default());
        let tool = TrendSearchTool::new(Arc::new(FakeTrends::canned()), messenger.clone());
        let out = tool.handle(TomUser::Adam, "what's trending with AAU kids").await.unwrap();

        let ToolOutcome::Success(s) = out else { panic!("expected success") };
        assert_eq!(s.trends, canned_trends(TrendCategory::YouthSports));
        let Sent::Text(user, text) = &messenger.sent()[0] else { panic!("expected text") };
        assert_eq!(*user, TomUser::Adam);
        assert!(text.starts_with("🏀 *TRENDING IN YOUTH SPORTS*"));
        assert!(text.ends_with("_Reply with a number to get a full content brief._"));
    }

    #[tokio::test]
    async fn empty_result_apologizes() {
        let messenger = Arc::new(RecordingMessenger::default());
        let tool = TrendSearchTool::new(Arc::new(FakeTrends::empty()), messenger.clone());
        let out = tool.handle(TomUser::Adam, "trending").await.unwrap();
        assert_eq!(out, ToolOutcome::Error { message: "generation failed: No trends found".into() });
        let Sent::Text(_, text) = &messenger.sent()[0] else { panic!("expected text") };
        assert!(text.contains("Couldn't find trending topics"));
    }

    #[tokio::test]
    async fn source_failure_apologizes() {
        let messenger = Arc::new(RecordingMessenger::default());
        let tool = TrendSearchTool::new(Arc::new(FakeTrends::failing()), messenger.clone());
        let out = tool.handle(TomUser::Adam, "trending").await.unwrap();
        assert_eq!(out.kind(), "error");
        assert_eq!(messenger.sent().len(), 1);
    }

    #[tokio::test]
    async fn unconfigured_perplexity_uses_canned_trends() {
        let source = PerplexityTrendSource::new(None, Duration::from_secs(1)).unwrap();
        let trends = source.search(TrendCategory::General).await.unwrap();
        assert_eq!(trends[0].title, "Sleep & Performance");
    }

    #[tokio::test]
    async fn perplexity_reply_is_parsed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer p-key")
            .match_body(mockito::Matcher::PartialJson(json!({ "model": PERPLEXITY_MODEL })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "choices": [{ "message": { "content":
                        "[{\"title\":\"T\",\"whyTrending\":\"W\",\"contentAngle\":\"A\",\"urgency\":\"🔴\"}]"
                    }}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let source = PerplexityTrendSource::new(Some("p-key".into()), Duration::from_secs(5))
            .unwrap()
            .with_base_url(&server.url());
        let trends = source.search(TrendCategory::Nba).await.unwrap();
        assert_eq!(trends, vec![topic("T", "W", "A", "🔴")]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn perplexity_error_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .create_async()
            .await;
        let source = PerplexityTrendSource::new(Some("bad".into()), Duration::from_secs(5))
            .unwrap()
            .with_base_url(&server.url());
        assert!(matches!(
            source.search(TrendCategory::Nba).await,
            Err(TomError::Upstream { status: 401, .. })
        ));
    }
}
