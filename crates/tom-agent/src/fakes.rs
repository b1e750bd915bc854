//! In-memory collaborators for handler and router tests.

use crate::generation::{GenerationRequest, StructuredGenerator};
use crate::messaging::Messenger;
use crate::tools::product_viz::{GeneratedImage, ImageGenerator, VizStyle};
use crate::tools::trend_search::{canned_trends, TrendCategory, TrendSource, TrendingTopic};
use crate::{Result, TomError};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use yp_core::TomUser;

/// Replies with a fixed value, or fails every call.
pub struct ScriptedGenerator {
    reply: Option<Value>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn replying(reply: Value) -> Self {
        Self {
            reply: Some(reply),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl StructuredGenerator for ScriptedGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request);
        self.reply
            .clone()
            .ok_or_else(|| TomError::Generation("scripted failure".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text(TomUser, String),
    Image(TomUser, String, String),
}

#[derive(Default)]
pub struct RecordingMessenger {
    fail: bool,
    sent: Mutex<Vec<Sent>>,
}

impl RecordingMessenger {
    /// Every send fails and nothing is recorded.
    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, msg: Sent) -> Result<()> {
        if self.fail {
            return Err(TomError::Messaging("recording messenger set to fail".to_string()));
        }
        self.sent.lock().unwrap().push(msg);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, user: TomUser, text: &str) -> Result<()> {
        self.record(Sent::Text(user, text.to_string()))
    }

    async fn send_image(&self, user: TomUser, image_url: &str, caption: &str) -> Result<()> {
        self.record(Sent::Image(user, image_url.to_string(), caption.to_string()))
    }
}

/// Clones share the call counter.
#[derive(Clone)]
pub struct FakeImages {
    url: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl FakeImages {
    pub fn ok(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            url: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ImageGenerator for FakeImages {
    async fn generate(&self, description: &str, style: VizStyle) -> Result<GeneratedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let url = self
            .url
            .clone()
            .ok_or_else(|| TomError::Generation("No image generated".to_string()))?;
        Ok(GeneratedImage {
            image_url: url,
            revised_prompt: crate::tools::product_viz::full_prompt(description, style),
        })
    }
}

pub enum FakeTrends {
    Canned,
    Empty,
    Failing,
}

impl FakeTrends {
    pub fn canned() -> Self {
        FakeTrends::Canned
    }

    pub fn empty() -> Self {
        FakeTrends::Empty
    }

    pub fn failing() -> Self {
        FakeTrends::Failing
    }
}

#[async_trait::async_trait]
impl TrendSource for FakeTrends {
    async fn search(&self, category: TrendCategory) -> Result<Vec<TrendingTopic>> {
        match self {
            FakeTrends::Canned => Ok(canned_trends(category)),
            FakeTrends::Empty => Ok(Vec::new()),
            FakeTrends::Failing => Err(TomError::Upstream {
                status: 500,
                body: "down".to_string(),
            }),
        }
    }
}
