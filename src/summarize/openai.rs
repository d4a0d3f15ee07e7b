//! OpenAI chat-completions backed summary model.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::model::{Availability, ModelError, SummaryModel, UnavailableReason};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

pub struct OpenAiModel {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl OpenAiModel {
    /// `api_key = None` keeps the model permanently unavailable
    /// (`DeviceNotEligible`) instead of failing at startup.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("mood-journal/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ModelError::Request(e.to_string()))?;
        Ok(Self {
            http,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        })
    }

    /// Point at a compatible endpoint (proxies, local gateways, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct Req<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct Resp {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMsg,
}

#[derive(Deserialize)]
struct ChoiceMsg {
    content: Option<String>,
}

#[async_trait]
impl SummaryModel for OpenAiModel {
    fn availability(&self) -> Availability {
        if self.api_key.is_some() {
            Availability::Available
        } else {
            Availability::Unavailable(UnavailableReason::DeviceNotEligible)
        }
    }

    async fn respond(&self, instructions: &str, prompt: &str) -> Result<String, ModelError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ModelError::Invocation("no API key configured".to_string()));
        };

        let req = Req {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: instructions,
                },
                Msg {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.3,
            max_tokens: 80,
        };

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&req)
            .send()
            .await
            .map_err(|e| ModelError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ModelError::Status(status.as_u16()));
        }

        let body: Resp = resp
            .json()
            .await
            .map_err(|e| ModelError::Request(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ModelError::EmptyResponse)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
