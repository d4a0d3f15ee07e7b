// src/config/model.rs
use serde::{Deserialize, Serialize};
use std::{env, time::Duration};

use crate::summarize::openai::DEFAULT_OPENAI_MODEL;

pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

fn default_provider() -> String {
    "openai".to_string()
}
fn default_api_key() -> String {
    "ENV".to_string()
}
fn default_model() -> String {
    DEFAULT_OPENAI_MODEL.to_string()
}
fn default_daily_limit() -> u32 {
    20
}
fn default_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Only "openai" is wired up (case-insensitive).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// "ENV" means: read from `OPENAI_API_KEY`.
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Override for OpenAI-compatible gateways.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_provider(),
            api_key: default_api_key(),
            model: default_model(),
            daily_limit: default_daily_limit(),
            timeout_secs: default_timeout_secs(),
            base_url: None,
        }
    }
}

impl ModelConfig {
    /// Normalize provider and replace unusable numbers with defaults.
    pub fn sanitize(&mut self) {
        self.provider = self.provider.trim().to_lowercase();
        if self.daily_limit == 0 {
            self.daily_limit = default_daily_limit();
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = default_timeout_secs();
        }
        if self.model.trim().is_empty() {
            self.model = default_model();
        }
    }

    /// The key to call the provider with, if any. A missing env var is not an
    /// error here; the model just reports itself unavailable.
    pub fn resolved_api_key(&self) -> Option<String> {
        let raw = self.api_key.trim();
        if raw.eq_ignore_ascii_case("env") {
            env::var(ENV_OPENAI_API_KEY)
                .ok()
                .filter(|k| !k.trim().is_empty())
        } else if raw.is_empty() {
            None
        } else {
            Some(raw.to_string())
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
