// src/summarize/mod.rs
//! Two-tier summarization: a language-aware model call when the model is
//! available, the local condenser otherwise. `Summarizer::summarize` never
//! fails; every model problem ends in the fallback.

pub mod fallback;
pub mod instructions;
pub mod model;
pub mod openai;

use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ModelConfig;
use crate::language::{LanguageDetector, StopwordDetector};
use crate::logging::anon_id;

pub use fallback::summarize_locally;
pub use instructions::instructions_for;
pub use model::{
    sanitize_response, Availability, DailyLimit, DisabledModel, DynSummaryModel, MockModel,
    ModelError, SummaryModel, UnavailableReason,
};
pub use openai::OpenAiModel;

/// Upper bound on a single model call.
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(15);

/// Which tier produced a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum SummarySource {
    Model { provider: &'static str },
    Fallback { cause: FallbackCause },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackCause {
    EmptyInput,
    Unavailable(UnavailableReason),
    Failed,
    TimedOut,
    EmptyResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub text: String,
    pub source: SummarySource,
}

impl Summary {
    fn fallback(text: &str, cause: FallbackCause) -> Self {
        counter!("summaries_total", "source" => "fallback").increment(1);
        Self {
            text: summarize_locally(text),
            source: SummarySource::Fallback { cause },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, SummarySource::Fallback { .. })
    }
}

pub struct Summarizer {
    model: DynSummaryModel,
    detector: Arc<dyn LanguageDetector>,
    timeout: Duration,
}

impl Summarizer {
    pub fn new(model: DynSummaryModel) -> Self {
        Self {
            model,
            detector: Arc::new(StopwordDetector),
            timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }

    pub fn with_detector(mut self, detector: Arc<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    pub fn availability(&self) -> Availability {
        self.model.availability()
    }

    /// Summary string only.
    pub async fn summarize(&self, text: &str) -> String {
        self.summarize_detailed(text).await.text
    }

    /// Summary plus the tier that produced it.
    pub async fn summarize_detailed(&self, text: &str) -> Summary {
        let id = anon_id(text);

        if text.trim().is_empty() {
            return Summary::fallback(text, FallbackCause::EmptyInput);
        }

        let language = self.detector.detect(text);
        let instructions = instructions_for(language);

        if let Availability::Unavailable(reason) = self.model.availability() {
            debug!(%id, provider = self.model.name(), %reason, "model unavailable, using local summary");
            return Summary::fallback(text, FallbackCause::Unavailable(reason));
        }

        let started = Instant::now();
        let outcome = tokio::time::timeout(self.timeout, self.model.respond(instructions, text)).await;
        histogram!("summary_model_ms").record(started.elapsed().as_secs_f64() * 1000.0);

        match outcome {
            Ok(Ok(raw)) => {
                let cleaned = sanitize_response(&raw);
                if cleaned.is_empty() {
                    warn!(%id, provider = self.model.name(), "model returned an empty summary");
                    return Summary::fallback(text, FallbackCause::EmptyResponse);
                }
                counter!("summaries_total", "source" => "model").increment(1);
                info!(
                    %id,
                    provider = self.model.name(),
                    lang = language.map(|l| l.tag()).unwrap_or("und"),
                    "model summary ready"
                );
                Summary {
                    text: cleaned,
                    source: SummarySource::Model {
                        provider: self.model.name(),
                    },
                }
            }
            Ok(Err(e)) => {
                warn!(%id, provider = self.model.name(), error = %e, "model call failed, using local summary");
                Summary::fallback(text, FallbackCause::Failed)
            }
            Err(_) => {
                warn!(
                    %id,
                    provider = self.model.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "model call timed out, using local summary"
                );
                Summary::fallback(text, FallbackCause::TimedOut)
            }
        }
    }
}

/// Build the model chain from configuration.
///
/// * `MOOD_MODEL_MODE=mock` → deterministic mock (still daily-limited).
/// * `enabled = false` → [`DisabledModel`].
/// * `provider = "openai"` → [`OpenAiModel`] behind a [`DailyLimit`].
pub fn build_model_from_config(cfg: &ModelConfig) -> Result<DynSummaryModel, ModelError> {
    if std::env::var("MOOD_MODEL_MODE")
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        let mock = MockModel {
            fixed: "I wrote about my day (mock summary).".to_string(),
        };
        return Ok(Arc::new(DailyLimit::new(mock, cfg.daily_limit)));
    }

    if !cfg.enabled {
        return Ok(Arc::new(DisabledModel));
    }

    match cfg.provider.as_str() {
        "openai" => {
            let mut provider = OpenAiModel::new(cfg.resolved_api_key(), cfg.model.clone())?;
            if let Some(url) = cfg.base_url.as_deref() {
                provider = provider.with_base_url(url);
            }
            Ok(Arc::new(DailyLimit::new(provider, cfg.daily_limit)))
        }
        other => {
            warn!(provider = other, "unknown summary provider, summaries stay local");
            Ok(Arc::new(DisabledModel))
        }
    }
}
