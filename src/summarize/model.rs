//! Summarization-model capability: availability + respond, plus the small
//! wrappers the app composes around a concrete provider.

use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::Serialize;

/// Whether the model can be called right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum Availability {
    Available,
    Unavailable(UnavailableReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// This installation cannot run the model at all (e.g. no credentials).
    DeviceNotEligible,
    /// Turned off in configuration.
    FeatureDisabled,
    /// Still downloading or warming up.
    ModelNotReady,
    Other(String),
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::DeviceNotEligible => f.write_str("device not eligible"),
            UnavailableReason::FeatureDisabled => f.write_str("feature disabled"),
            UnavailableReason::ModelNotReady => f.write_str("model not ready"),
            UnavailableReason::Other(why) => write!(f, "other: {why}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Request(String),
    #[error("model returned HTTP status {0}")]
    Status(u16),
    #[error("model returned no content")]
    EmptyResponse,
    #[error("model invocation failed: {0}")]
    Invocation(String),
}

#[async_trait]
pub trait SummaryModel: Send + Sync {
    fn availability(&self) -> Availability;

    /// One call: `instructions` as the system role, `prompt` as the user text.
    async fn respond(&self, instructions: &str, prompt: &str) -> Result<String, ModelError>;

    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

pub type DynSummaryModel = Arc<dyn SummaryModel>;

/// Used when summarization is turned off.
#[derive(Debug, Clone, Default)]
pub struct DisabledModel;

#[async_trait]
impl SummaryModel for DisabledModel {
    fn availability(&self) -> Availability {
        Availability::Unavailable(UnavailableReason::FeatureDisabled)
    }

    async fn respond(&self, _instructions: &str, _prompt: &str) -> Result<String, ModelError> {
        Err(ModelError::Invocation("summarization is disabled".to_string()))
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Deterministic model for local runs (`MOOD_MODEL_MODE=mock`).
#[derive(Debug, Clone)]
pub struct MockModel {
    pub fixed: String,
}

#[async_trait]
impl SummaryModel for MockModel {
    fn availability(&self) -> Availability {
        Availability::Available
    }

    async fn respond(&self, _instructions: &str, _prompt: &str) -> Result<String, ModelError> {
        Ok(self.fixed.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

// ------------------------------------------------------------
// Daily call budget
// ------------------------------------------------------------

#[derive(Debug, Clone)]
struct DailyCounter {
    date: NaiveDate,
    count: u32,
}

impl DailyCounter {
    fn today() -> Self {
        Self {
            date: Utc::now().date_naive(),
            count: 0,
        }
    }

    fn roll_over(&mut self) {
        let today = Utc::now().date_naive();
        if self.date != today {
            self.date = today;
            self.count = 0;
        }
    }
}

/// Caps successful model calls per UTC day. Slots are reserved before the
/// call and returned when it fails. Once spent, the model reports
/// itself unavailable until the date rolls over.
pub struct DailyLimit<M> {
    inner: M,
    max: u32,
    counter: Mutex<DailyCounter>,
}

impl<M: SummaryModel> DailyLimit<M> {
    pub fn new(inner: M, max: u32) -> Self {
        Self {
            inner,
            max,
            counter: Mutex::new(DailyCounter::today()),
        }
    }

    /// Claim one call from today's budget before the call starts, so
    /// concurrent callers cannot overshoot `max`.
    fn reserve(&self) -> Result<NaiveDate, ModelError> {
        let mut g = self.counter.lock().expect("daily limit mutex poisoned");
        g.roll_over();
        if g.count >= self.max {
            return Err(ModelError::Invocation("daily limit reached".to_string()));
        }
        g.count += 1;
        Ok(g.date)
    }

    /// Give back a slot whose call failed. A slot from a previous day is gone.
    fn release(&self, reserved_on: NaiveDate) {
        let mut g = self.counter.lock().expect("daily limit mutex poisoned");
        g.roll_over();
        if g.date == reserved_on {
            g.count = g.count.saturating_sub(1);
        }
    }

    pub fn used_today(&self) -> u32 {
        let mut g = self.counter.lock().expect("daily limit mutex poisoned");
        g.roll_over();
        g.count
    }
}

#[async_trait]
impl<M: SummaryModel> SummaryModel for DailyLimit<M> {
    fn availability(&self) -> Availability {
        match self.inner.availability() {
            Availability::Available if self.used_today() >= self.max => {
                Availability::Unavailable(UnavailableReason::Other(
                    "daily limit reached".to_string(),
                ))
            }
            other => other,
        }
    }

    async fn respond(&self, instructions: &str, prompt: &str) -> Result<String, ModelError> {
        let reserved_on = self.reserve()?;
        let out = self.inner.respond(instructions, prompt).await;
        if out.is_err() {
            self.release(reserved_on);
        }
        out
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

// ------------------------------------------------------------
// Sanitization
// ------------------------------------------------------------

/// Longest summary we keep from a model, in chars.
pub const MAX_SUMMARY_CHARS: usize = 240;

/// Single line, collapsed whitespace, at most [`MAX_SUMMARY_CHARS`] chars.
pub fn sanitize_response(input: &str) -> String {
    let mut out = String::with_capacity(input.len().min(MAX_SUMMARY_CHARS * 4));
    let mut chars = 0usize;
    let mut prev_space = false;
    for ch in input.chars() {
        if chars >= MAX_SUMMARY_CHARS {
            break;
        }
        if ch.is_whitespace() {
            if !prev_space && !out.is_empty() {
                out.push(' ');
                chars += 1;
            }
            prev_space = true;
        } else if !ch.is_control() {
            out.push(ch);
            chars += 1;
            prev_space = false;
        }
    }
    out.trim_end().to_string()
}
