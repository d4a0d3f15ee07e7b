// tests/summarizer_fallback.rs
//
// The summarizer never fails outward: every unavailable variant, every
// invocation error, timeouts and blank answers all end in the local summary.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mood_journal::summarize::instructions::{INSTRUCTIONS_EN, INSTRUCTIONS_IT};
use mood_journal::summarize::{
    summarize_locally, Availability, FallbackCause, ModelError, Summarizer, SummaryModel,
    SummarySource, UnavailableReason,
};

const TEXT: &str = "Long walk by the sea this morning. Then a quiet evening at home.";

/// Test double: fixed availability, scripted answer, records every call.
struct Scripted {
    availability: Availability,
    answer: Answer,
    calls: AtomicUsize,
    seen_instructions: Mutex<Vec<String>>,
}

enum Answer {
    Text(&'static str),
    Fail,
    Hang,
}

impl Scripted {
    fn new(availability: Availability, answer: Answer) -> Arc<Self> {
        Arc::new(Self {
            availability,
            answer,
            calls: AtomicUsize::new(0),
            seen_instructions: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SummaryModel for Scripted {
    fn availability(&self) -> Availability {
        self.availability.clone()
    }

    async fn respond(&self, instructions: &str, _prompt: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_instructions
            .lock()
            .unwrap()
            .push(instructions.to_string());
        match self.answer {
            Answer::Text(t) => Ok(t.to_string()),
            Answer::Fail => Err(ModelError::Invocation("session crashed".into())),
            Answer::Hang => std::future::pending().await,
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

#[tokio::test]
async fn every_unavailable_variant_uses_local_summary_without_calling_model() {
    let reasons = [
        UnavailableReason::DeviceNotEligible,
        UnavailableReason::FeatureDisabled,
        UnavailableReason::ModelNotReady,
        UnavailableReason::Other("quota".into()),
    ];
    for reason in reasons {
        let model = Scripted::new(Availability::Unavailable(reason.clone()), Answer::Text("nope"));
        let s = Summarizer::new(model.clone());

        let out = s.summarize_detailed(TEXT).await;
        assert_eq!(out.text, summarize_locally(TEXT));
        assert_eq!(
            out.source,
            SummarySource::Fallback {
                cause: FallbackCause::Unavailable(reason)
            }
        );
        assert_eq!(model.calls(), 0);
    }
}

#[tokio::test]
async fn available_model_answer_is_returned() {
    let model = Scripted::new(
        Availability::Available,
        Answer::Text("I walked by the sea and rested at home."),
    );
    let s = Summarizer::new(model.clone());
    let out = s.summarize_detailed(TEXT).await;
    assert_eq!(out.text, "I walked by the sea and rested at home.");
    assert_eq!(out.source, SummarySource::Model { provider: "scripted" });
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn failing_model_falls_back_and_does_not_propagate() {
    let model = Scripted::new(Availability::Available, Answer::Fail);
    let s = Summarizer::new(model.clone());
    assert_eq!(s.summarize(TEXT).await, summarize_locally(TEXT));
    let out = s.summarize_detailed(TEXT).await;
    assert_eq!(
        out.source,
        SummarySource::Fallback {
            cause: FallbackCause::Failed
        }
    );
}

#[tokio::test]
async fn hanging_model_times_out_into_fallback() {
    let model = Scripted::new(Availability::Available, Answer::Hang);
    let s = Summarizer::new(model.clone()).with_timeout(Duration::from_millis(50));
    let out = s.summarize_detailed(TEXT).await;
    assert_eq!(out.text, "Long walk by the sea this morning.");
    assert_eq!(
        out.source,
        SummarySource::Fallback {
            cause: FallbackCause::TimedOut
        }
    );
}

#[tokio::test]
async fn blank_model_answer_counts_as_failure() {
    let model = Scripted::new(Availability::Available, Answer::Text(" \n\t "));
    let s = Summarizer::new(model);
    let out = s.summarize_detailed(TEXT).await;
    assert_eq!(out.text, summarize_locally(TEXT));
    assert!(out.is_fallback());
}

#[tokio::test]
async fn model_answer_is_flattened_to_one_line() {
    let model = Scripted::new(
        Availability::Available,
        Answer::Text("  I slept well\nand woke up rested.  "),
    );
    let s = Summarizer::new(model);
    assert_eq!(s.summarize(TEXT).await, "I slept well and woke up rested.");
}

#[tokio::test]
async fn empty_input_skips_the_model() {
    let model = Scripted::new(Availability::Available, Answer::Text("should not be used"));
    let s = Summarizer::new(model.clone());
    assert_eq!(s.summarize("   ").await, "");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn instructions_follow_detected_language() {
    let model = Scripted::new(Availability::Available, Answer::Text("ok"));
    let s = Summarizer::new(model.clone());

    s.summarize("Oggi sono stata al mare con la mia famiglia e mi sono rilassata.")
        .await;
    s.summarize("Today I went to the market and it was busy.").await;
    // Neither English nor Italian: English template.
    s.summarize("Heute war ein ruhiger Tag").await;

    let seen = model.seen_instructions.lock().unwrap().clone();
    assert_eq!(seen, vec![INSTRUCTIONS_IT, INSTRUCTIONS_EN, INSTRUCTIONS_EN]);
}
