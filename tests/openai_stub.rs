// tests/openai_stub.rs
//
// OpenAiModel against a local chat-completions stub: request shape, bearer
// auth, and status errors ending in the local summary.

use std::sync::{Arc, Mutex};

use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use mood_journal::summarize::{
    summarize_locally, FallbackCause, ModelError, OpenAiModel, Summarizer, SummaryModel,
    SummarySource,
};

#[derive(Clone, Default)]
struct Seen {
    auth: Arc<Mutex<Option<String>>>,
    body: Arc<Mutex<Option<Value>>>,
}

/// Spawn the stub on an ephemeral port and return its base URL.
async fn spawn_stub(status: StatusCode, seen: Seen) -> String {
    let app = Router::new()
        .route(
            "/v1/chat/completions",
            post(
                move |State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    *seen.auth.lock().unwrap() = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    *seen.body.lock().unwrap() = Some(body);
                    let reply = json!({
                        "choices": [
                            { "message": { "role": "assistant", "content": " I rested by the lake.\n" } }
                        ]
                    });
                    (status, Json(reply))
                },
            ),
        )
        .with_state(seen);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });
    format!("http://{addr}/v1")
}

#[tokio::test]
async fn sends_bearer_key_and_system_instructions() {
    let seen = Seen::default();
    let base = spawn_stub(StatusCode::OK, seen.clone()).await;
    let model = OpenAiModel::new(Some("sk-test".into()), "gpt-4o-mini")
        .expect("client")
        .with_base_url(base);

    let answer = model
        .respond("Summarize briefly.", "A slow morning by the lake.")
        .await
        .expect("answer");
    assert_eq!(answer, " I rested by the lake.\n");

    assert_eq!(seen.auth.lock().unwrap().as_deref(), Some("Bearer sk-test"));
    let body = seen.body.lock().unwrap().clone().expect("request body");
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "Summarize briefly.");
    assert_eq!(body["messages"][1]["content"], "A slow morning by the lake.");
}

#[tokio::test]
async fn summarizer_cleans_up_the_model_answer() {
    let base = spawn_stub(StatusCode::OK, Seen::default()).await;
    let model = OpenAiModel::new(Some("sk-test".into()), "gpt-4o-mini")
        .expect("client")
        .with_base_url(base);
    let s = Summarizer::new(Arc::new(model));

    let out = s.summarize_detailed("A slow morning by the lake.").await;
    assert_eq!(out.text, "I rested by the lake.");
    assert_eq!(out.source, SummarySource::Model { provider: "openai" });
}

#[tokio::test]
async fn server_error_is_a_status_error_and_falls_back() {
    let base = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, Seen::default()).await;
    let model = OpenAiModel::new(Some("sk-test".into()), "gpt-4o-mini")
        .expect("client")
        .with_base_url(base.clone());

    let err = model.respond("x", "y").await.expect_err("500 must fail");
    assert!(matches!(err, ModelError::Status(500)));

    let model = OpenAiModel::new(Some("sk-test".into()), "gpt-4o-mini")
        .expect("client")
        .with_base_url(base);
    let s = Summarizer::new(Arc::new(model));
    let text = "Rainy day. Stayed inside and read.";
    let out = s.summarize_detailed(text).await;
    assert_eq!(out.text, summarize_locally(text));
    assert_eq!(
        out.source,
        SummarySource::Fallback {
            cause: FallbackCause::Failed
        }
    );
}
