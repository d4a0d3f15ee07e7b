use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::aggregate::{Window, WindowStats};
use crate::chart::{axis_ticks, legend, AxisTick, ChartBucket};
use crate::entry::JournalEntry;
use crate::journal::{Journal, JournalError};
use crate::mood::{MoodKind, MoodReading};
use crate::summarize::Availability;

#[derive(Clone)]
pub struct AppState {
    pub journal: Journal,
}

pub fn create_router(journal: Journal, cors: bool) -> Router {
    let router = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/preview", post(preview))
        .route("/entries", post(create_entry).get(list_entries))
        .route("/entries/{id}", delete(delete_entry))
        .route("/stats", get(stats))
        .route("/legend", get(legend_view))
        .route("/debug/model", get(debug_model))
        .with_state(AppState { journal });

    if cors {
        router.layer(CorsLayer::very_permissive())
    } else {
        router
    }
}

// ------------------------------------------------------------
// Errors
// ------------------------------------------------------------

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ApiError::Internal(m) => {
                tracing::error!(error = %m, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

impl From<JournalError> for ApiError {
    fn from(e: JournalError) -> Self {
        match e {
            JournalError::EmptyEntry => ApiError::BadRequest(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

// ------------------------------------------------------------
// Views
// ------------------------------------------------------------

#[derive(Deserialize)]
struct TextReq {
    text: String,
}

#[derive(Serialize)]
pub struct ReadingView {
    pub raw_score: f32,
    pub mood_value: f32,
    pub kind: MoodKind,
    pub emoji: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

impl From<MoodReading> for ReadingView {
    fn from(r: MoodReading) -> Self {
        Self {
            raw_score: r.raw_score,
            mood_value: r.mood_value,
            kind: r.category.kind,
            emoji: r.category.emoji,
            label: r.category.label,
            description: r.category.description,
        }
    }
}

#[derive(Serialize)]
pub struct EntryView {
    pub id: u64,
    pub text: String,
    pub summary: String,
    pub raw_score: f32,
    pub mood_value: f32,
    pub kind: MoodKind,
    pub emoji: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub created_at: DateTime<Utc>,
}

impl From<JournalEntry> for EntryView {
    fn from(e: JournalEntry) -> Self {
        let c = e.category();
        Self {
            id: e.id,
            text: e.text,
            summary: e.summary,
            raw_score: e.raw_score,
            mood_value: e.mood_value,
            kind: c.kind,
            emoji: c.emoji,
            label: c.label,
            description: c.description,
            created_at: e.created_at,
        }
    }
}

#[derive(Serialize)]
struct LegendView {
    buckets: [ChartBucket; 5],
    axis: [AxisTick; 5],
}

#[derive(Deserialize)]
struct StatsQuery {
    #[serde(default)]
    window: Option<String>,
}

#[derive(Serialize)]
struct ModelView {
    provider: &'static str,
    availability: Availability,
}

// ------------------------------------------------------------
// Handlers
// ------------------------------------------------------------

async fn preview(State(state): State<AppState>, Json(body): Json<TextReq>) -> Json<ReadingView> {
    Json(state.journal.preview(&body.text).into())
}

async fn create_entry(
    State(state): State<AppState>,
    Json(body): Json<TextReq>,
) -> Result<(StatusCode, Json<EntryView>), ApiError> {
    let entry = state.journal.save(&body.text).await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<EntryView>>, ApiError> {
    let snapshot = state.journal.snapshot()?;
    Ok(Json(
        snapshot.iter().cloned().map(EntryView::from).collect(),
    ))
}

async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    if state.journal.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

async fn stats(
    State(state): State<AppState>,
    Query(q): Query<StatsQuery>,
) -> Result<Json<WindowStats>, ApiError> {
    let window = match q.window.as_deref() {
        None => Window::Week,
        Some(s) => s
            .parse::<Window>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
    };
    Ok(Json(state.journal.stats(window, Utc::now())?))
}

async fn legend_view() -> Json<LegendView> {
    Json(LegendView {
        buckets: legend(),
        axis: axis_ticks(),
    })
}

async fn debug_model(State(state): State<AppState>) -> Json<ModelView> {
    let summarizer = state.journal.summarizer();
    Json(ModelView {
        provider: summarizer.model_name(),
        availability: summarizer.availability(),
    })
}
