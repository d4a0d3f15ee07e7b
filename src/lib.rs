// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod aggregate;
pub mod api;
pub mod chart;
pub mod config;
pub mod entry;
pub mod journal;
pub mod language;
pub mod logging;
pub mod metrics;
pub mod mood;
pub mod sentiment;
pub mod store;
pub mod summarize;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{Trend, Window, WindowStats};
pub use crate::api::create_router;
pub use crate::entry::{JournalEntry, Snapshot};
pub use crate::journal::{Journal, JournalError, PendingSave};
pub use crate::mood::{MoodCategory, MoodKind, MoodReading};
pub use crate::summarize::Summarizer;

use std::sync::Arc;

use tracing::info;

use crate::config::{AppConfig, StoreKind};
use crate::sentiment::LexiconScorer;
use crate::store::{EntryStore, JsonFileStore, MemoryStore};
use crate::summarize::build_model_from_config;

/// Wire a [`Journal`] from configuration: store backend, lexicon scorer, and
/// the summary model chain.
pub fn build_journal(cfg: &AppConfig) -> anyhow::Result<Journal> {
    let store: Arc<dyn EntryStore> = match cfg.store.kind {
        StoreKind::Memory => Arc::new(MemoryStore::new()),
        StoreKind::File => Arc::new(JsonFileStore::open(&cfg.store.path)?),
    };

    let model = build_model_from_config(&cfg.model)?;
    // Safe diagnostics: provider + availability, never the key.
    info!(
        provider = model.name(),
        availability = ?model.availability(),
        store = ?cfg.store.kind,
        "journal wired"
    );

    let summarizer = Summarizer::new(model).with_timeout(cfg.model.timeout());
    Ok(Journal::new(
        store,
        Arc::new(LexiconScorer::new()),
        Arc::new(summarizer),
    ))
}
