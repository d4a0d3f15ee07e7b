//! # Journal service
//! The save flow: score → normalize → summarize → build entry → insert.
//!
//! Summarization is the only step that can be abandoned. The insert is
//! started on the blocking pool with no await after the summary resolves,
//! and the pool finishes it even if the save is aborted. Aborting a spawned
//! save therefore either leaves the store untouched or lets the whole entry
//! land; never a partial. An abort that arrives during the disk write still
//! reports [`JournalError::Cancelled`] although the entry was stored.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use metrics::counter;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::aggregate::{Window, WindowStats};
use crate::entry::{JournalEntry, NewEntry, Snapshot};
use crate::logging::anon_id;
use crate::mood::MoodReading;
use crate::sentiment::SentimentScorer;
use crate::store::{EntryStore, StoreError};
use crate::summarize::Summarizer;

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// Saving requires non-blank text; callers should not offer save for it.
    #[error("journal text is empty")]
    EmptyEntry,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("save was cancelled before the entry was stored")]
    Cancelled,
    #[error("save task failed: {0}")]
    Task(String),
}

#[derive(Clone)]
pub struct Journal {
    store: Arc<dyn EntryStore>,
    scorer: Arc<dyn SentimentScorer>,
    summarizer: Arc<Summarizer>,
}

impl Journal {
    pub fn new(
        store: Arc<dyn EntryStore>,
        scorer: Arc<dyn SentimentScorer>,
        summarizer: Arc<Summarizer>,
    ) -> Self {
        Self {
            store,
            scorer,
            summarizer,
        }
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    /// Live mood reading for text being typed. No summary, nothing stored.
    pub fn preview(&self, text: &str) -> MoodReading {
        MoodReading::from_sentiment(self.scorer.score(text))
    }

    /// Run the full save flow and return the stored entry.
    pub async fn save(&self, text: &str) -> Result<JournalEntry, JournalError> {
        if text.trim().is_empty() {
            return Err(JournalError::EmptyEntry);
        }
        let id = anon_id(text);

        let reading = self.preview(text);
        let summary = self.summarizer.summarize_detailed(text).await;
        debug!(%id, fallback = summary.is_fallback(), "summary resolved");

        // The insert is handed to the blocking pool in the same poll that saw
        // the summary resolve. From here on a cancel cannot stop it.
        let store = Arc::clone(&self.store);
        let new_entry = NewEntry {
            text: text.to_string(),
            reading,
            summary: summary.text,
            created_at: Utc::now(),
        };
        let stored = tokio::task::spawn_blocking(move || store.insert(new_entry))
            .await
            .map_err(|e| JournalError::Task(e.to_string()))??;

        counter!("entries_saved_total").increment(1);
        info!(
            %id,
            entry_id = stored.id,
            chars = text.chars().count(),
            mood_value = stored.mood_value,
            category = stored.category().label,
            "journal entry saved"
        );
        Ok(stored)
    }

    /// Run [`Journal::save`] as its own task so the caller can abandon it.
    pub fn spawn_save(&self, text: impl Into<String>) -> PendingSave {
        let journal = self.clone();
        let text = text.into();
        PendingSave {
            handle: tokio::spawn(async move { journal.save(&text).await }),
        }
    }

    pub fn delete(&self, id: u64) -> Result<bool, JournalError> {
        let removed = self.store.delete(id)?;
        if removed {
            counter!("entries_deleted_total").increment(1);
            info!(entry_id = id, "journal entry deleted");
        }
        Ok(removed)
    }

    /// Ordered, immutable copy of every entry.
    pub fn snapshot(&self) -> Result<Snapshot, JournalError> {
        Ok(Snapshot::new(self.store.query_all()?))
    }

    pub fn stats(&self, window: Window, now: DateTime<Utc>) -> Result<WindowStats, JournalError> {
        let snapshot = self.snapshot()?;
        Ok(WindowStats::compute(&snapshot, window, now))
    }
}

/// Handle to a save running in the background.
pub struct PendingSave {
    handle: JoinHandle<Result<JournalEntry, JournalError>>,
}

impl PendingSave {
    /// Abandon the save. Safe at any point; see the module docs.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn wait(self) -> Result<JournalEntry, JournalError> {
        match self.handle.await {
            Ok(res) => res,
            Err(e) if e.is_cancelled() => Err(JournalError::Cancelled),
            Err(e) => Err(JournalError::Task(e.to_string())),
        }
    }
}
