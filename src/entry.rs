//! Journal entries and the read-only snapshot the aggregation works on.

use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mood::{category_for_raw, MoodCategory, MoodReading};

/// A persisted journal entry. Created once, never edited; only deleted.
///
/// The category is not stored: it is re-derived from `raw_score` so it cannot
/// drift from the value it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: u64,
    pub text: String,
    pub raw_score: f32,
    /// Display-scale value (0..=10).
    pub mood_value: f32,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn category(&self) -> &'static MoodCategory {
        category_for_raw(self.raw_score)
    }
}

/// Everything needed to persist an entry; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub text: String,
    pub reading: MoodReading,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

impl NewEntry {
    pub fn into_entry(self, id: u64) -> JournalEntry {
        JournalEntry {
            id,
            text: self.text,
            raw_score: self.reading.raw_score,
            mood_value: self.reading.mood_value,
            summary: self.summary,
            created_at: self.created_at,
        }
    }
}

/// Immutable view of the collection, ordered oldest → newest.
#[derive(Debug, Clone, Default)]
pub struct Snapshot(Arc<[JournalEntry]>);

impl Snapshot {
    /// Sorts by `created_at` (ties by id) so callers can rely on the order.
    pub fn new(mut entries: Vec<JournalEntry>) -> Self {
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Self(entries.into())
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.0
    }
}

impl Deref for Snapshot {
    type Target = [JournalEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
