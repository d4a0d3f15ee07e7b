//! # Window aggregation
//! Pure functions over an ordered snapshot: rolling-window filter, mean mood,
//! and a first-half vs second-half trend. Nothing here holds state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::chart::{bucket, ChartBucket};
use crate::entry::JournalEntry;

/// Second-half mean must beat the first-half mean by more than this for "up".
pub const TREND_UP_THRESHOLD: f32 = 0.1;
/// ...and trail it by more than this for "down".
pub const TREND_DOWN_THRESHOLD: f32 = -0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    Week,
    Month,
}

impl Window {
    pub fn days(self) -> i64 {
        match self {
            Window::Week => 7,
            Window::Month => 30,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::days(self.days())
    }

    /// Oldest timestamp still inside the window ending at `now`.
    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.duration()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown window '{0}', expected week|7d|month|30d")]
pub struct ParseWindowError(pub String);

impl FromStr for Window {
    type Err = ParseWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" | "weekly" | "7d" => Ok(Window::Week),
            "month" | "monthly" | "30d" => Ok(Window::Month),
            other => Err(ParseWindowError(other.to_string())),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Window::Week => f.write_str("week"),
            Window::Month => f.write_str("month"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Up => "In improvement",
            Trend::Down => "Declining",
            Trend::Neutral => "Stable",
        }
    }
}

/// Entries with `created_at >= now - window`. `entries` must be ordered
/// oldest → newest (a [`crate::entry::Snapshot`] always is); the result is a
/// suffix of it.
pub fn filter_by_window(
    entries: &[JournalEntry],
    window: Window,
    now: DateTime<Utc>,
) -> &[JournalEntry] {
    debug_assert!(
        entries.windows(2).all(|w| w[0].created_at <= w[1].created_at),
        "entries must be ordered by created_at"
    );
    let cutoff = window.cutoff(now);
    let start = entries.partition_point(|e| e.created_at < cutoff);
    &entries[start..]
}

/// Arithmetic mean; `None` for no values.
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|v| *v as f64).sum();
    Some((sum / values.len() as f64) as f32)
}

/// Mean mood value of `subset`; `None` when it is empty.
pub fn average(subset: &[JournalEntry]) -> Option<f32> {
    let values: Vec<f32> = subset.iter().map(|e| e.mood_value).collect();
    mean(&values)
}

/// Trend over values ordered oldest → newest.
///
/// Fewer than two values is `Neutral`. With an odd count the middle value
/// belongs to neither half.
pub fn trend_of_values(values: &[f32]) -> Trend {
    if values.len() < 2 {
        return Trend::Neutral;
    }
    let half = values.len() / 2;
    let (Some(first), Some(second)) = (
        mean(&values[..half]),
        mean(&values[values.len() - half..]),
    ) else {
        return Trend::Neutral;
    };

    let difference = second - first;
    if difference > TREND_UP_THRESHOLD {
        Trend::Up
    } else if difference < TREND_DOWN_THRESHOLD {
        Trend::Down
    } else {
        Trend::Neutral
    }
}

pub fn trend(subset: &[JournalEntry]) -> Trend {
    let values: Vec<f32> = subset.iter().map(|e| e.mood_value).collect();
    trend_of_values(&values)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub id: u64,
    pub at: DateTime<Utc>,
    pub value: f32,
    pub emoji: &'static str,
}

/// Everything a chart screen needs for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowStats {
    pub window: Window,
    pub count: usize,
    pub average: Option<f32>,
    pub average_bucket: Option<ChartBucket>,
    pub trend: Trend,
    pub trend_label: &'static str,
    pub points: Vec<ChartPoint>,
}

impl WindowStats {
    pub fn compute(entries: &[JournalEntry], window: Window, now: DateTime<Utc>) -> Self {
        let subset = filter_by_window(entries, window, now);
        let average = average(subset);
        let trend = trend(subset);
        Self {
            window,
            count: subset.len(),
            average,
            average_bucket: average.map(bucket),
            trend,
            trend_label: trend.label(),
            points: subset
                .iter()
                .map(|e| ChartPoint {
                    id: e.id,
                    at: e.created_at,
                    value: e.mood_value,
                    emoji: e.category().emoji,
                })
                .collect(),
        }
    }
}
