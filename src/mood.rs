//! # Mood scale
//! Raw sentiment lives in `[-1, 1]`; everything the user sees lives on the
//! `0..=10` display scale. One band table ([`MOOD_CATEGORIES`]) carries both
//! the raw and the display boundaries, so categories, chart buckets and the
//! legend can never disagree.
//!
//! Display transform: `display = (clamp(raw, -1, 1) + 1) * 5`.

use serde::{Deserialize, Serialize};

pub const RAW_MIN: f32 = -1.0;
pub const RAW_MAX: f32 = 1.0;

pub const DISPLAY_MIN: f32 = 0.0;
pub const DISPLAY_MAX: f32 = 10.0;

/// Display units per raw unit.
pub const DISPLAY_SCALE: f32 = (DISPLAY_MAX - DISPLAY_MIN) / (RAW_MAX - RAW_MIN);

/// Raw score assumed when the analyzer returns nothing for a text.
pub const NEUTRAL_RAW_SCORE: f32 = 0.0;

/// The five mood buckets, ordered from most negative to most positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodKind {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl MoodKind {
    pub fn category(self) -> &'static MoodCategory {
        &MOOD_CATEGORIES[self as usize]
    }
}

/// One row of the band table.
///
/// Ranges are low-inclusive / high-exclusive, except the top band which is
/// closed on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodCategory {
    pub kind: MoodKind,
    pub raw_low: f32,
    pub raw_high: f32,
    pub display_low: f32,
    pub display_high: f32,
    pub emoji: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub range_label: &'static str,
}

pub static MOOD_CATEGORIES: [MoodCategory; 5] = [
    MoodCategory {
        kind: MoodKind::VeryNegative,
        raw_low: -1.0,
        raw_high: -0.6,
        display_low: 0.0,
        display_high: 2.0,
        emoji: "😢",
        label: "Very Sad",
        description: "A heavy day. Be gentle with yourself.",
        range_label: "0.0 – 2.0",
    },
    MoodCategory {
        kind: MoodKind::Negative,
        raw_low: -0.6,
        raw_high: -0.2,
        display_low: 2.0,
        display_high: 4.0,
        emoji: "😕",
        label: "A Bit Down",
        description: "Something weighed on you today.",
        range_label: "2.0 – 4.0",
    },
    MoodCategory {
        kind: MoodKind::Neutral,
        raw_low: -0.2,
        raw_high: 0.2,
        display_low: 4.0,
        display_high: 6.0,
        emoji: "😐",
        label: "Neutral",
        description: "A steady day without strong feelings either way.",
        range_label: "4.0 – 6.0",
    },
    MoodCategory {
        kind: MoodKind::Positive,
        raw_low: 0.2,
        raw_high: 0.6,
        display_low: 6.0,
        display_high: 8.0,
        emoji: "🙂",
        label: "Content",
        description: "Things went well and it shows.",
        range_label: "6.0 – 8.0",
    },
    MoodCategory {
        kind: MoodKind::VeryPositive,
        raw_low: 0.6,
        raw_high: 1.0,
        display_low: 8.0,
        display_high: 10.0,
        emoji: "😄",
        label: "Very Happy",
        description: "A bright, joyful day worth remembering.",
        range_label: "8.0 – 10",
    },
];

impl MoodCategory {
    fn is_top(&self) -> bool {
        self.kind == MoodKind::VeryPositive
    }

    /// `raw` must already be clamped.
    pub fn contains_raw(&self, raw: f32) -> bool {
        raw >= self.raw_low && (raw < self.raw_high || (self.is_top() && raw <= self.raw_high))
    }

    /// `value` must already be clamped to the display domain.
    pub fn contains_display(&self, value: f32) -> bool {
        value >= self.display_low
            && (value < self.display_high || (self.is_top() && value <= self.display_high))
    }
}

/// Clamp a raw score into `[-1, 1]`; NaN is read as "no result".
pub fn clamp_raw(raw: f32) -> f32 {
    if raw.is_nan() {
        NEUTRAL_RAW_SCORE
    } else {
        raw.clamp(RAW_MIN, RAW_MAX)
    }
}

/// Affine map from the raw scale onto the display scale.
///
/// Interpolated inside the raw score's own band, so band edges land exactly
/// on their display edges and the result always lies in that band's display
/// range (f32 rounding cannot push it into a neighbour).
pub fn display_value(raw: f32) -> f32 {
    let raw = clamp_raw(raw);
    let band = category_for_raw(raw);
    if band.is_top() && raw >= band.raw_high {
        return band.display_high;
    }
    let value = band.display_low + (raw - band.raw_low) * DISPLAY_SCALE;
    let ceiling = if band.is_top() {
        band.display_high
    } else {
        just_below(band.display_high)
    };
    value.clamp(band.display_low, ceiling)
}

/// Largest f32 strictly below a positive `x`.
fn just_below(x: f32) -> f32 {
    debug_assert!(x > 0.0);
    f32::from_bits(x.to_bits() - 1)
}

/// Category lookup over the raw score.
pub fn category_for_raw(raw: f32) -> &'static MoodCategory {
    let raw = clamp_raw(raw);
    MOOD_CATEGORIES
        .iter()
        .find(|c| c.contains_raw(raw))
        // The table partitions [-1, 1]; a clamped score always lands in a band.
        .unwrap_or(&MOOD_CATEGORIES[MoodKind::Neutral as usize])
}

/// `normalize(raw) -> (display value, category)`.
pub fn normalize(raw: f32) -> (f32, &'static MoodCategory) {
    (display_value(raw), category_for_raw(raw))
}

/// Everything derived from one sentiment result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodReading {
    pub raw_score: f32,
    pub mood_value: f32,
    pub category: &'static MoodCategory,
}

impl MoodReading {
    /// Absent sentiment is read as neutral, never as an error.
    pub fn from_sentiment(score: Option<f32>) -> Self {
        let raw_score = clamp_raw(score.unwrap_or(NEUTRAL_RAW_SCORE));
        let (mood_value, category) = normalize(raw_score);
        Self {
            raw_score,
            mood_value,
            category,
        }
    }
}
