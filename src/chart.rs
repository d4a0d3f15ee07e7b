//! Chart buckets, axis labels and the legend.
//!
//! All three read the display boundaries of [`MOOD_CATEGORIES`]; there is no
//! second table.

use serde::Serialize;

use crate::mood::{MoodCategory, MoodKind, DISPLAY_MAX, DISPLAY_MIN, MOOD_CATEGORIES};

/// Y-axis tick positions on the display scale.
pub const AXIS_TICKS: [f32; 5] = [0.0, 2.5, 5.0, 7.5, 10.0];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartBucket {
    pub kind: MoodKind,
    pub emoji: &'static str,
    pub label: &'static str,
    pub range_label: &'static str,
    pub low: f32,
    pub high: f32,
}

impl From<&'static MoodCategory> for ChartBucket {
    fn from(c: &'static MoodCategory) -> Self {
        Self {
            kind: c.kind,
            emoji: c.emoji,
            label: c.label,
            range_label: c.range_label,
            low: c.display_low,
            high: c.display_high,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisTick {
    pub value: f32,
    pub emoji: &'static str,
}

/// Bucket for a display value. Values outside `0..=10` are clamped, NaN sits
/// at the midpoint.
pub fn bucket(value: f32) -> ChartBucket {
    let v = if value.is_nan() {
        (DISPLAY_MIN + DISPLAY_MAX) / 2.0
    } else {
        value.clamp(DISPLAY_MIN, DISPLAY_MAX)
    };
    let category = MOOD_CATEGORIES
        .iter()
        .find(|c| c.contains_display(v))
        .unwrap_or(&MOOD_CATEGORIES[MoodKind::Neutral as usize]);
    ChartBucket::from(category)
}

/// Static legend, ascending.
pub fn legend() -> [ChartBucket; 5] {
    std::array::from_fn(|i| ChartBucket::from(&MOOD_CATEGORIES[i]))
}

pub fn axis_ticks() -> [AxisTick; 5] {
    AXIS_TICKS.map(|value| AxisTick {
        value,
        emoji: bucket(value).emoji,
    })
}
