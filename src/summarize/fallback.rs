//! Local, always-available summary: first sentence, or the first few words.

/// Word budget when the text has no sentence terminator.
pub const FALLBACK_MAX_WORDS: usize = 7;

pub const ELLIPSIS: &str = "...";

/// Condense `text` without any external help.
///
/// Empty (or whitespace-only) input yields an empty string; anything else
/// yields a non-empty result.
pub fn summarize_locally(text: &str) -> String {
    let trimmed = text.trim();

    if let Some(end) = trimmed.find('.') {
        return trimmed[..=end].to_string();
    }

    let words: Vec<&str> = trimmed.split_whitespace().collect();
    if words.len() > FALLBACK_MAX_WORDS {
        format!("{}{ELLIPSIS}", words[..FALLBACK_MAX_WORDS].join(" "))
    } else {
        trimmed.to_string()
    }
}
