use once_cell::sync::Lazy;
use std::collections::HashMap;

static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

/// Normalization constant for squashing a lexicon sum into `[-1, 1]`.
const SQUASH_ALPHA: f32 = 15.0;

/// Anything that can put a sentiment number on a piece of text.
pub trait SentimentScorer: Send + Sync {
    /// Score in `[-1, 1]`, or `None` when the text gives nothing to score.
    fn score(&self, text: &str) -> Option<f32>;
}

/// Bundled English + Italian word lexicon with short-range negation.
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    /// Lexicon value for a token (0 when unknown). Elided Italian articles
    /// ("l'amore") fall back to the part after the apostrophe.
    #[inline]
    fn word_score(&self, w: &str) -> i32 {
        if let Some(v) = LEXICON.get(w) {
            return *v;
        }
        match w.rsplit_once('\'') {
            Some((_, tail)) if !tail.is_empty() => *LEXICON.get(tail).unwrap_or(&0),
            _ => 0,
        }
    }

    /// Returns `(sum, token count)`.
    /// A negator within the previous 1..=3 tokens flips the sign of a hit.
    pub fn score_text(&self, text: &str) -> (i32, usize) {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut score: i32 = 0;

        for i in 0..tokens.len() {
            let base = self.word_score(tokens[i].as_str());
            if base == 0 {
                continue;
            }
            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            score += if negated { -base } else { base };
        }

        (score, tokens.len())
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Option<f32> {
        let (sum, tokens) = self.score_text(text);
        if tokens == 0 {
            return None;
        }
        let s = sum as f32;
        Some((s / (s * s + SQUASH_ALPHA).sqrt()).clamp(-1.0, 1.0))
    }
}

/// Alphanumeric tokens (apostrophes kept inside words), lower-case.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|t| t.trim_matches(|c| c == '\'' || c == '\u{2019}'))
        .filter(|t| !t.is_empty())
        .map(|t| t.replace('\u{2019}', "'").to_lowercase())
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "isn't"
            | "wasn't"
            | "aren't"
            | "don't"
            | "didn't"
            | "doesn't"
            | "won't"
            | "can't"
            | "cannot"
            | "without"
            | "non"
            | "mai"
            | "senza"
            | "nessun"
            | "nessuna"
            | "niente"
    )
}
