//! Tracing setup and log-safe identifiers.
//!
//! Journal text is private: logs carry a short hash of it, never the text.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_LOG_FILTER: &str = "mood_journal=info,warn";

/// Set `MOOD_LOG_FORMAT=json` for JSON lines instead of the compact format.
pub const ENV_LOG_FORMAT: &str = "MOOD_LOG_FORMAT";

/// Install the global subscriber. Filter comes from `RUST_LOG` when set.
/// A no-op when the host runtime already installed one.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let json = std::env::var(ENV_LOG_FORMAT)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// First 6 bytes of the SHA-256 of `text`, hex encoded.
pub fn anon_id(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anon_id_is_short_and_stable() {
        let a = anon_id("dear diary");
        assert_eq!(a.len(), 12);
        assert_eq!(a, anon_id("dear diary"));
        assert_ne!(a, anon_id("dear diary!"));
        assert!(!a.contains("diary"));
    }
}
