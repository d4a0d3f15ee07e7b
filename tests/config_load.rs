// tests/config_load.rs
//
// Config discovery through MOOD_CONFIG_PATH and wiring a journal from it.

use std::io::Write;

use serial_test::serial;

use mood_journal::build_journal;
use mood_journal::config::{AppConfig, StoreKind, ENV_CONFIG_PATH};
use mood_journal::summarize::{Availability, UnavailableReason};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("temp config");
    f.write_all(contents.as_bytes()).expect("write config");
    f
}

#[test]
#[serial]
fn env_path_is_loaded_and_sanitized() {
    let f = write_config(
        r#"
[model]
enabled = true
provider = "  OpenAI "
daily_limit = 0

[store]
kind = "memory"
"#,
    );
    std::env::set_var(ENV_CONFIG_PATH, f.path());
    let cfg = AppConfig::load_default();
    std::env::remove_var(ENV_CONFIG_PATH);

    let cfg = cfg.expect("config loads");
    assert!(cfg.model.enabled);
    assert_eq!(cfg.model.provider, "openai");
    assert_eq!(cfg.model.daily_limit, 20);
    assert_eq!(cfg.store.kind, StoreKind::Memory);
}

#[test]
#[serial]
fn missing_env_path_is_an_error() {
    std::env::set_var(ENV_CONFIG_PATH, "/definitely/not/here/mood.toml");
    let res = AppConfig::load_default();
    std::env::remove_var(ENV_CONFIG_PATH);
    assert!(res.is_err());
}

#[test]
#[serial]
fn shipped_sample_config_parses() {
    let cfg = AppConfig::load_from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/config/mood.toml"))
        .expect("sample config");
    assert!(!cfg.model.enabled);
    assert_eq!(cfg.store.kind, StoreKind::File);
}

#[tokio::test]
#[serial]
async fn disabled_model_journal_saves_with_local_summary() {
    std::env::remove_var("MOOD_MODEL_MODE");
    let f = write_config("[store]\nkind = \"memory\"\n");
    let cfg = AppConfig::load_from_file(f.path()).expect("config");

    let journal = build_journal(&cfg).expect("journal");
    assert_eq!(
        journal.summarizer().availability(),
        Availability::Unavailable(UnavailableReason::FeatureDisabled)
    );

    let entry = journal
        .save("Cooked pasta for everyone. Then we watched a film.")
        .await
        .expect("save");
    assert_eq!(entry.summary, "Cooked pasta for everyone.");
    assert_eq!(journal.snapshot().expect("snapshot").len(), 1);
}

#[tokio::test]
#[serial]
async fn mock_mode_overrides_disabled_model() {
    std::env::set_var("MOOD_MODEL_MODE", "mock");
    let cfg = AppConfig {
        store: mood_journal::config::StoreConfig {
            kind: StoreKind::Memory,
            ..Default::default()
        },
        ..Default::default()
    };
    let journal = build_journal(&cfg);
    std::env::remove_var("MOOD_MODEL_MODE");

    let journal = journal.expect("journal");
    assert_eq!(journal.summarizer().model_name(), "mock");
    let entry = journal.save("Short note.").await.expect("save");
    assert_eq!(entry.summary, "I wrote about my day (mock summary).");
}
