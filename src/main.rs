//! Mood Journal: binary entrypoint.
//! Boots the Axum HTTP server: config, tracing, journal wiring, metrics.

use mood_journal::{api, build_journal, config::AppConfig, logging, metrics::Metrics};
use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    logging::init_tracing();

    let cfg = AppConfig::load_default()?;
    let journal = build_journal(&cfg)?;
    let metrics = Metrics::install()?;

    let router = api::create_router(journal, cfg.server.cors).merge(metrics.router());

    Ok(router.into())
}
