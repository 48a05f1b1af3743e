//! One-time setup of shared resources: logger, crypto provider, HTTP client,
//! and the public-suffix extractor.

use std::sync::Arc;
use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::ClientBuilder;
use tldextract::{TldExtractor, TldOption};

use crate::config::{Config, MAX_REDIRECT_HOPS};

/// Initializes the logger with the given level filter.
///
/// `RUST_LOG` still takes precedence when set, so `--log-level` acts as a
/// default rather than an override.
pub fn init_logger(level: log::LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_secs()
        .init();
}

/// Installs the process-wide rustls crypto provider.
///
/// Idempotent: a second call (e.g. from a test harness) is a no-op.
pub fn init_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}

/// Builds the shared HTTP client used for both redirect resolution and page
/// fetches.
///
/// The client is constructed explicitly from [`Config`] — timeout, User-Agent,
/// and a bounded redirect policy — rather than relying on library defaults,
/// and is meant to be created once and passed into the pipeline.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .redirect(Policy::limited(MAX_REDIRECT_HOPS))
        .build()?;
    Ok(Arc::new(client))
}

/// Creates the public-suffix-list extractor used for registrable-domain
/// extraction.
pub fn init_extractor() -> Arc<TldExtractor> {
    Arc::new(TldExtractor::new(TldOption::default()))
}
