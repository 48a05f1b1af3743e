//! phish_signals library: heuristic URL feature extraction
//!
//! This library turns a URL into a fixed vector of seven phishing indicator
//! scores (server form handler, popup scripts, TLS posture, external-link
//! ratio, URL length, domain age, IP-literal host shape). The vector is meant
//! to feed a downstream classifier; no classification happens here.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use phish_signals::{analyze, AnalysisContext, Config, ErrorStats};
//! use phish_signals::initialization::{init_client, init_crypto_provider};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! init_crypto_provider();
//! let config = Config::default();
//! let client = init_client(&config)?;
//! let ctx = AnalysisContext::new(client, Arc::new(ErrorStats::new()));
//!
//! let features = analyze(&ctx, "https://example.com/login").await;
//! println!("{:?}", features.to_array());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Each extraction performs up to
//! three sequential network round-trips (page fetch, TLS handshake, WHOIS
//! lookup), all bounded by timeouts; callers wanting parallel fan-out over
//! many URLs add their own concurrency layer.

#![warn(missing_docs)]

pub mod config;
mod domain;
mod error_handling;
mod features;
mod fetch;
mod html;
pub mod initialization;
mod lexical;
mod tls;
mod whois;

// Re-export public API
pub use config::{Config, LogLevel};
pub use domain::extract_domain;
pub use error_handling::{
    log_error_statistics, ErrorStats, ErrorType, FetchError, TlsError, WhoisError,
};
pub use features::{analyze, AnalysisContext, FeatureVector, NEUTRAL, SAFE, SUSPICIOUS};
pub use fetch::{fetch_page, resolve_final_url};
pub use whois::{lookup_whois, WhoisResult};
