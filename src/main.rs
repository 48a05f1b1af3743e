//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `phish_signals` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Optional redirect resolution and domain extraction per URL
//! - User-facing output formatting (plain text or JSON)
//!
//! All scoring logic is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;

use phish_signals::initialization::{
    init_client, init_crypto_provider, init_extractor, init_logger,
};
use phish_signals::{
    analyze, extract_domain, log_error_statistics, resolve_final_url, AnalysisContext, Config,
    ErrorStats, ErrorType, FeatureVector,
};

/// One scored URL, as printed or serialized.
#[derive(Debug, Serialize)]
struct UrlReport {
    url: String,
    final_url: Option<String>,
    domain: Option<String>,
    features: FeatureVector,
    vector: [i8; FeatureVector::LEN],
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_logger(config.log_level.clone().into());
    init_crypto_provider();

    let client = init_client(&config).context("Failed to initialize HTTP client")?;
    let extractor = init_extractor();
    let stats = Arc::new(ErrorStats::new());
    let ctx = AnalysisContext::new(Arc::clone(&client), Arc::clone(&stats));

    let mut reports = Vec::with_capacity(config.urls.len());
    for url in &config.urls {
        let final_url = if config.resolve {
            resolve_final_url(&client, url).await
        } else {
            None
        };
        let target = final_url.as_deref().unwrap_or(url.as_str()).to_string();

        let domain = match extract_domain(&extractor, &target) {
            Ok(domain) => Some(domain),
            Err(e) => {
                log::debug!("domain extraction failed for {}: {:#}", target, e);
                stats.increment(ErrorType::DomainExtract);
                None
            }
        };

        let features = analyze(&ctx, &target).await;
        reports.push(UrlReport {
            url: url.clone(),
            final_url,
            domain,
            vector: features.to_array(),
            features,
        });
    }

    if config.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("Failed to serialize reports")?
        );
    } else {
        for report in &reports {
            println!("URL: {}", report.url);
            if let Some(final_url) = &report.final_url {
                println!("  Final URL: {}", final_url);
            }
            if let Some(domain) = &report.domain {
                println!("  Domain: {}", domain);
            }
            println!("  Features: {:?}", report.vector);
            println!();
        }
    }

    log_error_statistics(&stats);
    Ok(())
}
