//! Feature-extraction orchestration.
//!
//! [`analyze`] turns a URL into the fixed 7-element indicator vector: one
//! page fetch shared by the content indicators, then the URL indicators, in
//! a fixed documented order. The only cross-cutting failure mode is the
//! fetch itself, which collapses the whole vector to the sentinel.

use std::sync::Arc;

use serde::Serialize;

use crate::error_handling::{ErrorStats, ErrorType, FetchError};
use crate::fetch::fetch_page;
use crate::html::{check_popups, check_request_urls, check_sfh};
use crate::lexical::{check_ip_address, check_url_length};
use crate::tls::check_ssl_final_state;
use crate::whois::check_age_of_domain;

/// Benign/safe signal.
pub const SAFE: i8 = 1;
/// Neutral/ambiguous signal.
pub const NEUTRAL: i8 = 0;
/// Suspicious signal.
pub const SUSPICIOUS: i8 = -1;

/// The ordered indicator scores for one URL.
///
/// Field order is a contract: downstream consumers index positionally via
/// [`FeatureVector::to_array`], in the order
/// `[sfh, popups, ssl, request_urls, url_length, age_of_domain, ip_address]`.
///
/// The uniform all-suspicious vector doubles as the "extraction failed"
/// sentinel; consumers cannot distinguish it from a page where every
/// heuristic genuinely fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureVector {
    /// Server form handler score
    pub sfh: i8,
    /// Popup-with-form script score
    pub popups: i8,
    /// TLS posture score
    pub ssl: i8,
    /// External-link ratio score
    pub request_urls: i8,
    /// URL length score
    pub url_length: i8,
    /// Domain registration age score
    pub age_of_domain: i8,
    /// IP-literal-like host score
    pub ip_address: i8,
}

impl FeatureVector {
    /// Number of indicators in the vector.
    pub const LEN: usize = 7;

    /// The sentinel vector: every indicator suspicious.
    pub fn all_suspicious() -> Self {
        FeatureVector {
            sfh: SUSPICIOUS,
            popups: SUSPICIOUS,
            ssl: SUSPICIOUS,
            request_urls: SUSPICIOUS,
            url_length: SUSPICIOUS,
            age_of_domain: SUSPICIOUS,
            ip_address: SUSPICIOUS,
        }
    }

    /// Returns the scores in their fixed positional order.
    pub fn to_array(self) -> [i8; Self::LEN] {
        [
            self.sfh,
            self.popups,
            self.ssl,
            self.request_urls,
            self.url_length,
            self.age_of_domain,
            self.ip_address,
        ]
    }
}

/// Shared resources for a run of extractions.
///
/// Holds the explicitly configured HTTP client and the fallback counters.
/// Construct once, share by reference; nothing in here carries per-URL state,
/// so repeated [`analyze`] calls are independent.
pub struct AnalysisContext {
    /// HTTP client used for the page fetch
    pub client: Arc<reqwest::Client>,
    /// Fallback counters updated as indicators degrade
    pub stats: Arc<ErrorStats>,
}

impl AnalysisContext {
    /// Creates a context from a client and a stats tracker.
    pub fn new(client: Arc<reqwest::Client>, stats: Arc<ErrorStats>) -> Self {
        AnalysisContext { client, stats }
    }
}

/// Extracts the full indicator vector for a URL.
///
/// Performs the single page fetch; if it fails in any way (non-200 status or
/// transport error) the uniform sentinel `[-1; 7]` is returned and nothing
/// else runs. On success the three content indicators read the parsed
/// document, then the TLS, WHOIS, and lexical indicators score the URL
/// itself. Errors never cross this boundary.
pub async fn analyze(ctx: &AnalysisContext, url: &str) -> FeatureVector {
    let document = match fetch_page(&ctx.client, url).await {
        Ok(document) => document,
        Err(e) => {
            log::warn!("page fetch failed for {}: {}", url, e);
            ctx.stats.increment(match e {
                FetchError::Status(_) => ErrorType::FetchStatus,
                FetchError::Transport(_) => ErrorType::FetchTransport,
            });
            return FeatureVector::all_suspicious();
        }
    };

    let sfh = check_sfh(&document);
    let popups = check_popups(&document);
    let request_urls = check_request_urls(&document);
    // The parsed document is not Send; finish with it before the
    // network-bound checks below
    drop(document);

    let ssl = check_ssl_final_state(url, &ctx.stats).await;
    let age_of_domain = check_age_of_domain(url, &ctx.stats).await;

    FeatureVector {
        sfh,
        popups,
        ssl,
        request_urls,
        url_length: check_url_length(url),
        age_of_domain,
        ip_address: check_ip_address(url),
    }
}
