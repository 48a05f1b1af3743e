//! Page fetching and redirect resolution.
//!
//! One GET per extraction: the parsed document produced here is shared by all
//! content-based indicators, none of which re-fetch the page.

use reqwest::StatusCode;
use scraper::Html;

use crate::error_handling::FetchError;

/// Fetches a URL and parses the response body as HTML.
///
/// Only a 200 response is treated as success; redirects are already followed
/// by the client's redirect policy, so any other terminal status is a
/// [`FetchError::Status`]. Transport-level failures (DNS, connect, timeout,
/// TLS, body read) surface as [`FetchError::Transport`].
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<Html, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status(status));
    }

    let body = response.text().await?;
    Ok(Html::parse_document(&body))
}

/// Resolves the terminal URL after redirects with a single HEAD request.
///
/// Never fails: any network problem (timeout, DNS failure, connection
/// refused, malformed URL) collapses to `None`. Intended to run before the
/// extraction pipeline, not as part of it.
pub async fn resolve_final_url(client: &reqwest::Client, url: &str) -> Option<String> {
    match client.head(url).send().await {
        Ok(response) => Some(response.url().to_string()),
        Err(e) => {
            log::debug!("HEAD resolution failed for {}: {}", url, e);
            None
        }
    }
}
