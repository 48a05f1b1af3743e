//! Registrable-domain extraction.
//!
//! Uses the Public Suffix List so multi-part suffixes come out right
//! (`sub.example.co.uk` → `example.co.uk`). Callers that just want "a domain
//! or nothing" treat the error case as `None`.

use anyhow::{Context, Result};
use tldextract::TldExtractor;

/// Extracts the registrable domain (`domain.suffix`) from a URL.
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed, has no host, is an
/// IP-literal host (IPs have no registrable domain), or if suffix extraction
/// finds neither a domain nor a suffix.
pub fn extract_domain(extractor: &TldExtractor, url: &str) -> Result<String> {
    // tldextract is lenient about its input, so validate the URL shape first
    let parsed = url::Url::parse(url).with_context(|| format!("Failed to parse URL: {}", url))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("URL '{}' has no host component", url))?;

    if host.parse::<std::net::IpAddr>().is_ok()
        || matches!(
            parsed.host(),
            Some(url::Host::Ipv4(_)) | Some(url::Host::Ipv6(_))
        )
    {
        return Err(anyhow::anyhow!(
            "IP addresses do not have registrable domains: {}",
            host
        ));
    }

    let result = extractor
        .extract(url)
        .with_context(|| format!("Failed to extract domain from URL: {}", url))?;

    match (result.domain, result.suffix) {
        (Some(domain), Some(suffix)) => Ok(format!("{}.{}", domain, suffix)),
        (Some(domain), None) => Ok(domain),
        (None, Some(suffix)) => Ok(suffix),
        (None, None) => Err(anyhow::anyhow!("No domain or suffix found in URL: {}", url)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tldextract::{TldExtractor, TldOption};

    fn test_extractor() -> TldExtractor {
        TldExtractor::new(TldOption::default())
    }

    #[test]
    fn test_extract_domain_invalid_url() {
        let extractor = test_extractor();
        assert!(extract_domain(&extractor, "not-a-url").is_err());
    }

    #[test]
    fn test_extract_domain_url_without_host() {
        let extractor = test_extractor();
        assert!(extract_domain(&extractor, "file:///path/to/file").is_err());
    }

    #[test]
    fn test_extract_domain_rejects_ipv4() {
        let extractor = test_extractor();
        assert!(extract_domain(&extractor, "http://192.168.1.1/login").is_err());
    }

    #[test]
    fn test_extract_domain_rejects_ipv6() {
        let extractor = test_extractor();
        assert!(extract_domain(&extractor, "http://[::1]/login").is_err());
    }

    // The tests below exercise suffix extraction against the Public Suffix
    // List, which the extractor may need to download on first use. They are
    // run separately via `cargo test -- --ignored`.

    #[test]
    #[ignore]
    fn test_extract_domain_basic() {
        let extractor = test_extractor();
        assert_eq!(
            extract_domain(&extractor, "https://www.example.com/path").unwrap(),
            "example.com"
        );
    }

    #[test]
    #[ignore]
    fn test_extract_domain_multi_part_suffix() {
        let extractor = test_extractor();
        // Must return the registrable domain, not the bare suffix
        assert_eq!(
            extract_domain(&extractor, "https://sub.example.co.uk/login").unwrap(),
            "example.co.uk"
        );
    }

    #[test]
    #[ignore]
    fn test_extract_domain_deep_subdomains() {
        let extractor = test_extractor();
        assert_eq!(
            extract_domain(&extractor, "https://a.b.c.example.com").unwrap(),
            "example.com"
        );
    }

    #[test]
    #[ignore]
    fn test_extract_domain_with_port_and_query() {
        let extractor = test_extractor();
        assert_eq!(
            extract_domain(&extractor, "https://www.example.com:8080/p?q=1#f").unwrap(),
            "example.com"
        );
    }
}
