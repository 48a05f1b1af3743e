//! URL-string indicators that need no network or document: overall length and
//! the IP-literal-like host shape.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{HOST_DOT_THRESHOLD, URL_LENGTH_LONG, URL_LENGTH_SHORT};
use crate::features::{NEUTRAL, SAFE, SUSPICIOUS};

static AUTHORITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://([^/]+)").expect("Failed to compile authority pattern - this is a bug")
});

/// Scores the raw length of a URL.
///
/// Phishing URLs pad paths and query strings to hide the real host. Under 54
/// characters scores safe, 54 through 75 neutral, longer suspicious.
pub fn check_url_length(url: &str) -> i8 {
    let len = url.len();
    if len < URL_LENGTH_SHORT {
        SAFE
    } else if len <= URL_LENGTH_LONG {
        NEUTRAL
    } else {
        SUSPICIOUS
    }
}

/// Scores the host for an IP-literal-like shape.
///
/// Takes the authority substring after the scheme, drops userinfo and port,
/// and counts the dots that remain. Four or more score suspicious; this
/// deliberately passes a plain IPv4 literal, which has only three. The
/// authority is cut out textually rather than through a URL parser: strict
/// host parsers reject shapes like `1.2.3.4.5` (a numeric final label that
/// is not valid IPv4), and those are exactly the hosts this indicator must
/// see. A URL without an `http(s)` authority cannot prove anything and
/// scores safe.
pub fn check_ip_address(url: &str) -> i8 {
    let Some(authority) = AUTHORITY_PATTERN.captures(url).and_then(|c| c.get(1)) else {
        return SAFE;
    };

    let mut host = authority.as_str();
    if let Some((_, after_userinfo)) = host.rsplit_once('@') {
        host = after_userinfo;
    }
    host = host.split(':').next().unwrap_or(host);

    if host.matches('.').count() >= HOST_DOT_THRESHOLD {
        SUSPICIOUS
    } else {
        SAFE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_url_length_boundaries() {
        let base = "http://a.com/";
        let url_53 = format!("{}{}", base, "x".repeat(53 - base.len()));
        let url_54 = format!("{}{}", base, "x".repeat(54 - base.len()));
        let url_75 = format!("{}{}", base, "x".repeat(75 - base.len()));
        let url_76 = format!("{}{}", base, "x".repeat(76 - base.len()));

        assert_eq!(check_url_length(&url_53), SAFE);
        assert_eq!(check_url_length(&url_54), NEUTRAL);
        assert_eq!(check_url_length(&url_75), NEUTRAL);
        assert_eq!(check_url_length(&url_76), SUSPICIOUS);
    }

    #[test]
    fn test_url_length_short() {
        assert_eq!(check_url_length("https://example.com"), SAFE);
    }

    #[test]
    fn test_ip_address_plain_ipv4_passes() {
        // Boundary case: a real IPv4 literal has only 3 dots, below the
        // 4-dot threshold, so it scores safe under this heuristic
        assert_eq!(check_ip_address("http://1.2.3.4/path"), SAFE);
    }

    #[test]
    fn test_ip_address_five_segments_is_suspicious() {
        // A numeric final label is not valid IPv4, so strict host parsers
        // reject this shape outright; the indicator must still score it
        assert_eq!(check_ip_address("http://1.2.3.4.5/path"), SUSPICIOUS);
    }

    #[test]
    fn test_ip_address_numeric_tail_host_is_counted() {
        // Same parser-rejected shape with named labels in front
        assert_eq!(check_ip_address("https://login.secure.1.2.3/auth"), SUSPICIOUS);
    }

    #[test]
    fn test_ip_address_userinfo_does_not_count() {
        // Dots in the userinfo must not push the host over the threshold
        assert_eq!(
            check_ip_address("http://a.b.c.d@example.com/login"),
            SAFE
        );
    }

    #[test]
    fn test_ip_address_deep_subdomain_is_suspicious() {
        // a.b.c.d.example.com has 5 dots
        assert_eq!(
            check_ip_address("https://a.b.c.d.example.com/login"),
            SUSPICIOUS
        );
    }

    #[test]
    fn test_ip_address_normal_host_is_safe() {
        assert_eq!(check_ip_address("https://www.example.com/login"), SAFE);
    }

    #[test]
    fn test_ip_address_port_does_not_count() {
        assert_eq!(check_ip_address("http://www.example.com:8080/x"), SAFE);
    }

    #[test]
    fn test_ip_address_path_dots_do_not_count() {
        assert_eq!(
            check_ip_address("http://example.com/a.b.c.d.e.html"),
            SAFE
        );
    }

    #[test]
    fn test_ip_address_unparseable_url_is_safe() {
        assert_eq!(check_ip_address("not a url"), SAFE);
    }

    proptest! {
        #[test]
        fn test_url_length_score_in_range(url in ".{0,200}") {
            let score = check_url_length(&url);
            prop_assert!(score == SAFE || score == NEUTRAL || score == SUSPICIOUS);
        }

        #[test]
        fn test_url_length_monotone_bands(len in 0usize..200) {
            let url = "x".repeat(len);
            let expected = if len < URL_LENGTH_SHORT {
                SAFE
            } else if len <= URL_LENGTH_LONG {
                NEUTRAL
            } else {
                SUSPICIOUS
            };
            prop_assert_eq!(check_url_length(&url), expected);
        }

        #[test]
        fn test_ip_address_no_panic(url in ".{0,120}") {
            let score = check_ip_address(&url);
            prop_assert!(score == SAFE || score == SUSPICIOUS);
        }
    }
}
