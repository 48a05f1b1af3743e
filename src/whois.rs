//! WHOIS lookup and the domain-age indicator.
//!
//! The lookup speaks the WHOIS protocol directly: one query to the IANA root
//! server to discover the registry server for the TLD, then one query to
//! that server for the host's record. Creation dates come out of the raw
//! key/value text, so parsing tolerates the usual zoo of registry date
//! formats.

use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use regex::Regex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::{
    IANA_WHOIS_HOST, NEW_DOMAIN_AGE_DAYS, TCP_CONNECT_TIMEOUT_SECS, WHOIS_PORT,
    WHOIS_READ_TIMEOUT_SECS,
};
use crate::error_handling::{ErrorStats, ErrorType, WhoisError};
use crate::features::{NEUTRAL, SAFE};

static HOST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://([^/]+)").expect("Failed to compile host pattern - this is a bug")
});

/// WHOIS lookup result.
#[derive(Debug, Clone)]
pub struct WhoisResult {
    /// Domain creation date, when the registry publishes one we can parse
    pub creation_date: Option<DateTime<Utc>>,
    /// Registrar name
    pub registrar: Option<String>,
    /// Raw response text (for debugging/fallback)
    pub raw_text: String,
}

/// Scores the age of a URL's domain.
///
/// A registration record younger than a year scores neutral; anything else —
/// older domains, missing creation dates, IP hosts, or a failed lookup —
/// scores safe. Absence of evidence is treated as evidence of absence here:
/// WHOIS outages must not flag a page.
pub async fn check_age_of_domain(url: &str, stats: &ErrorStats) -> i8 {
    let Some(host) = extract_host(url) else {
        return SAFE;
    };

    // Registries have no records for IP literals; skip the lookup entirely
    if host.parse::<std::net::IpAddr>().is_ok() {
        return SAFE;
    }

    match lookup_whois(&host).await {
        Ok(result) => {
            if result.creation_date.is_none() {
                stats.increment(ErrorType::WhoisMissingCreationDate);
            }
            score_domain_age(result.creation_date, Utc::now())
        }
        Err(e) => {
            log::debug!("WHOIS lookup failed for {}: {}", host, e);
            stats.increment(ErrorType::WhoisLookup);
            SAFE
        }
    }
}

/// Maps an optional creation date to an indicator score.
pub(crate) fn score_domain_age(creation_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i8 {
    match creation_date {
        Some(created) if (now - created).num_days() < NEW_DOMAIN_AGE_DAYS => NEUTRAL,
        _ => SAFE,
    }
}

/// Pulls the host out of a URL with a scheme-prefix match, dropping any port.
fn extract_host(url: &str) -> Option<String> {
    let captured = HOST_PATTERN.captures(url)?.get(1)?.as_str();
    let host = captured.split(':').next().unwrap_or(captured);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// Performs a WHOIS lookup for a host.
///
/// Queries `whois.iana.org` for the host's TLD, follows the `refer:` line to
/// the registry's server, and parses that server's response. Registries only
/// hold records for registrable domains, so a subdomained host is retried
/// with its leading labels stripped (`www.example.com` → `example.com`)
/// until a dated record comes back. Every round trip carries connect and
/// read timeouts.
pub async fn lookup_whois(host: &str) -> Result<WhoisResult, WhoisError> {
    if host.parse::<std::net::IpAddr>().is_ok() {
        return Err(WhoisError::IpHost(host.to_string()));
    }

    let tld = host
        .rsplit('.')
        .next()
        .filter(|t| !t.is_empty() && t.chars().any(|c| c.is_ascii_alphabetic()))
        .ok_or_else(|| WhoisError::NoTld(host.to_string()))?;

    log::debug!("WHOIS: resolving registry server for .{}", tld);
    let referral = query_whois_server(IANA_WHOIS_HOST, tld).await?;
    let server = referral
        .lines()
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.trim().eq_ignore_ascii_case("refer") {
                Some(value.trim().to_string())
            } else {
                None
            }
        })
        .ok_or_else(|| WhoisError::NoReferral(tld.to_string()))?;

    let mut result = WhoisResult {
        creation_date: None,
        registrar: None,
        raw_text: String::new(),
    };
    for candidate in lookup_candidates(host) {
        log::debug!("WHOIS: querying {} for {}", server, candidate);
        let raw = query_whois_server(&server, candidate).await?;
        result = parse_whois_record(&raw);
        if result.creation_date.is_some() {
            break;
        }
    }
    Ok(result)
}

/// Query candidates for a host, from most to least specific.
///
/// Without a suffix list the registrable boundary is unknown, so leading
/// labels are stripped one at a time; every remainder that still has at
/// least two labels is a candidate. `lookup_whois` stops at the first
/// candidate whose record carries a creation date, so the registrable
/// domain answers before any bare suffix is reached.
fn lookup_candidates(host: &str) -> Vec<&str> {
    let mut candidates = Vec::new();
    let mut rest = host;
    loop {
        candidates.push(rest);
        match rest.split_once('.') {
            Some((_, tail)) if tail.contains('.') => rest = tail,
            _ => break,
        }
    }
    candidates
}

/// Sends one WHOIS query and reads the full response.
async fn query_whois_server(server: &str, query: &str) -> Result<String, WhoisError> {
    let mut stream = tokio::time::timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        TcpStream::connect((server, WHOIS_PORT)),
    )
    .await
    .map_err(|_| WhoisError::ConnectTimeout(server.to_string()))??;

    stream.write_all(format!("{}\r\n", query).as_bytes()).await?;

    let mut response = Vec::new();
    tokio::time::timeout(
        Duration::from_secs(WHOIS_READ_TIMEOUT_SECS),
        stream.read_to_end(&mut response),
    )
    .await
    .map_err(|_| WhoisError::ReadTimeout(server.to_string()))??;

    Ok(String::from_utf8_lossy(&response).into_owned())
}

/// Extracts the fields we care about from raw key/value WHOIS text.
fn parse_whois_record(raw: &str) -> WhoisResult {
    let mut creation_date = None;
    let mut registrar = None;

    for line in raw.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.as_str() {
            "creation date" | "created" | "registered" | "registered on" | "registration time"
            | "domain record activated" => {
                if creation_date.is_none() {
                    creation_date = parse_date_string(value);
                }
            }
            "registrar" => {
                if registrar.is_none() {
                    registrar = Some(value.to_string());
                }
            }
            _ => {}
        }
    }

    WhoisResult {
        creation_date,
        registrar,
        raw_text: raw.to_string(),
    }
}

/// Attempts to parse a registry date string in various formats.
fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
        "%d-%b-%Y",
        "%d/%m/%Y",
        "%Y.%m.%d",
    ];

    for format in &formats {
        if let Ok(naive_dt) = chrono::NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive_dt.and_utc());
        }
        if let Ok(naive_date) = chrono::NaiveDate::parse_from_str(date_str, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
