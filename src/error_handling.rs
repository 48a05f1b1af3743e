//! Error types for the networked sub-operations and the fallback counters
//! summarized at the end of a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Failure modes of the single page fetch.
///
/// Both variants collapse the whole feature vector to the all-suspicious
/// sentinel; they are kept distinct for logging and error accounting.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request itself failed (DNS, connect, timeout, TLS, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with something other than 200.
    #[error("unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),
}

/// Failure modes of the TLS certificate inspection.
///
/// Every variant degrades the SSL indicator to neutral.
#[derive(Error, Debug)]
pub enum TlsError {
    /// The URL could not be parsed or has no host to connect to.
    #[error("no usable host in URL: {0}")]
    NoHost(String),

    /// The host is not a valid TLS server name.
    #[error("invalid server name: {0}")]
    InvalidServerName(String),

    /// TCP connect did not complete within the timeout.
    #[error("TCP connect timeout for {0}:443")]
    ConnectTimeout(String),

    /// TCP connect failed outright.
    #[error("TCP connect failed: {0}")]
    Connect(std::io::Error),

    /// TLS handshake did not complete within the timeout.
    #[error("TLS handshake timeout for {0}")]
    HandshakeTimeout(String),

    /// TLS handshake failed (bad certificate, protocol mismatch, reset).
    #[error("TLS handshake failed: {0}")]
    Handshake(std::io::Error),

    /// The handshake completed but the peer presented no certificate.
    #[error("no peer certificate presented")]
    NoPeerCertificate,

    /// The leaf certificate could not be decoded.
    #[error("certificate decode error: {0}")]
    CertificateDecode(String),
}

/// Failure modes of the WHOIS lookup.
///
/// Every variant degrades the domain-age indicator to safe.
#[derive(Error, Debug)]
pub enum WhoisError {
    /// The host is an IP literal; registries have no record for it.
    #[error("IP hosts have no WHOIS record: {0}")]
    IpHost(String),

    /// The host has no usable top-level label.
    #[error("no TLD in host: {0}")]
    NoTld(String),

    /// IANA returned no `refer:` line for the TLD.
    #[error("no registry referral for TLD: {0}")]
    NoReferral(String),

    /// TCP connect to a WHOIS server timed out.
    #[error("WHOIS connect timeout for {0}")]
    ConnectTimeout(String),

    /// Reading the WHOIS response timed out.
    #[error("WHOIS read timeout for {0}")]
    ReadTimeout(String),

    /// Socket-level failure while talking to a WHOIS server.
    #[error("WHOIS I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Conditions where a sub-operation degraded to a sentinel score.
///
/// Each variant is counted once per occurrence; the counts are summarized at
/// the end of a CLI run so batch users can tell "genuinely suspicious" apart
/// from "the network was broken".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Page fetch returned a non-200 status (vector collapsed to sentinel)
    FetchStatus,
    /// Page fetch failed at the transport level (vector collapsed to sentinel)
    FetchTransport,
    /// TLS inspection failed; SSL indicator fell back to neutral
    TlsUnavailable,
    /// WHOIS lookup failed; domain-age indicator fell back to safe
    WhoisLookup,
    /// WHOIS record had no parseable creation date
    WhoisMissingCreationDate,
    /// Registrable-domain extraction failed for a report
    DomainExtract,
}

impl ErrorType {
    /// Human-readable label used in the end-of-run summary.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::FetchStatus => "page fetch: non-200 status",
            ErrorType::FetchTransport => "page fetch: transport error",
            ErrorType::TlsUnavailable => "TLS inspection unavailable",
            ErrorType::WhoisLookup => "WHOIS lookup failed",
            ErrorType::WhoisMissingCreationDate => "WHOIS record missing creation date",
            ErrorType::DomainExtract => "domain extraction failed",
        }
    }
}

/// Thread-safe fallback counters.
///
/// Tracks how often each [`ErrorType`] occurred using atomic counters. All
/// counters are initialized to zero on creation; the struct can be shared
/// across tasks with `Arc`.
pub struct ErrorStats {
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl ErrorStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }
        ErrorStats { errors }
    }

    /// Increments the counter for `error`.
    pub fn increment(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!("Untracked error type: {:?}", error);
        }
    }

    /// Returns the current count for `error`.
    pub fn get_count(&self, error: ErrorType) -> usize {
        match self.errors.get(&error) {
            Some(counter) => counter.load(Ordering::SeqCst),
            None => {
                log::error!("Untracked error type: {:?}", error);
                0
            }
        }
    }
}

impl Default for ErrorStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Logs a summary of nonzero fallback counters at `info` level.
pub fn log_error_statistics(stats: &ErrorStats) {
    let mut any = false;
    for error_type in ErrorType::iter() {
        let count = stats.get_count(error_type);
        if count > 0 {
            log::info!("{}: {}", error_type.as_str(), count);
            any = true;
        }
    }
    if !any {
        log::debug!("no indicator fallbacks recorded");
    }
}
