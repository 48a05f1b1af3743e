//! TLS posture indicator.
//!
//! Rather than fetching the page again, this check performs its own TLS
//! handshake against the host and inspects the peer's leaf certificate:
//! freshly issued certificates are a weak phishing signal, since kit domains
//! rarely live long enough to hold an old one.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use url::Url;

use crate::config::{MIN_CERT_AGE_YEARS, TCP_CONNECT_TIMEOUT_SECS, TLS_HANDSHAKE_TIMEOUT_SECS};
use crate::error_handling::{ErrorStats, ErrorType, TlsError};
use crate::features::{NEUTRAL, SAFE, SUSPICIOUS};

/// Scores the TLS posture of a URL.
///
/// Non-`https` URLs score suspicious outright. For `https` URLs the leaf
/// certificate's age since issuance decides: at least half a year scores
/// safe, younger scores neutral. Any failure along the way (connect,
/// handshake, missing or undecodable certificate) also scores neutral — an
/// unreachable certificate cannot prove suspicion.
pub async fn check_ssl_final_state(url: &str, stats: &ErrorStats) -> i8 {
    if !url.starts_with("https://") {
        return SUSPICIOUS;
    }

    match certificate_age_days(url).await {
        Ok(age_days) => score_certificate_age(age_days),
        Err(e) => {
            log::debug!("TLS inspection failed for {}: {}", url, e);
            stats.increment(ErrorType::TlsUnavailable);
            NEUTRAL
        }
    }
}

/// Maps a certificate age in days to an indicator score.
fn score_certificate_age(age_days: i64) -> i8 {
    let age_in_years = age_days as f64 / 365.0;
    if age_in_years >= MIN_CERT_AGE_YEARS {
        SAFE
    } else {
        NEUTRAL
    }
}

/// Connects to the URL's host, completes a verified TLS handshake, and
/// returns the number of days since the leaf certificate's `not_before`.
async fn certificate_age_days(url: &str) -> Result<i64, TlsError> {
    let parsed = Url::parse(url).map_err(|_| TlsError::NoHost(url.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| TlsError::NoHost(url.to_string()))?
        .to_string();
    let port = parsed.port().unwrap_or(443);

    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let server_name = ServerName::try_from(host.clone())
        .map_err(|_| TlsError::InvalidServerName(host.clone()))?;

    let sock = match tokio::time::timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        TcpStream::connect((host.as_str(), port)),
    )
    .await
    {
        Ok(Ok(sock)) => sock,
        Ok(Err(e)) => return Err(TlsError::Connect(e)),
        Err(_) => return Err(TlsError::ConnectTimeout(host)),
    };

    let connector = TlsConnector::from(Arc::new(config));
    let tls_stream = match tokio::time::timeout(
        Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
        connector.connect(server_name, sock),
    )
    .await
    {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => return Err(TlsError::Handshake(e)),
        Err(_) => return Err(TlsError::HandshakeTimeout(host)),
    };

    let (_, session) = tls_stream.get_ref();
    let cert_der = session
        .peer_certificates()
        .and_then(|certs| certs.first())
        .ok_or(TlsError::NoPeerCertificate)?;

    let (_, cert) = x509_parser::parse_x509_certificate(cert_der.as_ref())
        .map_err(|e| TlsError::CertificateDecode(e.to_string()))?;

    let not_before = cert.validity().not_before.timestamp();
    let age_days = (Utc::now().timestamp() - not_before) / 86_400;
    Ok(age_days)
}
