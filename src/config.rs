use clap::{Parser, ValueEnum};

// Network operation timeouts
/// Per-request timeout for page fetches and redirect resolution (seconds)
pub const HTTP_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// TLS handshake timeout in seconds
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 5;
/// WHOIS response read timeout in seconds
pub const WHOIS_READ_TIMEOUT_SECS: u64 = 10;

// Redirect handling
/// Maximum number of redirect hops to follow
/// Prevents infinite redirect loops and excessive request chains
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Default User-Agent string for HTTP requests.
///
/// Uses a generic Chrome-like string; phishing kits frequently serve benign
/// content to obvious non-browser clients. Users can override this via the
/// `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// Indicator thresholds
/// URL lengths below this score safe
pub const URL_LENGTH_SHORT: usize = 54;
/// URL lengths above this score suspicious; between the two bounds is neutral
pub const URL_LENGTH_LONG: usize = 75;
/// External-link percentage below which a page scores safe
pub const REQUEST_URL_SAFE_PCT: f64 = 22.0;
/// Minimum certificate age, in years, to score safe
pub const MIN_CERT_AGE_YEARS: f64 = 0.5;
/// Domains registered fewer than this many days ago score neutral
pub const NEW_DOMAIN_AGE_DAYS: i64 = 365;
/// Hosts with at least this many dots are treated as IP-literal-like
pub const HOST_DOT_THRESHOLD: usize = 4;

// WHOIS
/// IANA root WHOIS server, used to discover the registry server for a TLD
pub const IANA_WHOIS_HOST: &str = "whois.iana.org";
/// Standard WHOIS port
pub const WHOIS_PORT: u16 = 43;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Errors and warnings
    Warn,
    /// Informational output (default)
    Info,
    /// Per-indicator fallback details
    Debug,
    /// Everything
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field attributes.
///
/// # Examples
///
/// ```bash
/// # Score a single URL
/// phish_signals https://example.com/login
///
/// # Resolve redirects first, emit JSON
/// phish_signals --resolve --json http://bit.ly/something
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "phish_signals",
    about = "Scores URLs with heuristic phishing indicators."
)]
pub struct Config {
    /// One or more URLs to analyze
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Resolve the final URL (one HEAD request following redirects) before analysis
    #[arg(long)]
    pub resolve: bool,

    /// Emit the reports as a JSON array instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            urls: Vec::new(),
            resolve: false,
            json: false,
            log_level: LogLevel::Info,
            timeout_seconds: HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
