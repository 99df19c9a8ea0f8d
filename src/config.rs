//! Feed configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment
//! variables (or a `.env` file via `dotenvy`). The server and the
//! client each have their own config struct; both share the `FEED_`
//! prefix.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::FeedError;

/// Server configuration.
///
/// Loaded once at startup via [`ServerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind the feed server to (e.g. `0.0.0.0:5678`).
    pub listen_addr: SocketAddr,

    /// Period between payload pushes on each connection.
    pub tick_interval: Duration,

    /// Exclusive upper bound for sampled numbers.
    pub sample_bound: u32,

    /// TLS settings; `None` runs the plaintext listener only.
    pub tls: Option<TlsSettings>,
}

/// TLS listener settings.
#[derive(Debug, Clone)]
pub struct TlsSettings {
    /// PEM-encoded certificate chain path.
    pub cert_path: PathBuf,

    /// PEM-encoded private key path.
    pub key_path: PathBuf,

    /// Address for the companion plaintext listener that redirects
    /// every request to the HTTPS endpoint.
    pub redirect_addr: SocketAddr,
}

impl ServerConfig {
    /// Loads server configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Config`] if an address variable cannot be
    /// parsed, or if TLS is enabled without certificate and key paths.
    pub fn from_env() -> Result<Self, FeedError> {
        dotenvy::dotenv().ok();

        let listen_addr = parse_addr("FEED_LISTEN_ADDR", "0.0.0.0:5678")?;
        let tick_interval = Duration::from_millis(parse_env("FEED_TICK_MS", 1000));
        let sample_bound = parse_env("FEED_SAMPLE_BOUND", 1000);

        let tls = if parse_env_bool("FEED_TLS_ENABLED", false) {
            let cert_path = require_env("FEED_TLS_CERT_PATH")?;
            let key_path = require_env("FEED_TLS_KEY_PATH")?;
            Some(TlsSettings {
                cert_path: PathBuf::from(cert_path),
                key_path: PathBuf::from(key_path),
                redirect_addr: parse_addr("FEED_REDIRECT_ADDR", "0.0.0.0:8080")?,
            })
        } else {
            None
        };

        Ok(Self {
            listen_addr,
            tick_interval,
            sample_bound,
            tls,
        })
    }
}

/// Client configuration.
///
/// Loaded once at startup via [`ClientConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Feed endpoint URL (`ws://...` or `wss://...`).
    pub url: String,

    /// Skip TLS certificate verification. Test-only: defaults to
    /// `false` and logs a warning when enabled.
    pub insecure_tls: bool,

    /// How long to wait for the peer to acknowledge a close before
    /// giving up.
    pub close_grace: Duration,
}

impl ClientConfig {
    /// Loads client configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; kept fallible for parity with
    /// [`ServerConfig::from_env`] and future validation.
    pub fn from_env() -> Result<Self, FeedError> {
        dotenvy::dotenv().ok();

        let url = std::env::var("FEED_URL")
            .unwrap_or_else(|_| "ws://127.0.0.1:5678/ws".to_string());
        let insecure_tls = parse_env_bool("FEED_INSECURE_TLS", false);
        let close_grace = Duration::from_millis(parse_env("FEED_CLOSE_GRACE_MS", 1000));

        Ok(Self {
            url,
            insecure_tls,
            close_grace,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on
/// missing or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}

/// Parses an environment variable as a socket address, falling back to
/// `default` when unset.
fn parse_addr(key: &str, default: &str) -> Result<SocketAddr, FeedError> {
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse()
        .map_err(|_| FeedError::Config(format!("{key} is not a valid socket address: {raw}")))
}

/// Reads a required environment variable.
fn require_env(key: &str) -> Result<String, FeedError> {
    std::env::var(key).map_err(|_| FeedError::Config(format!("{key} must be set")))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_falls_back_on_missing() {
        assert_eq!(parse_env("FEED_TEST_UNSET_KEY", 42u32), 42);
    }

    #[test]
    fn parse_env_bool_falls_back_on_missing() {
        assert!(!parse_env_bool("FEED_TEST_UNSET_BOOL", false));
        assert!(parse_env_bool("FEED_TEST_UNSET_BOOL", true));
    }

    #[test]
    fn parse_addr_uses_default() {
        let Ok(addr) = parse_addr("FEED_TEST_UNSET_ADDR", "127.0.0.1:9000") else {
            panic!("default address should parse");
        };
        assert_eq!(addr.port(), 9000);
    }
}
