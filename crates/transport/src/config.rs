//! Client configuration.
//!
//! Every knob has a default and can be overridden from the environment:
//!
//! - `SNAKE_SERVER_URL`: base address (default: "http://localhost:5000")
//! - `SNAKE_TIMEOUT_MS`: per-request timeout (default: 5000)
//! - `SNAKE_TICK_MS`: action submission cadence (default: 150)
//! - `SNAKE_CLIENT_LOG_PATH`: write logs to this file (default: no logging)

use std::time::Duration;

use thiserror::Error;

use crate::types::{DEFAULT_SERVER_URL, REQUEST_TIMEOUT_MS, UPDATE_INTERVAL_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub tick_interval: Duration,
    pub log_path: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS as u64),
            tick_interval: Duration::from_millis(UPDATE_INTERVAL_MS as u64),
            log_path: None,
        }
    }
}

impl ClientConfig {
    /// Create from environment variables; unset or unparseable values keep
    /// their defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let base_url = env::var("SNAKE_SERVER_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_url);

        let timeout = env::var("SNAKE_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.timeout);

        let tick_interval = env::var("SNAKE_TICK_MS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.tick_interval);

        let log_path = env::var("SNAKE_CLIENT_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            base_url,
            timeout,
            tick_interval,
            log_path,
        }
    }

    pub fn endpoint(&self) -> Result<Endpoint, EndpointError> {
        Endpoint::parse(&self.base_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("unsupported scheme {0:?} (only http:// is supported)")]
    UnsupportedScheme(String),
    #[error("missing host in {0:?}")]
    MissingHost(String),
    #[error("invalid port in {0:?}")]
    InvalidPort(String),
    #[error("IPv6 host must be bracketed in {0:?}, e.g. http://[::1]:5000")]
    UnbracketedIpv6(String),
}

/// Parsed base address: `http://host[:port][/prefix]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
    base_path: String,
}

impl Endpoint {
    /// Parse a base address. A missing scheme is taken as `http://`.
    pub fn parse(url: &str) -> Result<Self, EndpointError> {
        let url = url.trim();
        let rest = match url.split_once("://") {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("http") => rest,
            Some((scheme, _)) => return Err(EndpointError::UnsupportedScheme(scheme.to_string())),
            None => url,
        };

        let (authority, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };

        let (host, port) = if let Some(bracketed) = authority.strip_prefix('[') {
            // IPv6 literal: [::1]:5000
            let (host, after) = bracketed
                .split_once(']')
                .ok_or_else(|| EndpointError::MissingHost(url.to_string()))?;
            let port = match after.strip_prefix(':') {
                Some(p) => Some(p),
                None if after.is_empty() => None,
                None => return Err(EndpointError::InvalidPort(url.to_string())),
            };
            (host, port)
        } else {
            let (host, port) = match authority.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (authority, None),
            };
            if host.contains(':') {
                return Err(EndpointError::UnbracketedIpv6(url.to_string()));
            }
            (host, port)
        };

        if host.is_empty() {
            return Err(EndpointError::MissingHost(url.to_string()));
        }
        let port = match port {
            Some(p) => p
                .parse::<u16>()
                .map_err(|_| EndpointError::InvalidPort(url.to_string()))?,
            None => 80,
        };

        Ok(Self {
            host: host.to_string(),
            port,
            base_path: path.trim_end_matches('/').to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Value for the `Host` header.
    pub fn authority(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Request target for `path` (which starts with `/`).
    pub fn path(&self, path: &str) -> String {
        format!("{}{}", self.base_path, path)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "http://{}{}", self.authority(), self.base_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.tick_interval, Duration::from_millis(150));
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var("SNAKE_SERVER_URL", "http://10.0.0.2:8080");
        std::env::set_var("SNAKE_TIMEOUT_MS", "250");
        std::env::set_var("SNAKE_TICK_MS", "not-a-number");
        std::env::set_var("SNAKE_CLIENT_LOG_PATH", "  ");

        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, "http://10.0.0.2:8080");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.tick_interval, Duration::from_millis(150));
        assert_eq!(config.log_path, None);

        std::env::remove_var("SNAKE_SERVER_URL");
        std::env::remove_var("SNAKE_TIMEOUT_MS");
        std::env::remove_var("SNAKE_TICK_MS");
        std::env::remove_var("SNAKE_CLIENT_LOG_PATH");
    }

    #[test]
    fn test_parse_endpoint() {
        let ep = Endpoint::parse("http://localhost:5000").unwrap();
        assert_eq!(ep.host(), "localhost");
        assert_eq!(ep.port(), 5000);
        assert_eq!(ep.path("/health"), "/health");
        assert_eq!(ep.authority(), "localhost:5000");

        let ep = Endpoint::parse("HTTP://example.com/snake/").unwrap();
        assert_eq!(ep.port(), 80);
        assert_eq!(ep.path("/start"), "/snake/start");
        assert_eq!(ep.to_string(), "http://example.com:80/snake");

        let ep = Endpoint::parse("127.0.0.1:7000").unwrap();
        assert_eq!(ep.port(), 7000);

        let ep = Endpoint::parse("http://[::1]:5000").unwrap();
        assert_eq!(ep.host(), "::1");
        assert_eq!(ep.authority(), "[::1]:5000");
    }

    #[test]
    fn test_parse_endpoint_errors() {
        assert_eq!(
            Endpoint::parse("https://example.com"),
            Err(EndpointError::UnsupportedScheme("https".to_string()))
        );
        assert!(matches!(
            Endpoint::parse("http://:5000"),
            Err(EndpointError::MissingHost(_))
        ));
        assert!(matches!(
            Endpoint::parse("http://localhost:port"),
            Err(EndpointError::InvalidPort(_))
        ));
    }

    #[test]
    fn test_unbracketed_ipv6_rejected() {
        assert!(matches!(
            Endpoint::parse("http://::1"),
            Err(EndpointError::UnbracketedIpv6(_))
        ));
        assert!(matches!(
            Endpoint::parse("fe80::1:5000"),
            Err(EndpointError::UnbracketedIpv6(_))
        ));
        assert_eq!(Endpoint::parse("http://[::1]").unwrap().port(), 80);
    }
}
