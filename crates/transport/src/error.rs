use thiserror::Error;

use crate::core::ParseError;

/// Classified outcome of a failed request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server could not be reached (DNS, connect, reset).
    #[error("cannot reach game server at {address}: {source}")]
    Connection {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} timed out after {timeout_ms}ms")]
    Timeout { path: &'static str, timeout_ms: u64 },

    /// A response arrived but reported failure, or was not valid HTTP.
    #[error("server error ({}): {message}", status_label(.status))]
    Server { status: Option<u16>, message: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP {code}"),
        None => "malformed response".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    Connection,
    Timeout,
    Server,
    Parse,
}

impl TransportError {
    pub fn kind(&self) -> TransportErrorKind {
        match self {
            TransportError::Connection { .. } => TransportErrorKind::Connection,
            TransportError::Timeout { .. } => TransportErrorKind::Timeout,
            TransportError::Server { .. } => TransportErrorKind::Server,
            TransportError::Parse(_) => TransportErrorKind::Parse,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        TransportError::Server {
            status: None,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TransportError::Server {
            status: Some(400),
            message: "Game not started".to_string(),
        };
        assert_eq!(err.to_string(), "server error (HTTP 400): Game not started");
        assert_eq!(err.kind(), TransportErrorKind::Server);

        let err = TransportError::malformed("missing status line");
        assert_eq!(
            err.to_string(),
            "server error (malformed response): missing status line"
        );

        let err = TransportError::Timeout {
            path: "/action",
            timeout_ms: 5000,
        };
        assert_eq!(err.to_string(), "/action timed out after 5000ms");
    }

    #[test]
    fn test_parse_error_kind() {
        let parse_err = crate::core::parse("").unwrap_err();
        let err = TransportError::from(parse_err);
        assert_eq!(err.kind(), TransportErrorKind::Parse);
    }
}
