//! Error types for the boards client.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API key is not a valid header value")]
    InvalidApiKey,

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("nickname '{nickname}' cannot be used in a file name")]
    InvalidNickname { nickname: String },

    #[error("invalid timestamp '{input}': expected ISO-8601 (e.g. 2024-05-01 or 2024-05-01T12:30:00Z)")]
    InvalidTimestamp { input: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Request { status: StatusCode, body: String },

    /// The request never produced a response (connect, DNS, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Failures of a single page request. The bulk download treats these as
    /// the end of pagination rather than as a fatal error.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Request { .. } | Self::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Request {
            status: StatusCode::NOT_FOUND,
            body: "no such user".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 Not Found: no such user");

        let err = Error::filesystem(
            "/tmp/out/a.pbn",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "filesystem error at /tmp/out/a.pbn: denied");
    }

    #[test]
    fn test_is_transient() {
        let request = Error::Request {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        assert!(request.is_transient());

        let io = Error::filesystem(
            "out",
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        );
        assert!(!io.is_transient());
        assert!(!Error::InvalidApiKey.is_transient());
        assert!(
            !Error::InvalidNickname {
                nickname: "a/b".to_string()
            }
            .is_transient()
        );
        assert!(
            !Error::InvalidTimestamp {
                input: "yesterday".to_string()
            }
            .is_transient()
        );
    }

    #[test]
    fn test_client_build_error_is_not_transient() {
        let source = reqwest::Client::new()
            .get("::not a url")
            .build()
            .unwrap_err();
        let err = Error::ClientBuild(source);

        assert!(!err.is_transient());
        assert!(err.to_string().starts_with("failed to build HTTP client: "));
    }
}
