//! Error types for the `oauth-consumer` crate.
//!
//! Follows the same pattern as the other workspace crates with a root Error struct and error kind enums.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for oauth-consumer crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in oauth-consumer.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    Network(NetworkErrorKind),
    Parse(ParseErrorKind),
    NotAuthorized,
    Http(HttpErrorKind),
}

/// The outbound call could not be completed.
#[derive(Debug, PartialEq)]
pub enum NetworkErrorKind {
    /// The request could not be built, e.g. a malformed URL or unsupported scheme.
    InvalidRequest,
    Connect,
    Timeout,
    Body,
    Request,
}

/// The response body could not be turned into an open JSON mapping.
#[derive(Debug, PartialEq)]
pub enum ParseErrorKind {
    InvalidJson,
    NotAnObject,
}

/// Errors unrelated to a single request: building the client or parsing a callback URL.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    BuilderFailed,
    InvalidUrl,
}

impl Error {
    pub fn is_network(&self) -> bool {
        matches!(self.error_kind, ErrorKind::Network(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self.error_kind, ErrorKind::Parse(_))
    }

    pub fn is_not_authorized(&self) -> bool {
        self.error_kind == ErrorKind::NotAuthorized
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Network(kind) => write!(f, "Network error: {:?}", kind)?,
            ErrorKind::Parse(kind) => write!(f, "Parse error: {:?}", kind)?,
            ErrorKind::NotAuthorized => write!(f, "Not authorized")?,
            ErrorKind::Http(kind) => write!(f, "HTTP error: {:?}", kind)?,
        }
        if let Some(source) = &self.source {
            write!(f, " ({})", source)?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error_kind = if err.is_builder() {
            ErrorKind::Network(NetworkErrorKind::InvalidRequest)
        } else if err.is_timeout() {
            ErrorKind::Network(NetworkErrorKind::Timeout)
        } else if err.is_connect() {
            ErrorKind::Network(NetworkErrorKind::Connect)
        } else if err.is_body() || err.is_decode() {
            ErrorKind::Network(NetworkErrorKind::Body)
        } else {
            ErrorKind::Network(NetworkErrorKind::Request)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Parse(ParseErrorKind::InvalidJson),
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Http(HttpErrorKind::InvalidUrl),
        }
    }
}

/// Helper function for a client that could not be constructed.
pub fn client_builder_error(err: reqwest::Error) -> Error {
    Error {
        source: Some(Box::new(err)),
        error_kind: ErrorKind::Http(HttpErrorKind::BuilderFailed),
    }
}

/// Helper function to create network errors.
pub fn network_error(kind: NetworkErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Network(kind),
    }
}

/// Helper function to create parse errors.
pub fn parse_error(kind: ParseErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Parse(kind),
    }
}

/// Helper function to create the error returned when a gate denies a call.
pub fn not_authorized_error() -> Error {
    Error {
        source: None,
        error_kind: ErrorKind::NotAuthorized,
    }
}
