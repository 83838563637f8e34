use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Generic error type
#[derive(Error, Debug)]
pub enum Error {
    /// Network or connection failure on an HTTP call
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// Malformed JSON or ASN.1 input
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Serial number could not be re-encoded as a DER INTEGER
    #[error("Encode error for serial {}: {reason}", hex::encode(.serial))]
    Encode { serial: Vec<u8>, reason: String },

    /// Certificate lacks a required extension
    #[error("Certificate has no extension with OID {oid}")]
    MissingExtension { oid: String },

    /// Unreadable file, malformed PEM or unparsable certificate
    #[error("Input error for {}: {reason}", .path.display())]
    Input { path: PathBuf, reason: String },

    /// Configuration or usage error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Result could not be written out
    #[error("Output error: {0}")]
    Output(#[from] io::Error),
}

/// Decoding failures, tagged by what was being decoded
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Response body is not the expected JSON document
    #[error("invalid JSON from {url}: {message}")]
    Json { url: String, message: String },

    /// Extension value is not well-formed DER
    #[error("malformed DER in extension {oid} ({}): {reason}", hex::encode(.bytes))]
    Asn1 {
        oid: String,
        bytes: Vec<u8>,
        reason: String,
    },

    /// Bytes left over after the outer structure
    #[error("trailing data after extension {oid} ({})", hex::encode(.bytes))]
    TrailingData { oid: String, bytes: Vec<u8> },

    /// Outer structure is not a universal constructed SEQUENCE
    #[error("extension {oid} is not a SEQUENCE (found {tag})")]
    UnexpectedTag {
        oid: String,
        bytes: Vec<u8>,
        tag: String,
    },
}

/// Error discriminant, for callers that branch on the failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Decode,
    Encode,
    MissingExtension,
    Input,
    Config,
    Output,
}

impl ErrorKind {
    /// Process exit code for this class of failure
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorKind::Config => 2,
            ErrorKind::Input => 3,
            ErrorKind::MissingExtension => 4,
            ErrorKind::Decode => 5,
            ErrorKind::Encode => 6,
            ErrorKind::Transport => 7,
            ErrorKind::Output => 8,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::Decode => write!(f, "decode"),
            ErrorKind::Encode => write!(f, "encode"),
            ErrorKind::MissingExtension => write!(f, "missing-extension"),
            ErrorKind::Input => write!(f, "input"),
            ErrorKind::Config => write!(f, "config"),
            ErrorKind::Output => write!(f, "output"),
        }
    }
}

impl Error {
    /// Build an input error for `path`
    pub fn input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Input {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build a transport error for `url`
    pub fn transport(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Error::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Decode(_) => ErrorKind::Decode,
            Error::Encode { .. } => ErrorKind::Encode,
            Error::MissingExtension { .. } => ErrorKind::MissingExtension,
            Error::Input { .. } => ErrorKind::Input,
            Error::Config(_) => ErrorKind::Config,
            Error::Output(_) => ErrorKind::Output,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("invalid URL: {}", err))
    }
}
