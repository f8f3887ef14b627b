//! use csrkit::error::CsrKitError;

use thiserror::Error;

/// Represents errors that can occur in the CsrKit library.
///
/// Fatal conditions abort a request build immediately. Soft conditions
/// (unknown subject-alternative-name prefixes, unknown extension names) are
/// not errors at all: the offending entry is dropped and, where it names a
/// recognized kind, a warning is logged.
#[derive(Debug, Error, Clone)]
pub enum CsrKitError {
    /// A distinguished name key outside the supported attribute table.
    #[error("unsupported distinguished name attribute: {0}")]
    UnsupportedAttribute(String),

    /// A supported attribute was given a value violating its constraints.
    #[error("invalid distinguished name attribute value: {0}")]
    InvalidAttributeValue(String),

    /// A malformed IP address literal in a subject alternative name entry.
    #[error("invalid IP address literal: {0}")]
    InvalidAddress(String),

    /// An extension builder produced no content where content was required.
    #[error("extension {0} produced no content")]
    EmptyExtension(String),

    /// Error during key generation.
    #[error("key generation error: {0}")]
    KeyGeneration(String),

    /// The key provider failed to produce or verify a signature.
    #[error("signing error: {0}")]
    Signing(String),

    /// Incompatible option combination.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Error during data encoding.
    #[error("failed to encode data: {0}")]
    Encoding(String),

    /// The output file could not be written. The encoded artifact already
    /// exists at this point, so callers may retry the write without
    /// rebuilding the request.
    #[error("failed to write output: {0}")]
    Io(String),
}

impl From<rsa::Error> for CsrKitError {
    fn from(err: rsa::Error) -> Self {
        CsrKitError::KeyGeneration(err.to_string())
    }
}

impl From<pkcs8::Error> for CsrKitError {
    fn from(err: pkcs8::Error) -> Self {
        CsrKitError::Encoding(err.to_string())
    }
}
