// Error types module

use std::fmt;
use std::time::Duration;

use crate::pragma::Field;

/// Fatal errors for a single scan.
///
/// Any of these means the HTTP exchange did not complete, so no
/// `CacheDiagnostics` record exists and no report is produced.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The HTTP client could not be built (TLS backend, bad user agent, etc.)
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// The request could not be constructed (malformed URL, bad header value)
    #[error("Invalid request for '{url}': {message}")]
    InvalidRequest { url: String, message: String },

    /// DNS, connect, TLS or protocol failure while talking to the target
    #[error("Transport error for '{url}': {message}")]
    Transport { url: String, message: String },

    /// No response within the configured timeout
    #[error("Request to '{url}' timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// The caller cancelled the scan before a response arrived
    #[error("Scan of '{url}' was cancelled")]
    Cancelled { url: String },
}

impl ScanError {
    /// Map a reqwest failure into the scan taxonomy.
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_builder() {
            ScanError::InvalidRequest {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            ScanError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

/// Why a single field could not be populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Integer header present but not a base-10 integer
    ConversionFailed,
    /// Core header absent from the response
    MissingRequiredHeader,
    /// Schema row declares a kind the field cannot store
    KindMismatch,
}

/// Per-field extraction failure.
///
/// Non-fatal: the extractor records one of these and keeps going, leaving
/// the field at its default.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: Field,
    pub header: &'static str,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn conversion_failed(field: Field, header: &'static str) -> Self {
        Self {
            field,
            header,
            kind: FieldErrorKind::ConversionFailed,
        }
    }

    pub fn missing_required(field: Field, header: &'static str) -> Self {
        Self {
            field,
            header,
            kind: FieldErrorKind::MissingRequiredHeader,
        }
    }

    pub fn kind_mismatch(field: Field, header: &'static str) -> Self {
        Self {
            field,
            header,
            kind: FieldErrorKind::KindMismatch,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FieldErrorKind::ConversionFailed => write!(
                f,
                "failed to convert {} (header {}): conversion failed",
                self.field.name(),
                self.header
            ),
            FieldErrorKind::MissingRequiredHeader => write!(
                f,
                "missing required header {} for {}",
                self.header,
                self.field.name()
            ),
            FieldErrorKind::KindMismatch => write!(
                f,
                "schema kind for {} (header {}) does not match its storage",
                self.field.name(),
                self.header
            ),
        }
    }
}

impl std::error::Error for FieldError {}
