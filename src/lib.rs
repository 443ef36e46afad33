// HW Pragma Scan Library
// Requests CDN cache diagnostics for one URL and maps them into a typed record

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pragma;
pub mod report;
pub mod scanner;

pub use error::{FieldError, FieldErrorKind, ScanError};
pub use pragma::{CacheDiagnostics, CompressedSize, Field, HeaderSet};
pub use scanner::{scan, ScanOutcome, Scanner};
