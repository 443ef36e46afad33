//! Pragma cache diagnostics: the header schema, the typed record, and the
//! extractor that maps one onto the other.
//!
//! # Example
//!
//! ```rust
//! use hw_pragma_scan::pragma::{extract_pragma, HeaderSet};
//!
//! let headers: HeaderSet = [("x-hw-cache-ttl", "7230"), ("X-HW-Cache-Key", "abc123")]
//!     .into_iter()
//!     .collect();
//! let (record, errors) = extract_pragma(&headers);
//! assert_eq!(record.cache_ttl_seconds, 7230);
//! assert_eq!(record.cache_key, vec!["abc123".to_string()]);
//! // the remaining core headers are absent
//! assert_eq!(errors.len(), 7);
//! ```

pub mod diagnostics;
pub mod extract;
pub mod schema;

pub use diagnostics::{CacheDiagnostics, CompressedSize};
pub use extract::{extract, extract_pragma, HeaderSet};
pub use schema::{Field, FieldKind, FieldSpec, SCHEMA};
