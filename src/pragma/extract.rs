//! Header extraction: response headers + schema → `CacheDiagnostics`.

use std::collections::HashMap;

use http::HeaderMap;

use super::diagnostics::{CacheDiagnostics, CompressedSize};
use super::schema::{Field, FieldKind, FieldSpec, SCHEMA};
use crate::error::FieldError;

/// Response header mapping with case-insensitive lookup.
///
/// Names are folded to ASCII lowercase on insert; repeated headers keep
/// every value in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: HashMap<String, Vec<String>>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `name`
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.entries
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value.into());
    }

    /// All values for `name`, matched case-insensitively
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&HeaderMap> for HeaderSet {
    fn from(map: &HeaderMap) -> Self {
        let mut set = HeaderSet::new();
        for (name, value) in map {
            // Non-UTF-8 bytes are kept lossily rather than dropping the header
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            set.insert(name.as_str(), value);
        }
        set
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderSet
where
    N: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (name, value) in iter {
            set.insert(name.as_ref(), value);
        }
        set
    }
}

/// Populate a record from `headers` using the built-in pragma schema.
pub fn extract_pragma(headers: &HeaderSet) -> (CacheDiagnostics, Vec<FieldError>) {
    extract(headers, SCHEMA)
}

/// Populate a record from `headers` according to `schema`.
///
/// Every schema row is attempted. Failures never stop the pass: they are
/// collected into the returned error list and the affected field keeps its
/// default value.
///
/// - string-list fields store all header values verbatim
/// - integer fields parse the first value as base-10; a parse failure yields
///   `ConversionFailed` and leaves the field at 0
/// - the untyped compressed-size field is classified, never rejected
/// - an absent header is an error only for `required` rows
/// - a row whose `kind` the field cannot hold yields `KindMismatch`
pub fn extract(
    headers: &HeaderSet,
    schema: &[FieldSpec],
) -> (CacheDiagnostics, Vec<FieldError>) {
    let mut record = CacheDiagnostics::default();
    let mut errors = Vec::new();

    for spec in schema {
        let values = match headers.get(spec.header) {
            Some(values) if !values.is_empty() => values,
            _ => {
                if spec.required {
                    errors.push(FieldError::missing_required(spec.field, spec.header));
                }
                continue;
            }
        };

        let stored = match spec.kind {
            FieldKind::Strings => match record.strings_mut(spec.field) {
                Some(slot) => {
                    *slot = values.to_vec();
                    true
                }
                None => false,
            },
            FieldKind::Integer => match record.integer_mut(spec.field) {
                Some(slot) => {
                    match parse_integer(&values[0]) {
                        Some(n) => *slot = n,
                        None => {
                            tracing::debug!(
                                field = spec.field.name(),
                                header = spec.header,
                                value = %values[0],
                                "integer conversion failed"
                            );
                            errors.push(FieldError::conversion_failed(spec.field, spec.header));
                        }
                    }
                    true
                }
                None => false,
            },
            FieldKind::Untyped if spec.field == Field::CacheCompressedSize => {
                record.cache_compressed_size = CompressedSize::from_raw(&values[0]);
                true
            }
            FieldKind::Untyped => false,
        };

        if !stored {
            tracing::warn!(
                field = spec.field.name(),
                header = spec.header,
                kind = ?spec.kind,
                "schema kind does not match field storage"
            );
            errors.push(FieldError::kind_mismatch(spec.field, spec.header));
        }
    }

    (record, errors)
}

/// Base-10 integer with surrounding whitespace tolerated
fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
