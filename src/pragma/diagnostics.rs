//! The typed cache diagnostics record.

use serde::Serialize;
use std::fmt;

use super::schema::Field;

/// Value of `X-HW-Cache-Compressed-Size`.
///
/// The CDN does not commit to a type for this header, so it is kept as a
/// tagged union instead of being coerced like the other integer fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CompressedSize {
    #[default]
    Absent,
    Integer(i64),
    Text(String),
}

impl CompressedSize {
    /// Classify a raw header value
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => CompressedSize::Integer(n),
            Err(_) => CompressedSize::Text(raw.to_string()),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CompressedSize::Absent)
    }
}

impl fmt::Display for CompressedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressedSize::Absent => f.write_str("<absent>"),
            CompressedSize::Integer(n) => write!(f, "{}", n),
            CompressedSize::Text(s) => f.write_str(s),
        }
    }
}

/// Snapshot of the CDN cache metadata returned for one response.
///
/// String-list fields hold every value the header carried, in order.
/// Integer fields default to 0 when the header is absent or malformed; the
/// accompanying `FieldError` list tells the two apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheDiagnostics {
    pub connection: Vec<String>,
    pub accept_ranges: Vec<String>,
    pub content_length: i64,
    pub content_type: Vec<String>,
    pub content_md5: Vec<String>,
    pub cache_control: Vec<String>,
    pub access_control_allow_headers: Vec<String>,
    pub access_control_expose_headers: Vec<String>,
    pub access_control_allow_methods: Vec<String>,
    pub access_control_allow_origin: Vec<String>,

    /// `X-HW` cache tag
    pub cache_tag: Vec<String>,
    pub cache_key: Vec<String>,
    pub cache_file_name: Vec<String>,
    pub cache_ttl_seconds: i64,
    pub cache_crc: i64,

    // Unix timestamps (seconds)
    pub cache_last_modified_epoch: i64,
    pub cache_originated_epoch: i64,
    pub cache_last_refresh_epoch: i64,
    pub cache_last_request_epoch: i64,

    pub cache_mime_type: Vec<String>,
    /// Semicolon-delimited `Name=value` blob, kept unparsed
    pub cache_headers_raw: Vec<String>,
    pub cache_file_size_bytes: i64,
    pub cache_compressed_size: CompressedSize,
    pub cache_control_extended: Vec<String>,
    pub cache_behavior: Vec<String>,
}

impl CacheDiagnostics {
    /// Storage slot for a string-list field, `None` for other fields
    pub(crate) fn strings_mut(&mut self, field: Field) -> Option<&mut Vec<String>> {
        let slot = match field {
            Field::Connection => &mut self.connection,
            Field::AcceptRanges => &mut self.accept_ranges,
            Field::ContentType => &mut self.content_type,
            Field::ContentMd5 => &mut self.content_md5,
            Field::CacheControl => &mut self.cache_control,
            Field::AccessControlAllowHeaders => &mut self.access_control_allow_headers,
            Field::AccessControlExposeHeaders => &mut self.access_control_expose_headers,
            Field::AccessControlAllowMethods => &mut self.access_control_allow_methods,
            Field::AccessControlAllowOrigin => &mut self.access_control_allow_origin,
            Field::CacheTag => &mut self.cache_tag,
            Field::CacheKey => &mut self.cache_key,
            Field::CacheFileName => &mut self.cache_file_name,
            Field::CacheMimeType => &mut self.cache_mime_type,
            Field::CacheHeadersRaw => &mut self.cache_headers_raw,
            Field::CacheControlExtended => &mut self.cache_control_extended,
            Field::CacheBehavior => &mut self.cache_behavior,
            _ => return None,
        };
        Some(slot)
    }

    /// Storage slot for an integer field, `None` for other fields
    pub(crate) fn integer_mut(&mut self, field: Field) -> Option<&mut i64> {
        let slot = match field {
            Field::ContentLength => &mut self.content_length,
            Field::CacheTtlSeconds => &mut self.cache_ttl_seconds,
            Field::CacheCrc => &mut self.cache_crc,
            Field::CacheLastModifiedEpoch => &mut self.cache_last_modified_epoch,
            Field::CacheOriginatedEpoch => &mut self.cache_originated_epoch,
            Field::CacheLastRefreshEpoch => &mut self.cache_last_refresh_epoch,
            Field::CacheLastRequestEpoch => &mut self.cache_last_request_epoch,
            Field::CacheFileSizeBytes => &mut self.cache_file_size_bytes,
            _ => return None,
        };
        Some(slot)
    }
}
