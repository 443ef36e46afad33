//! Static field → header mapping for the pragma diagnostics record.
//!
//! Each entry ties one `CacheDiagnostics` field to the response header it
//! is read from, the type it is coerced to, and whether its absence is an
//! error. The table is the single source of truth for the extractor.

use serde::Serialize;

/// How a header value is stored in the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// All values kept verbatim, in response order
    Strings,
    /// First value parsed as a base-10 integer
    Integer,
    /// First value kept as an integer when it parses, otherwise as text
    Untyped,
}

/// One field of `CacheDiagnostics`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Connection,
    AcceptRanges,
    ContentLength,
    ContentType,
    ContentMd5,
    CacheControl,
    AccessControlAllowHeaders,
    AccessControlExposeHeaders,
    AccessControlAllowMethods,
    AccessControlAllowOrigin,
    CacheTag,
    CacheKey,
    CacheFileName,
    CacheTtlSeconds,
    CacheCrc,
    CacheLastModifiedEpoch,
    CacheOriginatedEpoch,
    CacheLastRefreshEpoch,
    CacheLastRequestEpoch,
    CacheMimeType,
    CacheHeadersRaw,
    CacheFileSizeBytes,
    CacheCompressedSize,
    CacheControlExtended,
    CacheBehavior,
}

impl Field {
    /// Record field name, as used in reports and JSON output
    pub fn name(self) -> &'static str {
        match self {
            Field::Connection => "connection",
            Field::AcceptRanges => "accept_ranges",
            Field::ContentLength => "content_length",
            Field::ContentType => "content_type",
            Field::ContentMd5 => "content_md5",
            Field::CacheControl => "cache_control",
            Field::AccessControlAllowHeaders => "access_control_allow_headers",
            Field::AccessControlExposeHeaders => "access_control_expose_headers",
            Field::AccessControlAllowMethods => "access_control_allow_methods",
            Field::AccessControlAllowOrigin => "access_control_allow_origin",
            Field::CacheTag => "cache_tag",
            Field::CacheKey => "cache_key",
            Field::CacheFileName => "cache_file_name",
            Field::CacheTtlSeconds => "cache_ttl_seconds",
            Field::CacheCrc => "cache_crc",
            Field::CacheLastModifiedEpoch => "cache_last_modified_epoch",
            Field::CacheOriginatedEpoch => "cache_originated_epoch",
            Field::CacheLastRefreshEpoch => "cache_last_refresh_epoch",
            Field::CacheLastRequestEpoch => "cache_last_request_epoch",
            Field::CacheMimeType => "cache_mime_type",
            Field::CacheHeadersRaw => "cache_headers_raw",
            Field::CacheFileSizeBytes => "cache_file_size_bytes",
            Field::CacheCompressedSize => "cache_compressed_size",
            Field::CacheControlExtended => "cache_control_extended",
            Field::CacheBehavior => "cache_behavior",
        }
    }

    /// Schema entry for this field
    pub fn spec(self) -> &'static FieldSpec {
        // SCHEMA is declared in enum order
        &SCHEMA[self as usize]
    }
}

/// Schema row: field, source header, storage kind, required flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub header: &'static str,
    pub kind: FieldKind,
    /// Core fields report `MissingRequiredHeader` when absent
    pub required: bool,
}

const fn optional(field: Field, header: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        field,
        header,
        kind,
        required: false,
    }
}

const fn required(field: Field, header: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        field,
        header,
        kind,
        required: true,
    }
}

/// The pragma diagnostics schema, one row per `Field` variant, in
/// declaration order.
pub static SCHEMA: &[FieldSpec] = &[
    optional(Field::Connection, "Connection", FieldKind::Strings),
    optional(Field::AcceptRanges, "Accept-Ranges", FieldKind::Strings),
    optional(Field::ContentLength, "Content-Length", FieldKind::Integer),
    optional(Field::ContentType, "Content-Type", FieldKind::Strings),
    optional(Field::ContentMd5, "Content-MD5", FieldKind::Strings),
    optional(Field::CacheControl, "Cache-Control", FieldKind::Strings),
    optional(
        Field::AccessControlAllowHeaders,
        "Access-Control-Allow-Headers",
        FieldKind::Strings,
    ),
    optional(
        Field::AccessControlExposeHeaders,
        "Access-Control-Expose-Headers",
        FieldKind::Strings,
    ),
    optional(
        Field::AccessControlAllowMethods,
        "Access-Control-Allow-Methods",
        FieldKind::Strings,
    ),
    optional(
        Field::AccessControlAllowOrigin,
        "Access-Control-Allow-Origin",
        FieldKind::Strings,
    ),
    required(Field::CacheTag, "X-HW", FieldKind::Strings),
    required(Field::CacheKey, "X-HW-Cache-Key", FieldKind::Strings),
    required(Field::CacheFileName, "X-HW-Cache-File-Name", FieldKind::Strings),
    optional(Field::CacheTtlSeconds, "X-HW-Cache-TTL", FieldKind::Integer),
    optional(Field::CacheCrc, "X-HW-Cache-CRC", FieldKind::Integer),
    optional(
        Field::CacheLastModifiedEpoch,
        "X-HW-Cache-Last-Modified",
        FieldKind::Integer,
    ),
    optional(
        Field::CacheOriginatedEpoch,
        "X-HW-Cache-Originated",
        FieldKind::Integer,
    ),
    optional(
        Field::CacheLastRefreshEpoch,
        "X-HW-Cache-Last-Refresh",
        FieldKind::Integer,
    ),
    optional(
        Field::CacheLastRequestEpoch,
        "X-HW-Cache-Last-Request",
        FieldKind::Integer,
    ),
    required(Field::CacheMimeType, "X-HW-Cache-Mime-Type", FieldKind::Strings),
    required(Field::CacheHeadersRaw, "X-HW-Cache-Headers", FieldKind::Strings),
    optional(
        Field::CacheFileSizeBytes,
        "X-HW-Cache-File-Size",
        FieldKind::Integer,
    ),
    required(
        Field::CacheCompressedSize,
        "X-HW-Cache-Compressed-Size",
        FieldKind::Untyped,
    ),
    required(Field::CacheControlExtended, "X-HW-Cache-Control", FieldKind::Strings),
    required(Field::CacheBehavior, "X-HW-Cache-Behavior", FieldKind::Strings),
];
