// Constants module - centralized default values
//
// Header names and request defaults shared by the scanner, the extractor
// and the configuration loader live here instead of being repeated as
// string literals.

// =============================================================================
// Request defaults
// =============================================================================

/// Request header used to ask the CDN for its cache diagnostics
pub const PRAGMA_HEADER: &str = "Pragma";

/// Pragma value that enables every X-HW-Cache-* diagnostic header
pub const DEFAULT_PRAGMA_VALUE: &str = "X-HW-Cache-All";

/// User agent sent with every scan request
pub const DEFAULT_USER_AGENT: &str = concat!("hw-pragma-scan/", env!("CARGO_PKG_VERSION"));

/// Default config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "hw-pragma-scan.yaml";

// =============================================================================
// Report defaults
// =============================================================================

/// Seconds per minute, for TTL breakdowns
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Seconds per hour, for TTL breakdowns
pub const SECONDS_PER_HOUR: i64 = 60 * 60;

// =============================================================================
// Exit codes
// =============================================================================

/// Scan could not be performed (transport, config or cancellation failure)
pub const EXIT_SCAN_FAILED: i32 = 1;

/// Scan completed but some fields failed to extract (strict mode only)
pub const EXIT_FIELD_ERRORS: i32 = 2;
