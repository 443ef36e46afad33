//! Cache-Control interpretation for the scan report.
//!
//! The extractor stores `Cache-Control` verbatim. This module reads those
//! raw values back into directives so the report can say what a browser or
//! shared cache will do with the response:
//! - `no-store`: response is never stored
//! - `no-cache`: stored, but revalidated before every use
//! - `private`: browser only, shared caches skip it
//! - `max-age` / `s-maxage`: freshness lifetime in seconds
//!
//! # Example
//!
//! ```rust
//! use hw_pragma_scan::cache::CacheControl;
//!
//! let cc = CacheControl::from_values(&["public".to_string(), "max-age=3600".to_string()]);
//! assert_eq!(cc.max_age, Some(3600));
//! assert_eq!(cc.describe(), "public, fresh for 1h0m0s");
//! ```

use super::format_seconds;

/// Cache-Control directives relevant to diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheControl {
    /// max-age in seconds
    pub max_age: Option<i64>,

    /// s-maxage in seconds, overrides max-age for shared caches
    pub s_maxage: Option<i64>,

    pub no_store: bool,
    pub no_cache: bool,
    pub private: bool,
    pub public: bool,
    pub must_revalidate: bool,
    pub immutable: bool,
}

impl CacheControl {
    /// Parse one Cache-Control header value.
    ///
    /// Directives are comma separated and case-insensitive. Unknown
    /// directives and unparseable ages are ignored.
    pub fn parse(header_value: &str) -> Self {
        let mut result = Self::default();
        result.merge(header_value);
        result
    }

    /// Parse every value of a repeated Cache-Control header.
    pub fn from_values(values: &[String]) -> Self {
        let mut result = Self::default();
        for value in values {
            result.merge(value);
        }
        result
    }

    fn merge(&mut self, header_value: &str) {
        for directive in header_value.split(',') {
            let directive = directive.trim().to_lowercase();
            if directive.is_empty() {
                continue;
            }

            if let Some((name, value)) = directive.split_once('=') {
                let seconds = value.trim().trim_matches('"').parse::<i64>().ok();
                match name.trim() {
                    "max-age" => self.max_age = seconds.or(self.max_age),
                    "s-maxage" => self.s_maxage = seconds.or(self.s_maxage),
                    _ => {}
                }
            } else {
                match directive.as_str() {
                    "no-store" => self.no_store = true,
                    "no-cache" => self.no_cache = true,
                    "private" => self.private = true,
                    "public" => self.public = true,
                    "must-revalidate" => self.must_revalidate = true,
                    "immutable" => self.immutable = true,
                    _ => {}
                }
            }
        }
    }

    /// Freshness lifetime a shared cache (the CDN edge) would apply
    pub fn shared_max_age(&self) -> Option<i64> {
        self.s_maxage.or(self.max_age)
    }

    /// True when the response is stale as soon as it is received
    pub fn is_immediately_stale(&self) -> bool {
        self.no_cache || self.max_age == Some(0)
    }

    /// One-line human summary for the report
    pub fn describe(&self) -> String {
        if self.no_store {
            return "not stored (no-store)".to_string();
        }

        let mut parts = Vec::new();
        if self.private {
            parts.push("private".to_string());
        } else if self.public {
            parts.push("public".to_string());
        }

        if self.no_cache {
            parts.push("revalidate on every use".to_string());
        } else if let Some(max_age) = self.max_age {
            if max_age == 0 {
                parts.push("stale immediately".to_string());
            } else {
                parts.push(format!("fresh for {}", format_seconds(max_age)));
            }
        }

        if let Some(s_maxage) = self.s_maxage {
            parts.push(format!("shared caches {}", format_seconds(s_maxage)));
        }
        if self.must_revalidate {
            parts.push("must-revalidate".to_string());
        }
        if self.immutable {
            parts.push("immutable".to_string());
        }

        if parts.is_empty() {
            "no directives".to_string()
        } else {
            parts.join(", ")
        }
    }
}
