//! Rendering of a completed scan, as text tables or JSON.

pub mod table;

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{elapsed_since, format_seconds, CacheControl, TtlBreakdown};
use crate::constants::{EXIT_FIELD_ERRORS, EXIT_SCAN_FAILED};
use crate::error::{FieldError, ScanError};
use crate::pragma::CacheDiagnostics;
use crate::scanner::ScanOutcome;
use table::Table;

/// Output format for the report on stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Seconds since each X-HW-Cache-* timestamp, at report time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ages {
    pub last_modified: i64,
    pub originated: i64,
    pub last_refresh: i64,
    pub last_request: i64,
}

impl Ages {
    pub fn new(record: &CacheDiagnostics, now: DateTime<Utc>) -> Self {
        Self {
            last_modified: elapsed_since(now, record.cache_last_modified_epoch),
            originated: elapsed_since(now, record.cache_originated_epoch),
            last_refresh: elapsed_since(now, record.cache_last_refresh_epoch),
            last_request: elapsed_since(now, record.cache_last_request_epoch),
        }
    }
}

/// A scan outcome plus the values derived from it at `generated_at`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub target: &'a str,
    pub final_url: &'a str,
    pub status: u16,
    pub elapsed_ms: u64,
    pub generated_at: DateTime<Utc>,
    pub ttl: TtlBreakdown,
    pub ages_seconds: Ages,
    pub diagnostics: &'a CacheDiagnostics,
    pub field_errors: &'a [FieldError],
}

impl<'a> Report<'a> {
    pub fn new(outcome: &'a ScanOutcome, now: DateTime<Utc>) -> Self {
        let diagnostics = &outcome.diagnostics;
        Self {
            target: &outcome.target,
            final_url: &outcome.final_url,
            status: outcome.status,
            elapsed_ms: outcome.elapsed.as_millis() as u64,
            generated_at: now,
            ttl: TtlBreakdown::from_seconds(diagnostics.cache_ttl_seconds),
            ages_seconds: Ages::new(diagnostics, now),
            diagnostics,
            field_errors: &outcome.field_errors,
        }
    }

    pub fn render<W: Write>(&self, format: ReportFormat, out: &mut W) -> io::Result<()> {
        match format {
            ReportFormat::Text => self.render_text(out),
            ReportFormat::Json => self.render_json(out),
        }
    }

    pub fn render_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }

    pub fn render_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let d = self.diagnostics;

        writeln!(out, "Scanned: {}", self.target)?;
        if self.final_url != self.target {
            writeln!(out, "Resolved: {}", self.final_url)?;
        }
        writeln!(out, "Status: {} ({} ms)", self.status, self.elapsed_ms)?;

        let mut ttl = Table::new(["Field", "TTL (seconds)", "TTL (minutes)", "TTL (hours)"]);
        ttl.row([
            "CDN Cache".to_string(),
            self.ttl.seconds.to_string(),
            self.ttl.minutes.to_string(),
            self.ttl.hours.to_string(),
        ]);
        ttl.render(out)?;

        let mut headers = Table::new(["Field", "Value"]);
        headers
            .row(["File Size".to_string(), d.cache_file_size_bytes.to_string()])
            .row([
                "Access-Control-Allow-Origin".to_string(),
                d.access_control_allow_origin.concat(),
            ])
            .row(["Cache-Control".to_string(), d.cache_control.join(",")])
            .row(["Content-Type".to_string(), d.content_type.concat()])
            .row([
                "X-HW-Cache-Compressed-Size".to_string(),
                d.cache_compressed_size.to_string(),
            ])
            .row(["X-HW-Cache-Behavior".to_string(), d.cache_behavior.concat()])
            .row([
                "X-HW-Cache-Last-Modified".to_string(),
                format_seconds(self.ages_seconds.last_modified),
            ])
            .row([
                "X-HW-Cache-Originated".to_string(),
                format_seconds(self.ages_seconds.originated),
            ])
            .row([
                "X-HW-Cache-Last-Refresh".to_string(),
                format_seconds(self.ages_seconds.last_refresh),
            ])
            .row([
                "X-HW-Cache-Last-Request".to_string(),
                format_seconds(self.ages_seconds.last_request),
            ]);
        headers.render(out)?;

        writeln!(out, "X-HW: {}", d.cache_tag.join(","))?;
        writeln!(
            out,
            "Browser cache: {}",
            CacheControl::from_values(&d.cache_control).describe()
        )?;

        if !self.field_errors.is_empty() {
            writeln!(out, "Field errors ({}):", self.field_errors.len())?;
            for err in self.field_errors {
                writeln!(out, "  - {}", err)?;
            }
        }

        Ok(())
    }
}

/// Line printed ahead of a text report once the exchange has completed
pub const COMPLETE_MARKER: &str = "complete";

/// Write the stdout output for a completed scan.
///
/// Text reports are preceded by the `complete` marker line; JSON output is
/// left bare so stdout stays a single JSON document.
pub fn write_outcome<W: Write>(
    outcome: &ScanOutcome,
    format: ReportFormat,
    now: DateTime<Utc>,
    out: &mut W,
) -> io::Result<()> {
    if format == ReportFormat::Text {
        writeln!(out, "{}", COMPLETE_MARKER)?;
    }
    Report::new(outcome, now).render(format, out)
}

/// Process exit status for a scan result.
///
/// A failed exchange is always `EXIT_SCAN_FAILED`. A completed one is 0,
/// unless `strict` is set and some field failed to extract.
pub fn exit_code(result: &Result<ScanOutcome, ScanError>, strict: bool) -> i32 {
    match result {
        Err(_) => EXIT_SCAN_FAILED,
        Ok(outcome) if strict && outcome.has_field_errors() => EXIT_FIELD_ERRORS,
        Ok(_) => 0,
    }
}
