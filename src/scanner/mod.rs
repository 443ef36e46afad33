//! Requester: one GET with the diagnostics pragma, headers handed to the
//! extractor.
//!
//! A scan is a single request/response exchange. Transport problems abort it
//! with a [`ScanError`]; anything wrong with individual headers is returned
//! as [`FieldError`]s next to a best-effort record.
//!
//! By default there is no timeout, matching a plain blocking client: a
//! target that never answers keeps the scan waiting. Set
//! `ScanConfig::timeout_secs` (or call [`Scanner::with_timeout`]) to bound
//! it, and use [`Scanner::scan_until`] to cancel from the outside.

use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::header::PRAGMA;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::error::{FieldError, ScanError};
use crate::pragma::{extract_pragma, CacheDiagnostics, HeaderSet};

/// Result of a completed HTTP exchange
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    /// URL as given by the caller
    pub target: String,
    /// URL after client-side redirects
    pub final_url: String,
    pub status: u16,
    #[serde(skip)]
    pub elapsed: Duration,
    pub diagnostics: CacheDiagnostics,
    pub field_errors: Vec<FieldError>,
}

impl ScanOutcome {
    pub fn has_field_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }
}

/// Issues pragma diagnostic requests.
#[derive(Debug, Clone)]
pub struct Scanner {
    client: reqwest::Client,
    pragma: String,
    timeout: Option<Duration>,
}

impl Scanner {
    /// Build a scanner from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Client` if the HTTP client cannot be created
    /// (e.g. a user agent that is not a valid header value).
    pub fn new(config: &ScanConfig) -> Result<Self, ScanError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ScanError::Client(e.to_string()))?;

        Ok(Self {
            client,
            pragma: config.pragma.clone(),
            timeout: config.timeout(),
        })
    }

    /// Override the request timeout (`None` waits indefinitely)
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Scan `target`, waiting as long as the configured timeout allows.
    pub async fn scan(&self, target: &str) -> Result<ScanOutcome, ScanError> {
        self.scan_until(target, std::future::pending::<()>()).await
    }

    /// Scan `target`, giving up with `ScanError::Cancelled` as soon as
    /// `cancel` completes.
    pub async fn scan_until<F>(&self, target: &str, cancel: F) -> Result<ScanOutcome, ScanError>
    where
        F: Future<Output = ()>,
    {
        let started = Instant::now();
        debug!(url = %target, pragma = %self.pragma, "sending scan request");

        let response = tokio::select! {
            result = self.send(target) => result?,
            _ = cancel => {
                warn!(url = %target, "scan cancelled before a response arrived");
                return Err(ScanError::Cancelled { url: target.to_string() });
            }
        };
        let elapsed = started.elapsed();

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = HeaderSet::from(response.headers());
        // The body is never read; dropping the response releases the connection
        drop(response);

        info!(
            url = %target,
            final_url = %final_url,
            status,
            elapsed_ms = elapsed.as_millis() as u64,
            header_count = headers.len(),
            "received scan response"
        );

        let (diagnostics, field_errors) = extract_pragma(&headers);
        for err in &field_errors {
            warn!(field = err.field.name(), header = err.header, "{}", err);
        }

        Ok(ScanOutcome {
            target: target.to_string(),
            final_url,
            status,
            elapsed,
            diagnostics,
            field_errors,
        })
    }

    async fn send(&self, target: &str) -> Result<reqwest::Response, ScanError> {
        let request = self
            .client
            .get(target)
            .header(PRAGMA, self.pragma.as_str())
            .send();

        let result = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, request)
                .await
                .map_err(|_| ScanError::Timeout {
                    url: target.to_string(),
                    timeout,
                })?,
            None => request.await,
        };

        result.map_err(|e| ScanError::from_reqwest(target, e))
    }
}

/// Scan `target` with default settings.
pub async fn scan(target: &str) -> Result<ScanOutcome, ScanError> {
    Scanner::new(&ScanConfig::default())?.scan(target).await
}
