//! # Service Configuration
//!
//! The service base URL is resolved once per process, in order:
//!
//! 1. `RCBEAM_API_URL` in the runtime environment
//! 2. `RCBEAM_API_URL` baked in at build time (the only source on WASM)
//! 3. [`DEFAULT_BASE_URL`]

use std::time::Duration;

use once_cell::sync::Lazy;

/// Environment variable naming the service base URL
pub const API_URL_ENV: &str = "RCBEAM_API_URL";

/// Environment variable with an optional request timeout in seconds
pub const TIMEOUT_ENV: &str = "RCBEAM_TIMEOUT_SECS";

/// Local development service address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

static BASE_URL: Lazy<String> = Lazy::new(|| {
    let runtime = std::env::var(API_URL_ENV).ok();
    let resolved = resolve_base_url(runtime.as_deref(), option_env!("RCBEAM_API_URL"));
    tracing::debug!(base_url = %resolved, "resolved service base URL");
    resolved
});

/// Base URL for this process
pub fn base_url() -> &'static str {
    &BASE_URL
}

/// Pick the first non-blank candidate, falling back to the default.
/// Trailing slashes are dropped so paths can be appended directly.
pub fn resolve_base_url(runtime: Option<&str>, build_time: Option<&str>) -> String {
    [runtime, build_time]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Parse a timeout in whole or fractional seconds. Blank, zero or
/// unparseable values mean no timeout.
pub fn parse_timeout(raw: Option<&str>) -> Option<Duration> {
    let secs: f64 = raw?.trim().parse().ok()?;
    (secs.is_finite() && secs > 0.0).then(|| Duration::from_secs_f64(secs))
}

/// Settings for [`crate::client::ServiceClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Unset means the request waits as long as the transport allows
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: base_url().to_string(),
            timeout: parse_timeout(std::env::var(TIMEOUT_ENV).ok().as_deref()),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: resolve_base_url(Some(base_url.as_ref()), None),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
