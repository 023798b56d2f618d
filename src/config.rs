// src/config.rs
// =============================================================================
// Static configuration and run settings.
//
// - BASE_URL: the site every relative path in the rule file is joined onto
// - Defaults for the CLI options and the HTTP client
// - CheckSettings: everything a single check needs to know, built once per run
// =============================================================================

use std::time::Duration;

/// Origin used to resolve relative source/target paths from the rule file.
///
/// Set this to the site whose redirects are being audited.
pub const BASE_URL: &str = "https://www.example.com";

/// Number of checks in flight at once.
pub const DEFAULT_WORKERS: usize = 40;

/// Per-request timeout in seconds (connect + response).
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Redirects followed before a chain is reported as a loop.
pub const MAX_REDIRECTS: usize = 30;

/// Idle connections kept per host in the shared pool.
pub const POOL_SIZE: usize = 100;

/// Expected status when the rule file leaves the column empty or unparseable.
pub const DEFAULT_EXPECTED_CODE: i64 = 301;

pub const USER_AGENT: &str = concat!("redirect-audit/", env!("CARGO_PKG_VERSION"));

// Settings shared (read-only) by every check in a run
#[derive(Debug, Clone)]
pub struct CheckSettings {
    /// Maximum number of checks running concurrently
    pub workers: usize,
    /// Bound on each individual request, including each redirect hop
    pub timeout: Duration,
    /// Hop limit for redirect following
    pub max_redirects: usize,
    /// Idle connections kept per host
    pub pool_size: usize,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_redirects: MAX_REDIRECTS,
            pool_size: POOL_SIZE,
        }
    }
}
