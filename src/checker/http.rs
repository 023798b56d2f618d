// src/checker/http.rs
// =============================================================================
// This module performs the network part of a single redirect check.
//
// Key functionality:
// - Makes an HTTP HEAD request first (lightweight, no body download)
// - Follows redirects by hand so every hop's status and destination is kept
// - Falls back to GET when the server refuses HEAD or HEAD fails oddly
// - Classifies failures (timeout, connection, redirect loop, other)
//
// Why follow redirects manually?
// - reqwest's built-in policy only hands back the final response
// - We need the FIRST status in the chain (301 vs 302 matters here)
// - And the last couple of URLs when a chain never ends
//
// Rust concepts:
// - async/await: For network I/O
// - Result<T, E>: Success carries the chain, failure carries a CheckFailure
// - Enums with data: Each failure kind holds its own diagnostics
// =============================================================================

use std::time::Duration;

use log::{debug, warn};
use reqwest::header::LOCATION;
use reqwest::{Client, Method, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::CheckSettings;

// One response seen while following a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    /// HTTP status code of this response
    pub status: u16,
    /// The URL that was requested
    pub url: String,
    /// Absolute URL the Location header pointed at (redirects only)
    pub location: Option<String>,
}

// A fetch that ran to a non-redirect response
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Redirect responses, in the order they were received
    pub chain: Vec<Hop>,
    /// The final response
    pub last: Hop,
}

impl FetchOutcome {
    /// First response of the chain, or the final one when nothing redirected.
    pub fn first_hop(&self) -> &Hop {
        self.chain.first().unwrap_or(&self.last)
    }

    pub fn redirected(&self) -> bool {
        !self.chain.is_empty()
    }
}

// Why a check could not produce a response to evaluate
//
// The Display text is exactly what ends up in the report's Error column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckFailure {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection error")]
    Connection,

    #[error("redirect limit ({limit}) exceeded. {}", describe_loop(.previous_url.as_deref(), .last_url))]
    RedirectLoop {
        limit: usize,
        first_status: u16,
        /// URL requested by the second-to-last hop
        previous_url: Option<String>,
        /// Where the last hop pointed (its URL when it had no Location)
        last_url: String,
    },

    #[error("HTTP error: {kind}")]
    Request { kind: String },
}

impl CheckFailure {
    // Short keyword for the progress line
    pub fn keyword(&self) -> &str {
        match self {
            CheckFailure::Timeout(_) => "timeout",
            CheckFailure::Connection => "connection",
            CheckFailure::RedirectLoop { .. } => "redirect loop",
            CheckFailure::Request { kind } => kind.as_str(),
        }
    }

    // Builds the loop failure from the hops recorded so far.
    // Only the final two hops are inspected.
    fn redirect_loop(limit: usize, chain: &[Hop]) -> Self {
        let (first, last) = match (chain.first(), chain.last()) {
            (Some(first), Some(last)) => (first, last),
            // A loop is only detected after at least one hop was pushed
            _ => {
                return CheckFailure::Request {
                    kind: "Redirect".to_string(),
                }
            }
        };

        let previous_url = if chain.len() >= 2 {
            Some(chain[chain.len() - 2].url.clone())
        } else {
            None
        };

        CheckFailure::RedirectLoop {
            limit,
            first_status: first.status,
            previous_url,
            last_url: last.location.clone().unwrap_or_else(|| last.url.clone()),
        }
    }
}

fn describe_loop(previous_url: Option<&str>, last_url: &str) -> String {
    match previous_url {
        Some(previous) => format!("Possible loop: {} → {}", previous, last_url),
        None => format!("Possible loop, last URL: {}", last_url),
    }
}

// Checks one URL: HEAD first, GET when HEAD isn't good enough
//
// GET is tried once when HEAD lands directly on 405/501, or when HEAD fails
// with anything other than a timeout or a connection error.
//
// Parameters:
//   client: the shared HTTP client (redirects disabled, see engine::build_client)
//   url: absolute URL to fetch
//   settings: timeout and hop limit
//
// Returns: the redirect chain and final response, or why there is none
pub async fn fetch_with_fallback(
    client: &Client,
    url: &str,
    settings: &CheckSettings,
) -> Result<FetchOutcome, CheckFailure> {
    match follow_redirects(client, Method::HEAD, url, settings).await {
        // The server answered HEAD directly with "not supported"
        Ok(outcome) if !outcome.redirected() && is_method_rejected(outcome.last.status) => {
            debug!(
                "HEAD {} answered {}, retrying with GET",
                url, outcome.last.status
            );
            follow_redirects(client, Method::GET, url, settings).await
        }
        Ok(outcome) => Ok(outcome),
        // Timeouts and refused connections won't fare better with GET
        Err(failure @ (CheckFailure::Timeout(_) | CheckFailure::Connection)) => Err(failure),
        // Servers may route HEAD differently, so a HEAD loop still gets one GET
        Err(failure) => {
            debug!("HEAD {} failed ({}), retrying with GET", url, failure);
            follow_redirects(client, Method::GET, url, settings).await
        }
    }
}

fn is_method_rejected(status: u16) -> bool {
    status == StatusCode::METHOD_NOT_ALLOWED.as_u16() || status == StatusCode::NOT_IMPLEMENTED.as_u16()
}

// Only these statuses carry a Location we follow
fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

// Follows a redirect chain with the given method, recording every hop
async fn follow_redirects(
    client: &Client,
    method: Method,
    start_url: &str,
    settings: &CheckSettings,
) -> Result<FetchOutcome, CheckFailure> {
    let mut current = Url::parse(start_url).map_err(|_| CheckFailure::Request {
        kind: "InvalidUrl".to_string(),
    })?;
    let mut chain: Vec<Hop> = Vec::new();

    loop {
        let response = client
            .request(method.clone(), current.clone())
            .send()
            .await
            .map_err(|e| categorize_error(&e, settings.timeout))?;

        let status = response.status();
        let raw_location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        if !is_redirect(status) {
            return Ok(FetchOutcome {
                chain,
                last: Hop {
                    status: status.as_u16(),
                    url: current.to_string(),
                    location: None,
                },
            });
        }

        let Some(raw_location) = raw_location else {
            // Redirect status but nowhere to go: treat it as the final response
            warn!(
                "Redirect status {} for {} but no Location header",
                status.as_u16(),
                current
            );
            return Ok(FetchOutcome {
                chain,
                last: Hop {
                    status: status.as_u16(),
                    url: current.to_string(),
                    location: None,
                },
            });
        };

        // Location may be relative to the URL we just requested
        let next = current.join(&raw_location).map_err(|_| CheckFailure::Request {
            kind: "InvalidUrl".to_string(),
        })?;

        debug!("{} {} -> {} ({})", method, current, next, status.as_u16());

        chain.push(Hop {
            status: status.as_u16(),
            url: current.to_string(),
            location: Some(next.to_string()),
        });

        if chain.len() > settings.max_redirects {
            return Err(CheckFailure::redirect_loop(settings.max_redirects, &chain));
        }

        current = next;
    }
}

// Categorizes reqwest errors into our failure kinds
//
// Order matters: a connect timeout reports both is_timeout() and is_connect(),
// and we want it counted as a timeout.
fn categorize_error(error: &reqwest::Error, timeout: Duration) -> CheckFailure {
    if error.is_timeout() {
        CheckFailure::Timeout(timeout)
    } else if error.is_connect() {
        CheckFailure::Connection
    } else {
        CheckFailure::Request {
            kind: error_kind(error).to_string(),
        }
    }
}

fn error_kind(error: &reqwest::Error) -> &'static str {
    if error.is_builder() {
        "Builder"
    } else if error.is_redirect() {
        "Redirect"
    } else if error.is_status() {
        "Status"
    } else if error.is_body() {
        "Body"
    } else if error.is_decode() {
        "Decode"
    } else if error.is_request() {
        "Request"
    } else {
        "Other"
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is `let Some(x) = ... else { ... };`?
//    - A "let-else" statement
//    - If the pattern matches, x is bound and execution continues
//    - Otherwise the else block runs, and it must leave the function (return)
//
// 2. Why Url::join for the Location header?
//    - Servers may send "Location: /new-page" (relative)
//    - join() resolves it against the URL we just requested
//    - Absolute locations pass through unchanged
//
// 3. What does #[error(...)] do?
//    - It comes from the thiserror crate
//    - It generates the Display implementation for each enum variant
//    - `.field` inside the attribute refers to the variant's own fields
//
// 4. Why match guards (`Ok(outcome) if ...`)?
//    - They add a condition to a match arm
//    - The arm only matches when the pattern AND the condition hold
// -----------------------------------------------------------------------------
