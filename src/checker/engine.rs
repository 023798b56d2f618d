// src/checker/engine.rs
// =============================================================================
// Runs every redirect rule through the checker with bounded concurrency.
//
// How it works:
// 1. One HTTP client (and its connection pool) is built for the whole run
// 2. Each rule becomes a future: fetch -> evaluate -> report progress
// 3. buffer_unordered keeps at most `workers` of them in flight
// 4. Results are collected as they finish (completion order, not input order)
//
// A check never fails as a whole: every problem ends up inside its
// CheckResult, so one bad rule cannot abort the batch.
// =============================================================================

use futures::stream::{self, StreamExt};
use reqwest::Client;

use super::evaluate::{evaluate, from_failure, CheckResult};
use super::http::fetch_with_fallback;
use super::progress::ProgressReporter;
use crate::config::{CheckSettings, USER_AGENT};
use crate::rules::RedirectRule;

// Builds the HTTP client shared by all checks in a run
//
// Redirects are disabled: the checker follows them itself to record each hop.
pub fn build_client(settings: &CheckSettings) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(settings.timeout)
        .connect_timeout(settings.timeout)
        .pool_max_idle_per_host(settings.pool_size)
        .redirect(reqwest::redirect::Policy::none())
        .build()
}

// Checks all rules concurrently and returns one result per rule
//
// Parameters:
//   client: shared HTTP client from build_client
//   rules: the rules to verify (ownership moves in, each rule is used once)
//   settings: worker count, timeout, hop limit
//   progress: shared reporter, called exactly once per rule
pub async fn check_all(
    client: &Client,
    rules: Vec<RedirectRule>,
    settings: &CheckSettings,
    progress: &ProgressReporter,
) -> Vec<CheckResult> {
    let workers = settings.workers.max(1);

    stream::iter(rules)
        .map(|rule| async move { check_rule(client, &rule, settings, progress).await })
        .buffer_unordered(workers)
        .collect()
        .await
}

// Runs one rule to completion and reports it
pub async fn check_rule(
    client: &Client,
    rule: &RedirectRule,
    settings: &CheckSettings,
    progress: &ProgressReporter,
) -> CheckResult {
    let (result, line) = match fetch_with_fallback(client, &rule.source, settings).await {
        Ok(outcome) => {
            let first_status = outcome.first_hop().status;
            let line = if outcome.redirected() {
                format!("[{}] {} → {}", first_status, rule.source, outcome.last.url)
            } else {
                format!("[{}] {}", first_status, rule.source)
            };
            (evaluate(rule, &outcome), line)
        }
        Err(failure) => {
            let line = format!("[ERROR {}] {}", failure.keyword(), rule.source);
            (from_failure(rule, &failure), line)
        }
    };

    progress.record(&line);
    result
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why buffer_unordered instead of spawning a task per rule?
//    - It caps how many requests hit the server at once
//    - Rules wait in the stream until a slot frees up
//    - Results come back in whatever order they finish
//
// 2. Why pass &Client, &CheckSettings and &ProgressReporter around?
//    - They are created once in main and live for the whole run
//    - Borrowing them means no Arc and no cloning per check
//    - The futures can't outlive check_all, so the borrows are fine
//
// 3. What is `async move { ... }`?
//    - An async block that takes ownership of what it captures (the rule)
//    - The references it captures (client, settings, progress) are copied
// -----------------------------------------------------------------------------
