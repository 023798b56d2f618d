// src/checker/mod.rs
// =============================================================================
// This module contains all redirect checking logic.
//
// Submodules:
// - http: Fetches a URL (HEAD, falling back to GET) and records the redirect chain
// - evaluate: Compares a fetch against a rule and builds the CheckResult
// - progress: Thread-safe progress counter and status lines
// - engine: Runs all rules with bounded concurrency
//
// This file (mod.rs) is the module root - it re-exports the public API so
// the rest of the app can write `checker::check_all()`.
// =============================================================================

mod engine;
mod evaluate;
mod http;
mod progress;

pub use engine::{build_client, check_all};
pub use evaluate::CheckResult;
pub use progress::ProgressReporter;
