// src/rules/mod.rs
// =============================================================================
// This module supplies the redirect rules to check.
//
// Currently implements:
// - Reading a header-less CSV file (source, target, optional status code)
// - Resolving relative paths against the configured base URL
// =============================================================================

mod reader;

pub use reader::{read_rules, RedirectRule};
