// src/rules/reader.rs
// =============================================================================
// This module reads redirect rules from a CSV file.
//
// File format (no header row):
//   source,target[,expected_code]
//
//   /old-page,/new-page
//   /promo,https://shop.example.com/,302
//
// Rules:
// - Rows with fewer than two columns are skipped
// - Rows whose source or target is blank are skipped
// - Relative paths are joined onto the base URL, absolute URLs are kept
// - A missing or non-numeric code means 301
//
// Rust concepts:
// - Generic readers: parse_rules works on a file or an in-memory string
// - anyhow::Context: attaches "which file?" to I/O errors
// =============================================================================

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use crate::config::DEFAULT_EXPECTED_CODE;

// One declared redirect: fetching `source` should answer `expected_code`
// and end up on `target`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    pub source: String,
    pub target: String,
    /// Kept as written, even when no server could ever answer it
    pub expected_code: i64,
}

// Reads all rules from a file
//
// Parameters:
//   path: CSV file without header
//   base: origin used for relative paths (e.g. "https://www.example.com")
//
// Returns: the rules in file order, or an error if the file can't be read
pub fn read_rules(path: &Path, base: &str) -> Result<Vec<RedirectRule>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open rule file {}", path.display()))?;
    parse_rules(file, base).with_context(|| format!("Failed to parse rule file {}", path.display()))
}

pub fn parse_rules<R: Read>(input: R, base: &str) -> Result<Vec<RedirectRule>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut rules = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() < 2 {
            continue;
        }

        let raw_source = record[0].trim();
        let raw_target = record[1].trim();
        if raw_source.is_empty() || raw_target.is_empty() {
            continue;
        }

        let expected_code = record
            .get(2)
            .and_then(|code| code.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_EXPECTED_CODE);

        rules.push(RedirectRule {
            source: build_full_url(raw_source, base),
            target: build_full_url(raw_target, base),
            expected_code,
        });
    }

    Ok(rules)
}

// Turns a path from the rule file into an absolute URL
//
// Examples (base = "https://x.com/"):
//   "old-page"        -> "https://x.com/old-page"
//   "/old-page"       -> "https://x.com/old-page"
//   "https://y.com/z" -> "https://y.com/z"
pub fn build_full_url(path: &str, base: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        return String::new();
    }

    let lower = path.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return path.to_string();
    }

    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
