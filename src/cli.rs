// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   redirect-audit <INPUT> <OUTPUT> [--workers N] [--timeout SECONDS]
//
// INPUT is the rule CSV, OUTPUT is where failing rules are written (only
// created when something failed).
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{CheckSettings, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};

#[derive(Parser, Debug)]
#[command(
    name = "redirect-audit",
    version,
    about = "Verify that declared URL redirects behave as intended on a live server",
    long_about = "redirect-audit reads a CSV of redirect rules (source, target, optional status code), \
                  checks each one against the live site and writes the failing rules to a CSV report."
)]
pub struct Cli {
    /// CSV file with redirect rules, no header row
    ///
    /// Columns: source path or URL, target path or URL, expected status (default 301)
    pub input: PathBuf,

    /// Where to write the failing rules (CSV)
    pub output: PathBuf,

    /// Number of redirects checked at the same time
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl Cli {
    pub fn settings(&self) -> CheckSettings {
        CheckSettings {
            workers: self.workers,
            timeout: Duration::from_secs(self.timeout),
            ..CheckSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["redirect-audit", "rules.csv", "failures.csv"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("rules.csv"));
        assert_eq!(cli.output, PathBuf::from("failures.csv"));

        let settings = cli.settings();
        assert_eq!(settings.workers, 40);
        assert_eq!(settings.timeout, Duration::from_secs(8));
        assert_eq!(settings.max_redirects, 30);
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "redirect-audit",
            "rules.csv",
            "failures.csv",
            "--workers",
            "5",
            "--timeout",
            "20",
        ])
        .unwrap();
        let settings = cli.settings();
        assert_eq!(settings.workers, 5);
        assert_eq!(settings.timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_output_is_required() {
        assert!(Cli::try_parse_from(["redirect-audit", "rules.csv"]).is_err());
    }
}
