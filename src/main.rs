// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Read the redirect rules from the input CSV
// 3. Check every rule against the live server, concurrently
// 4. Write the failing rules to the output CSV (only if there are any)
//
// Exit codes:
//   0 = the run completed (whether or not some redirects failed)
//   2 = the run could not start or finish (unreadable input, unwritable report)
// =============================================================================

mod checker; // src/checker/ - fetching, evaluation, progress, concurrency
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - base URL and defaults
mod logging; // src/logging.rs - env_logger setup
mod report; // src/report/ - failure CSV
mod rules; // src/rules/ - rule CSV

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use checker::ProgressReporter;
use cli::Cli;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger()?;

    let rules = rules::read_rules(&cli.input, config::BASE_URL)?;
    let settings = cli.settings();
    info!(
        "Checking against {} with {} workers, {:?} timeout, {} redirect limit",
        config::BASE_URL,
        settings.workers,
        settings.timeout,
        settings.max_redirects
    );

    println!("Found {} redirects to check.", rules.len());
    println!("Starting checks...\n");

    let client = checker::build_client(&settings).context("Failed to build HTTP client")?;
    let progress = ProgressReporter::stdout(rules.len());

    let results = checker::check_all(&client, rules, &settings, &progress).await;

    let failed = report::write_failures(&results, &cli.output)?;
    println!();
    if failed == 0 {
        println!("All redirects are correct. No failure report written.");
    } else {
        println!(
            "Saved {} failing redirects to: {}",
            failed,
            cli.output.display()
        );
    }

    Ok(())
}
