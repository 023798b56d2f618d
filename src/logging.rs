// src/logging.rs
// =============================================================================
// Diagnostic logging setup.
//
// Progress and the final summary are printed directly to stdout; `log` is for
// everything behind the scenes (redirect hops, GET fallbacks, settings).
//
// Default level is warn. Override with RUST_LOG, for example:
//   RUST_LOG=debug redirect-audit rules.csv failures.csv
//   RUST_LOG=redirect_audit=debug redirect-audit rules.csv failures.csv
// =============================================================================

use env_logger::{Builder, Env};
use log::{LevelFilter, SetLoggerError};

pub fn init_logger() -> Result<(), SetLoggerError> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));

    // HTTP internals are noisy below info even when RUST_LOG=debug
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("reqwest", LevelFilter::Info);

    // try_init: tests and repeated calls must not panic
    builder.try_init()
}
