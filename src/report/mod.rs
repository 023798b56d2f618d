// src/report/mod.rs
// =============================================================================
// This module writes the failure report.
//
// Only failing checks are written. When everything passed, no file is
// created at all.
// =============================================================================

mod csv;

pub use self::csv::write_failures;
