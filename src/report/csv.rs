// src/report/csv.rs
// =============================================================================
// CSV export of failing redirect checks.
//
// Columns (header row first):
//   Source,Target,ExpectedCode,FirstStatus,FinalUrl,Ok,Error
//
// The column names and order come from CheckResult's serde derive.
// =============================================================================

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::checker::CheckResult;

// Writes every failing result to `output`
//
// Returns: how many rows were written (0 means no file was created)
pub fn write_failures(results: &[CheckResult], output: &Path) -> Result<usize> {
    let failed: Vec<&CheckResult> = results.iter().filter(|r| !r.ok).collect();
    if failed.is_empty() {
        return Ok(0);
    }

    let file = std::fs::File::create(output)
        .with_context(|| format!("Failed to create report file {}", output.display()))?;
    write_failures_to(&failed, file)
        .with_context(|| format!("Failed to write report file {}", output.display()))?;

    Ok(failed.len())
}

fn write_failures_to<W: Write>(failed: &[&CheckResult], out: W) -> Result<()> {
    let mut writer = Writer::from_writer(out);
    for result in failed {
        writer.serialize(result)?;
    }
    writer.flush()?;
    Ok(())
}
