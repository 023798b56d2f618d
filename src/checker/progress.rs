// src/checker/progress.rs
// =============================================================================
// Shared progress reporting for all concurrent checks.
//
// One mutex guards both the completed counter and the output, so a check's
// own line and any aggregate line it triggers are never interleaved with
// another check's output.
// =============================================================================

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

struct State {
    completed: usize,
    out: Box<dyn Write + Send>,
}

pub struct ProgressReporter {
    total: usize,
    state: Mutex<State>,
}

impl ProgressReporter {
    /// Reports to standard output.
    pub fn stdout(total: usize) -> Self {
        Self::with_writer(total, io::stdout())
    }

    pub fn with_writer(total: usize, out: impl Write + Send + 'static) -> Self {
        Self {
            total,
            state: Mutex::new(State {
                completed: 0,
                out: Box::new(out),
            }),
        }
    }

    /// Records one finished check: bumps the counter, prints `line`, and
    /// prints an aggregate line every 10 checks and at the very end.
    ///
    /// Returns the new completed count.
    pub fn record(&self, line: &str) -> usize {
        // A panic elsewhere must not silence progress for everyone else
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.completed += 1;
        let completed = state.completed;

        // Progress output is best effort; a closed stdout must not fail a check
        let _ = writeln!(state.out, "{}", line);

        if completed % 10 == 0 || completed == self.total {
            let pct = if self.total > 0 {
                completed as f64 / self.total as f64 * 100.0
            } else {
                100.0
            };
            let _ = writeln!(
                state.out,
                "Checked {} / {} ({:.1}%)",
                completed, self.total, pct
            );
        }
        let _ = state.out.flush();

        completed
    }

    pub fn completed(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .completed
    }
}
