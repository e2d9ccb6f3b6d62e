//! Surfaces the collected outcomes once the worker pool has drained.
mod lines;
mod table;

#[cfg(test)]
mod tests;

use std::io::Write;

use crate::args::OutputMode;
use crate::dispatch::Outcome;
use crate::error::AppResult;

pub use lines::{DryRunReporter, LogReporter, OutcomeLog, Severity, TracingLog, classify};
pub use table::{TableReporter, render_table};

/// Consumes the full outcome set exactly once, after dispatch.
pub trait Reporter {
    /// # Errors
    ///
    /// Returns an error when the output cannot be written.
    fn report(&mut self, outcomes: &[Outcome]) -> AppResult<()>;
}

/// Picks the reporter for `mode`. Table output goes to `out`; everything else
/// goes through `tracing`.
#[must_use]
pub fn reporter_for<W>(mode: OutputMode, out: W) -> Box<dyn Reporter>
where
    W: Write + 'static,
{
    match mode {
        OutputMode::Table => Box::new(TableReporter::new(out)),
        OutputMode::DryRun => Box::new(DryRunReporter::new(TracingLog)),
        OutputMode::Log => Box::new(LogReporter::new(TracingLog)),
    }
}
