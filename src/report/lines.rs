use std::fmt;

use tracing::{error, info, warn};

use crate::dispatch::{Attempt, Outcome};
use crate::error::AppResult;

use super::Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warn => f.write_str("warn"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Where leveled report lines end up.
pub trait OutcomeLog {
    fn emit(&mut self, severity: Severity, message: &str);
}

/// Forwards report lines to the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl OutcomeLog for TracingLog {
    fn emit(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => info!("{}", message),
            Severity::Warn => warn!("{}", message),
            Severity::Error => error!("{}", message),
        }
    }
}

/// Severity and message for one outcome in log mode.
///
/// 2xx and 3xx are successes; any other status is a warning. Transport
/// failures and missing responses are errors.
#[must_use]
pub fn classify(outcome: &Outcome) -> (Severity, String) {
    let url = outcome.request.url();
    match &outcome.attempt {
        Attempt::Failed(err) => (Severity::Error, format!("Error for {}: {}", url, err)),
        Attempt::NotSent => (Severity::Error, format!("No response for {}", url)),
        Attempt::Response(response) if response.is_success() => (
            Severity::Info,
            format!("Success for {}: {}", url, response.status),
        ),
        Attempt::Response(response) => (
            Severity::Warn,
            format!("Non-OK status for {}: {}", url, response.status),
        ),
    }
}

#[derive(Debug)]
pub struct LogReporter<L> {
    log: L,
}

impl<L: OutcomeLog> LogReporter<L> {
    pub const fn new(log: L) -> Self {
        Self { log }
    }

    pub fn into_inner(self) -> L {
        self.log
    }
}

impl<L: OutcomeLog> Reporter for LogReporter<L> {
    fn report(&mut self, outcomes: &[Outcome]) -> AppResult<()> {
        for outcome in outcomes {
            let (severity, message) = classify(outcome);
            self.log.emit(severity, &message);
        }
        Ok(())
    }
}

/// One info line per scheduled request; nothing was sent.
#[derive(Debug)]
pub struct DryRunReporter<L> {
    log: L,
}

impl<L: OutcomeLog> DryRunReporter<L> {
    pub const fn new(log: L) -> Self {
        Self { log }
    }

    pub fn into_inner(self) -> L {
        self.log
    }
}

impl<L: OutcomeLog> Reporter for DryRunReporter<L> {
    fn report(&mut self, outcomes: &[Outcome]) -> AppResult<()> {
        for outcome in outcomes {
            let message = format!("Dry run for {}", outcome.request.url());
            self.log.emit(Severity::Info, &message);
        }
        Ok(())
    }
}
