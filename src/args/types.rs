use std::num::NonZeroUsize;

use crate::error::ValidationError;

/// How the outcome set is surfaced once the pool has drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One table on stdout with URL, status, body and error columns.
    Table,
    /// One info line per request naming its URL.
    DryRun,
    /// One leveled log line per outcome.
    Log,
}

impl OutputMode {
    /// Human-readable output wins over dry-run notices.
    #[must_use]
    pub const fn from_flags(dry_run: bool, human_readable: bool) -> Self {
        if human_readable {
            OutputMode::Table
        } else if dry_run {
            OutputMode::DryRun
        } else {
            OutputMode::Log
        }
    }

    #[must_use]
    pub const fn needs_body(self) -> bool {
        matches!(self, OutputMode::Table)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PositiveUsize {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(PositiveUsize)
            .ok_or(ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        PositiveUsize::try_from(value)
    }
}

impl From<PositiveUsize> for usize {
    fn from(value: PositiveUsize) -> Self {
        value.get()
    }
}
