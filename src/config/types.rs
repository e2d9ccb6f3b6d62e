use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration_arg;
use crate::error::{AppError, AppResult, ValidationError};

/// Mirror of the CLI options. Every field is optional; command-line values win.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub csv: Option<String>,
    pub url: Option<String>,
    pub header: Option<String>,
    pub body: Option<String>,
    pub method: Option<String>,
    pub parallel: Option<usize>,
    pub timeout: Option<DurationValue>,
    pub rate: Option<u32>,
    pub verbose: Option<bool>,
    pub dry_run: Option<bool>,
    pub human_readable: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(AppError::validation(ValidationError::DurationZero))
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
