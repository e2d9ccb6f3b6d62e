//! Thin wrappers used by the `fuzz/` targets.
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use http::HeaderMap;

use crate::args::{CliArgs, parse_duration_arg};
use crate::config::apply_config;
use crate::config::types::ConfigFile;
use crate::error::{AppError, AppResult, BuildError, ConfigError, TemplateError, TemplateKind};
use crate::input::{CsvData, read_csv};
use crate::request::{Template, parse_header_block};

const FUZZ_CONFIG_PATH: &str = "<fuzz>";

thread_local! {
    static BASE_MATCHES: ArgMatches = CliArgs::command().get_matches_from(["csvreq"]);
}

/// Parses `input` as a body template.
///
/// # Errors
///
/// Returns an error when the template is malformed.
pub fn parse_template_input(input: &str) -> Result<Template, TemplateError> {
    Template::parse(TemplateKind::Body, input)
}

/// Parses `input` as a body template and renders it against `vars`.
///
/// Returns `None` when parsing or rendering fails.
#[must_use]
pub fn render_template_input(input: &str, vars: &BTreeMap<&str, &str>) -> Option<String> {
    parse_template_input(input).ok()?.render(vars).ok()
}

/// Parses a newline-separated header block.
///
/// # Errors
///
/// Returns an error when a header name or value is invalid.
pub fn parse_header_block_input(input: &str) -> Result<HeaderMap, BuildError> {
    parse_header_block(input)
}

/// Decodes raw bytes as CSV.
///
/// # Errors
///
/// Returns an error when the bytes are not valid UTF-8 CSV or hold no header.
pub fn read_csv_input(input: &[u8]) -> AppResult<CsvData> {
    read_csv(input)
}

/// Parses a duration argument (e.g. `10s`, `500ms`).
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_arg_input(input: &str) -> AppResult<Duration> {
    parse_duration_arg(input)
}

/// Parses TOML config and applies it to defaults.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_toml(input: &str) -> AppResult<()> {
    let config: ConfigFile = toml::from_str(input).map_err(|err| {
        AppError::config(ConfigError::ParseToml {
            path: PathBuf::from(FUZZ_CONFIG_PATH),
            source: err,
        })
    })?;
    apply_config_to_defaults(&config)
}

/// Parses JSON config and applies it to defaults.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_json(input: &[u8]) -> AppResult<()> {
    let config: ConfigFile = serde_json::from_slice(input).map_err(|err| {
        AppError::config(ConfigError::ParseJson {
            path: PathBuf::from(FUZZ_CONFIG_PATH),
            source: err,
        })
    })?;
    apply_config_to_defaults(&config)
}

fn apply_config_to_defaults(config: &ConfigFile) -> AppResult<()> {
    BASE_MATCHES.with(|matches| {
        let mut args = CliArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, config)
    })
}
