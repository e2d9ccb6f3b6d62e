use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{CliArgs, PositiveUsize, parse_method};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments not set on the command line.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(args: &mut CliArgs, matches: &ArgMatches, config: &ConfigFile) -> AppResult<()> {
    if !is_cli(matches, "csv")
        && let Some(csv) = config.csv.clone()
    {
        args.csv = Some(csv);
    }

    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "header")
        && let Some(header) = config.header.clone()
    {
        args.header = header;
    }

    if !is_cli(matches, "body")
        && let Some(body) = config.body.clone()
    {
        args.body = body;
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method.as_deref()
    {
        args.method = parse_method(method)
            .map_err(|err| AppError::config(ConfigError::InvalidMethod { source: err }))?;
    }

    if !is_cli(matches, "parallel")
        && let Some(parallel) = config.parallel
    {
        args.parallel = PositiveUsize::try_from(parallel).map_err(|err| {
            AppError::config(ConfigError::FieldMustBePositive {
                field: "parallel".to_owned(),
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = timeout.to_duration().map_err(|err| match err {
            AppError::Validation(source) => {
                AppError::config(ConfigError::InvalidTimeout { source })
            }
            other => other,
        })?;
    }

    if !is_cli(matches, "rate")
        && let Some(rate) = config.rate
    {
        args.rate = rate;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "dry_run")
        && let Some(dry_run) = config.dry_run
    {
        args.dry_run = dry_run;
    }

    if !is_cli(matches, "human_readable")
        && let Some(human_readable) = config.human_readable
    {
        args.human_readable = human_readable;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}
