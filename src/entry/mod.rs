mod plan;

use std::io::Write;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::error;

use crate::args::CliArgs;
use crate::error::{AppError, AppResult, ValidationError};
use plan::{build_plan, execute_plan};

pub(crate) fn run() -> AppResult<()> {
    let (args, matches) = parse_args()?;

    let plan = match build_plan(args, &matches) {
        Ok(plan) => plan,
        Err(err) => {
            if is_missing_required(&err) {
                print_usage_to_stderr()?;
            }
            return Err(err);
        }
    };

    crate::system::logger::init_logging(plan.verbose, plan.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(ValidationError::RuntimeBuildFailed { source: err }))?;

    runtime.block_on(execute_plan(plan)).inspect_err(|err| {
        error!("{}", err);
    })
}

fn parse_args() -> AppResult<(CliArgs, ArgMatches)> {
    let matches = CliArgs::command().get_matches();
    let args = CliArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

const fn is_missing_required(err: &AppError) -> bool {
    matches!(
        err,
        AppError::Validation(ValidationError::MissingCsv | ValidationError::MissingUrl)
    )
}

fn print_usage_to_stderr() -> AppResult<()> {
    let help = CliArgs::command().render_help();
    let mut stderr = std::io::stderr().lock();
    writeln!(stderr, "{}", help)?;
    Ok(())
}
