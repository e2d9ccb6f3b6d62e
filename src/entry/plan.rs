use std::sync::Arc;
use std::time::Duration;

use clap::ArgMatches;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::args::{CliArgs, OutputMode};
use crate::dispatch::{BodyMode, DispatchConfig, Dispatcher};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::HttpTransport;
use crate::input::{InputSource, load_input};
use crate::report::reporter_for;
use crate::request::{RequestFactory, build_requests};

/// Everything a run needs, resolved from CLI flags and the config file.
#[derive(Debug)]
pub(crate) struct RunPlan {
    pub(crate) source: InputSource,
    pub(crate) factory: RequestFactory,
    pub(crate) timeout: Duration,
    pub(crate) dispatch: DispatchConfig,
    pub(crate) output: OutputMode,
    pub(crate) verbose: bool,
    pub(crate) no_color: bool,
}

/// Merges the config file under the CLI flags and validates the result.
///
/// Template syntax is checked here, before any input is read.
pub(crate) fn build_plan(mut args: CliArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(&mut args, matches, &config)?;
    }

    let csv = args
        .csv
        .take()
        .ok_or_else(|| AppError::validation(ValidationError::MissingCsv))?;
    let url = args
        .url
        .take()
        .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;

    let source = InputSource::parse(&csv)?;
    let factory = RequestFactory::new(args.method.clone(), &url, &args.header, &args.body)?;
    let output = args.output_mode();
    let body_mode = if output.needs_body() {
        BodyMode::Capture
    } else {
        BodyMode::Discard
    };

    Ok(RunPlan {
        source,
        factory,
        timeout: args.timeout,
        dispatch: DispatchConfig {
            workers: args.parallel,
            rate: args.rate,
            dry_run: args.dry_run,
            body_mode,
        },
        output,
        verbose: args.verbose,
        no_color: args.no_color,
    })
}

pub(crate) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    let data = load_input(&plan.source).await?;
    debug!(
        "read {} data rows with {} columns",
        data.rows.len(),
        data.header.len()
    );

    let requests = build_requests(&plan.factory, &data);
    drop(data);
    let transport = HttpTransport::new(plan.timeout)?;

    let cancel = CancellationToken::new();
    let signal_task = crate::system::shutdown::spawn_signal_handler(&cancel);

    let mut reporter = reporter_for(plan.output, std::io::stdout());
    let dispatcher = Dispatcher::new(Arc::new(transport), plan.dispatch);
    let result = dispatcher
        .run(requests, cancel.clone(), reporter.as_mut())
        .await;

    cancel.cancel();
    signal_task.await?;

    let outcomes = result?;
    info!("completed {} requests", outcomes.len());
    Ok(())
}
