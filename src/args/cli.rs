use clap::Parser;
use http::Method;
use std::time::Duration;

use super::parsers::{parse_bool_env, parse_duration_arg, parse_method, parse_positive_usize};
use super::types::{OutputMode, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Send one templated HTTP request per CSV row, across a rate-limited worker pool."
)]
pub struct CliArgs {
    /// Path to the CSV file, or an s3://bucket/key location (required)
    #[arg(long = "csv", short = 'c')]
    pub csv: Option<String>,

    /// URL template, e.g. 'http://host/users/{{id}}' (required)
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// Header template: newline-separated 'Name: Value' lines
    #[arg(long = "header", default_value = "")]
    pub header: String,

    /// Body template
    #[arg(long, short = 'b', default_value = "")]
    pub body: String,

    /// HTTP method (sent exactly as given)
    #[arg(long, short = 'm', default_value = "GET", value_parser = parse_method)]
    pub method: Method,

    /// Number of parallel workers
    #[arg(long, short = 'p', default_value = "1", value_parser = parse_positive_usize)]
    pub parallel: PositiveUsize,

    /// Per-request timeout (bare numbers are seconds; supports ms/s/m/h)
    #[arg(long, short = 't', default_value = "30", value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Rate limit in requests per second across all workers (0 = unlimited)
    #[arg(long, short = 'r', default_value = "0")]
    pub rate: u32,

    /// Enable verbose logging (sets log level to debug unless overridden by CSVREQ_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Dry run mode (no requests sent)
    #[arg(long = "dry-run", short = 'd')]
    pub dry_run: bool,

    /// Print the results as a table on stdout
    #[arg(long = "human-readable", short = 'H')]
    pub human_readable: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,

    /// Path to config file (TOML/JSON). Defaults to ./csvreq.toml or ./csvreq.json if present.
    #[arg(long)]
    pub config: Option<String>,
}

impl CliArgs {
    #[must_use]
    pub const fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.dry_run, self.human_readable)
    }
}
