use super::*;
use crate::dispatch::{Attempt, Outcome, ResponseSummary};
use crate::error::TransportError;
use crate::request::RequestFactory;
use reqwest::Method;

#[derive(Debug, Default)]
struct RecordingLog {
    lines: Vec<(Severity, String)>,
}

impl OutcomeLog for RecordingLog {
    fn emit(&mut self, severity: Severity, message: &str) {
        self.lines.push((severity, message.to_owned()));
    }
}

fn outcome(url: &str, attempt: Attempt) -> Result<Outcome, String> {
    let factory = RequestFactory::new(Method::GET, url, "", "")
        .map_err(|err| format!("template rejected: {}", err))?;
    let request = factory
        .build(&[], &[])
        .map_err(|err| format!("build failed: {}", err))?;
    Ok(Outcome { request, attempt })
}

fn response(status: u16, body: Option<&str>) -> Attempt {
    Attempt::Response(ResponseSummary {
        status,
        body: body.map(str::to_owned),
        body_len: body.map_or(0, |text| text.len() as u64),
    })
}

#[test]
fn classify_boundaries() -> Result<(), String> {
    let cases = [
        (199, Severity::Warn),
        (200, Severity::Info),
        (301, Severity::Info),
        (399, Severity::Info),
        (400, Severity::Warn),
        (404, Severity::Warn),
        (500, Severity::Warn),
    ];
    for (status, expected) in cases {
        let item = outcome("http://example.com/a", response(status, None))?;
        let (severity, _) = classify(&item);
        if severity != expected {
            return Err(format!(
                "status {} classified as {}, expected {}",
                status, severity, expected
            ));
        }
    }
    Ok(())
}

#[test]
fn log_reporter_messages() -> Result<(), String> {
    let outcomes = vec![
        outcome("http://example.com/ok", response(200, None))?,
        outcome("http://example.com/gone", response(404, None))?,
        outcome(
            "http://example.com/down",
            Attempt::Failed(TransportError::other("connection refused")),
        )?,
    ];
    let mut reporter = LogReporter::new(RecordingLog::default());
    reporter.report(&outcomes).map_err(|err| err.to_string())?;
    let lines = reporter.into_inner().lines;

    let expected = vec![
        (
            Severity::Info,
            "Success for http://example.com/ok: 200".to_owned(),
        ),
        (
            Severity::Warn,
            "Non-OK status for http://example.com/gone: 404".to_owned(),
        ),
        (
            Severity::Error,
            "Error for http://example.com/down: Transport error: connection refused".to_owned(),
        ),
    ];
    if lines != expected {
        return Err(format!("Unexpected log lines: {:?}", lines));
    }
    Ok(())
}

#[test]
fn log_reporter_flags_missing_response() -> Result<(), String> {
    let outcomes = vec![outcome("http://example.com/x", Attempt::NotSent)?];
    let mut reporter = LogReporter::new(RecordingLog::default());
    reporter.report(&outcomes).map_err(|err| err.to_string())?;
    let lines = reporter.into_inner().lines;
    match lines.as_slice() {
        [(Severity::Error, message)] if message == "No response for http://example.com/x" => Ok(()),
        other => Err(format!("Unexpected log lines: {:?}", other)),
    }
}

#[test]
fn dry_run_reporter_lists_every_url() -> Result<(), String> {
    let outcomes = vec![
        outcome("http://example.com/1", Attempt::NotSent)?,
        outcome("http://example.com/2", Attempt::NotSent)?,
    ];
    let mut reporter = DryRunReporter::new(RecordingLog::default());
    reporter.report(&outcomes).map_err(|err| err.to_string())?;
    let lines = reporter.into_inner().lines;

    let messages: Vec<&str> = lines.iter().map(|(_, message)| message.as_str()).collect();
    if messages != ["Dry run for http://example.com/1", "Dry run for http://example.com/2"] {
        return Err(format!("Unexpected dry run lines: {:?}", messages));
    }
    if lines.iter().any(|(severity, _)| *severity != Severity::Info) {
        return Err("Dry run lines must be info".to_owned());
    }
    Ok(())
}

#[test]
fn table_contains_responses_and_errors() -> Result<(), String> {
    let outcomes = vec![
        outcome("http://example.com/ok", response(200, Some("hello")))?,
        outcome(
            "http://example.com/down",
            Attempt::Failed(TransportError::other("connection refused")),
        )?,
    ];
    let mut reporter = TableReporter::new(Vec::new());
    reporter.report(&outcomes).map_err(|err| err.to_string())?;
    let rendered = String::from_utf8(reporter.into_inner()).map_err(|err| err.to_string())?;

    for needle in [
        "URL",
        "Status",
        "Body",
        "Error",
        "http://example.com/ok",
        "200",
        "hello",
        "http://example.com/down",
        "connection refused",
    ] {
        if !rendered.contains(needle) {
            return Err(format!("Table is missing {:?}:\n{}", needle, rendered));
        }
    }
    Ok(())
}

#[test]
fn table_for_empty_run_has_only_titles() -> Result<(), String> {
    let table = render_table(&[]);
    if !table.is_empty() {
        return Err(format!("Expected no rows, got {}", table.len()));
    }
    Ok(())
}

#[test]
fn reporter_for_table_writes_to_the_given_writer() -> Result<(), String> {
    let outcomes = vec![outcome("http://example.com/t", response(204, None))?];
    let mut reporter = reporter_for(OutputMode::Table, std::io::sink());
    reporter.report(&outcomes).map_err(|err| err.to_string())
}
