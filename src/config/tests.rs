use super::{apply_config, load_config_file, types::ConfigFile};
use clap::{CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::CliArgs;

fn parse_cli(argv: &[&str]) -> Result<(CliArgs, clap::ArgMatches), String> {
    let matches = CliArgs::command()
        .try_get_matches_from(argv)
        .map_err(|err| format!("parse failed: {}", err))?;
    let args =
        CliArgs::from_arg_matches(&matches).map_err(|err| format!("from matches failed: {}", err))?;
    Ok((args, matches))
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("csvreq.toml");
    let content = r#"
csv = "rows.csv"
url = "http://localhost:8080/users/{{id}}"
header = """
Content-Type: application/json
X-Request-ID: {{request_id}}
"""
method = "POST"
parallel = 4
timeout = "500ms"
rate = 10
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.csv.as_deref() != Some("rows.csv") {
        return Err("Unexpected csv".to_owned());
    }
    if config.parallel != Some(4) {
        return Err("Unexpected parallel".to_owned());
    }
    let timeout = match config.timeout.as_ref() {
        Some(value) => value.to_duration().map_err(|err| err.to_string())?,
        None => return Err("Expected timeout".to_owned()),
    };
    if timeout != Duration::from_millis(500) {
        return Err(format!("Unexpected timeout: {:?}", timeout));
    }
    let header = config.header.unwrap_or_default();
    if !header.contains("X-Request-ID: {{request_id}}") {
        return Err(format!("Unexpected header template: {}", header));
    }
    Ok(())
}

#[test]
fn parse_json_config_with_numeric_timeout() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("csvreq.json");
    let content = r#"{
  "csv": "s3://bucket/rows.csv",
  "url": "http://localhost",
  "timeout": 12,
  "dry_run": true
}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    let timeout = match config.timeout.as_ref() {
        Some(value) => value.to_duration().map_err(|err| err.to_string())?,
        None => return Err("Expected timeout".to_owned()),
    };
    if timeout != Duration::from_secs(12) {
        return Err(format!("Unexpected timeout: {:?}", timeout));
    }
    if config.dry_run != Some(true) {
        return Err("Expected dry_run".to_owned());
    }
    Ok(())
}

#[test]
fn unknown_config_keys_are_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("csvreq.toml");
    std::fs::write(&path, "concurrency = 3\n").map_err(|err| format!("write failed: {}", err))?;
    if load_config_file(&path).is_ok() {
        return Err("Expected unknown key error".to_owned());
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("csvreq.yaml");
    std::fs::write(&path, "url: x\n").map_err(|err| format!("write failed: {}", err))?;
    if load_config_file(&path).is_ok() {
        return Err("Expected extension error".to_owned());
    }
    Ok(())
}

#[test]
fn cli_values_win_over_config() -> Result<(), String> {
    let (mut args, matches) = parse_cli(&["csvreq", "-u", "http://cli", "-p", "3"])?;
    let config = ConfigFile {
        csv: Some("from-config.csv".to_owned()),
        url: Some("http://config".to_owned()),
        parallel: Some(9),
        method: Some("PUT".to_owned()),
        rate: Some(5),
        ..ConfigFile::default()
    };

    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.url.as_deref() != Some("http://cli") {
        return Err("CLI url should win".to_owned());
    }
    if args.parallel.get() != 3 {
        return Err("CLI parallel should win".to_owned());
    }
    if args.csv.as_deref() != Some("from-config.csv") {
        return Err("Config csv should fill the gap".to_owned());
    }
    if args.method.as_str() != "PUT" {
        return Err("Config method should replace the default".to_owned());
    }
    if args.rate != 5 {
        return Err("Config rate should replace the default".to_owned());
    }
    Ok(())
}

#[test]
fn config_zero_parallel_is_rejected() -> Result<(), String> {
    let (mut args, matches) = parse_cli(&["csvreq"])?;
    let config = ConfigFile {
        parallel: Some(0),
        ..ConfigFile::default()
    };
    if apply_config(&mut args, &matches, &config).is_ok() {
        return Err("Expected parallel=0 to be rejected".to_owned());
    }
    Ok(())
}
