use super::s3::object_url;
use super::*;
use crate::error::{AppError, InputError};

fn owned(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| (*cell).to_owned()).collect())
        .collect()
}

#[test]
fn read_csv_strips_bom() -> Result<(), String> {
    let mut input = vec![0xef, 0xbb, 0xbf];
    input.extend_from_slice(b"header1,header2\nvalue1,value2\n");

    let data = read_csv(input.as_slice()).map_err(|err| err.to_string())?;
    if data.header != ["header1", "header2"] {
        return Err(format!("Unexpected header: {:?}", data.header));
    }
    if data.rows != owned(&[&["value1", "value2"]]) {
        return Err(format!("Unexpected rows: {:?}", data.rows));
    }
    Ok(())
}

#[test]
fn read_csv_keeps_ragged_rows() -> Result<(), String> {
    let input = "id,name\n1,alice\n2\n3,carol,extra\n";
    let data = read_csv(input.as_bytes()).map_err(|err| err.to_string())?;
    if data.rows != owned(&[&["1", "alice"], &["2"], &["3", "carol", "extra"]]) {
        return Err(format!("Unexpected rows: {:?}", data.rows));
    }
    Ok(())
}

#[test]
fn read_csv_handles_quoted_fields() -> Result<(), String> {
    let input = "id,note\n1,\"hello, world\"\n2,\"line\nbreak\"\n";
    let data = read_csv(input.as_bytes()).map_err(|err| err.to_string())?;
    if data.rows != owned(&[&["1", "hello, world"], &["2", "line\nbreak"]]) {
        return Err(format!("Unexpected rows: {:?}", data.rows));
    }
    Ok(())
}

#[test]
fn header_only_yields_no_rows() -> Result<(), String> {
    let data = read_csv("id,name\n".as_bytes()).map_err(|err| err.to_string())?;
    if !data.rows.is_empty() {
        return Err("Expected zero data rows".to_owned());
    }
    Ok(())
}

#[test]
fn empty_input_is_an_error() -> Result<(), String> {
    match read_csv(&b""[..]) {
        Err(AppError::Input(InputError::EmptyCsv)) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected empty csv error".to_owned()),
    }
}

#[test]
fn bom_only_input_is_empty() -> Result<(), String> {
    if read_csv(&[0xef_u8, 0xbb, 0xbf][..]).is_ok() {
        return Err("Expected empty csv error".to_owned());
    }
    Ok(())
}

#[test]
fn invalid_utf8_is_rejected() -> Result<(), String> {
    if read_csv(&b"id\n\xff\xfe\n"[..]).is_ok() {
        return Err("Expected utf-8 error".to_owned());
    }
    Ok(())
}

#[test]
fn parse_input_source() -> Result<(), String> {
    let local = InputSource::parse("./data/rows.csv").map_err(|err| err.to_string())?;
    if !matches!(local, InputSource::Local(_)) {
        return Err("Expected local source".to_owned());
    }

    let remote =
        InputSource::parse("s3://my-bucket/path/to/rows.csv").map_err(|err| err.to_string())?;
    match remote {
        InputSource::S3(location) => {
            if location.bucket != "my-bucket" || location.key != "path/to/rows.csv" {
                return Err(format!("Unexpected location: {:?}", location));
            }
        }
        InputSource::Local(_) => return Err("Expected s3 source".to_owned()),
    }

    for invalid in ["s3://", "s3://bucket", "s3://bucket/", "s3:///key"] {
        if InputSource::parse(invalid).is_ok() {
            return Err(format!("Expected error for {}", invalid));
        }
    }
    Ok(())
}

fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |name| {
        pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| (*value).to_owned())
    }
}

#[test]
fn aws_settings_require_credentials() -> Result<(), String> {
    if AwsSettings::from_lookup(lookup(&[("AWS_ACCESS_KEY_ID", "AKID")])).is_ok() {
        return Err("Expected missing secret key error".to_owned());
    }
    let settings = AwsSettings::from_lookup(lookup(&[
        ("AWS_ACCESS_KEY_ID", "AKID"),
        ("AWS_SECRET_ACCESS_KEY", "secret"),
        ("AWS_DEFAULT_REGION", "eu-west-1"),
    ]))
    .map_err(|err| err.to_string())?;
    if settings.region != "eu-west-1" || settings.session_token.is_some() {
        return Err(format!("Unexpected settings: {:?}", settings));
    }
    Ok(())
}

#[test]
fn object_url_virtual_hosted_and_path_style() -> Result<(), String> {
    let location = S3Location {
        bucket: "my-bucket".to_owned(),
        key: "dir/rows 2024.csv".to_owned(),
    };
    let mut settings = AwsSettings::from_lookup(lookup(&[
        ("AWS_ACCESS_KEY_ID", "AKID"),
        ("AWS_SECRET_ACCESS_KEY", "secret"),
    ]))
    .map_err(|err| err.to_string())?;

    let url = object_url(&location, &settings).map_err(|err| err.to_string())?;
    if url.as_str() != "https://my-bucket.s3.us-east-1.amazonaws.com/dir/rows%202024.csv" {
        return Err(format!("Unexpected url: {}", url));
    }

    settings.endpoint = Some("http://127.0.0.1:9000".to_owned());
    let url = object_url(&location, &settings).map_err(|err| err.to_string())?;
    if url.as_str() != "http://127.0.0.1:9000/my-bucket/dir/rows%202024.csv" {
        return Err(format!("Unexpected url: {}", url));
    }
    Ok(())
}
