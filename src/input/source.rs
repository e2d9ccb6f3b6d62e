use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{AppError, AppResult, InputError};

use super::reader::{CsvData, read_csv};
use super::s3::{AwsSettings, S3Location, download_object};

const S3_SCHEME: &str = "s3://";

/// Where the CSV lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Local(PathBuf),
    S3(S3Location),
}

impl InputSource {
    /// Interprets `s3://bucket/key` as an object location, anything else as a path.
    ///
    /// # Errors
    ///
    /// Returns an error for an `s3://` value without both bucket and key.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.strip_prefix(S3_SCHEME) {
            Some(rest) => Ok(InputSource::S3(S3Location::parse(value, rest)?)),
            None => Ok(InputSource::Local(PathBuf::from(value))),
        }
    }
}

/// Fetches and decodes the CSV.
///
/// # Errors
///
/// Returns an error when the file cannot be read or downloaded, or is not
/// valid CSV.
pub async fn load_input(source: &InputSource) -> AppResult<CsvData> {
    let bytes = match source {
        InputSource::Local(path) => {
            debug!("Reading csv from {}", path.display());
            tokio::fs::read(path).await.map_err(|err| {
                AppError::input(InputError::OpenCsv {
                    path: path.clone(),
                    source: err,
                })
            })?
        }
        InputSource::S3(location) => {
            let settings = AwsSettings::from_env()?;
            let bytes = download_object(location, &settings).await?;
            info!("file downloaded, {} bytes", bytes.len());
            bytes
        }
    };

    read_csv(bytes.as_slice())
}
