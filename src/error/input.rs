use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to open csv file '{path}': {source}")]
    OpenCsv {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read csv: {source}")]
    ReadCsv {
        #[source]
        source: csv::Error,
    },
    #[error("Empty csv: no header row.")]
    EmptyCsv,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
