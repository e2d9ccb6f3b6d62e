//! Tabular input: where the CSV comes from and how it is decoded.
mod reader;
mod s3;
mod source;

#[cfg(test)]
mod tests;

pub use reader::{CsvData, read_csv};
pub use s3::{AwsSettings, S3Location};
pub use source::{InputSource, load_input};
