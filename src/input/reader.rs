use std::io::Read;

use csv::ReaderBuilder;

use crate::error::{AppError, AppResult, InputError};

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

/// Header row plus data rows, positionally aligned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvData {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvData {
    /// Splits raw records into header and body.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyCsv`] when there is not even a header row.
    pub fn from_records(mut records: Vec<Vec<String>>) -> AppResult<Self> {
        if records.is_empty() {
            return Err(AppError::input(InputError::EmptyCsv));
        }
        let rows = records.split_off(1);
        let header = records.into_iter().next().unwrap_or_default();
        Ok(Self { header, rows })
    }
}

/// Reads every record from `reader`, dropping a leading UTF-8 BOM.
///
/// Rows are allowed to differ in length from the header; the request
/// factory rejects them one by one instead of failing the whole file.
///
/// # Errors
///
/// Returns an error on I/O failure, malformed CSV, invalid UTF-8, or when the
/// input has no rows at all.
pub fn read_csv<R: Read>(mut reader: R) -> AppResult<CsvData> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    let content = data.strip_prefix(UTF8_BOM).unwrap_or(data.as_slice());

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut records = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|err| AppError::input(InputError::ReadCsv { source: err }))?;
        records.push(record.iter().map(str::to_owned).collect());
    }

    CsvData::from_records(records)
}
