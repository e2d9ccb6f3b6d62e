use std::collections::BTreeMap;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use tracing::{debug, warn};
use url::Url;

use crate::error::{BuildError, TemplateError, TemplateKind};
use crate::input::CsvData;

use super::template::Template;

/// A fully rendered request. Immutable once built.
#[derive(Debug, Clone)]
pub struct BuiltRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: String,
}

impl BuiltRequest {
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Turns one CSV row into one [`BuiltRequest`].
///
/// Templates are parsed once here and shared read-only by every row.
#[derive(Debug, Clone)]
pub struct RequestFactory {
    method: Method,
    url: Template,
    header: Template,
    body: Template,
}

impl RequestFactory {
    /// # Errors
    ///
    /// Returns an error when any of the three templates is malformed.
    pub fn new(
        method: Method,
        url_template: &str,
        header_template: &str,
        body_template: &str,
    ) -> Result<Self, TemplateError> {
        Ok(Self {
            method,
            url: Template::parse(TemplateKind::Url, url_template)?,
            header: Template::parse(TemplateKind::Header, header_template)?,
            body: Template::parse(TemplateKind::Body, body_template)?,
        })
    }

    /// Renders the templates against `row`, keyed by `header`.
    ///
    /// A repeated column name takes the value of its last occurrence.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] scoped to this row: length mismatch, missing
    /// column, unparseable URL, or an invalid header name/value.
    pub fn build(&self, header: &[String], row: &[String]) -> Result<BuiltRequest, BuildError> {
        if header.len() != row.len() {
            return Err(BuildError::RowLengthMismatch {
                expected: header.len(),
                actual: row.len(),
            });
        }
        let vars: BTreeMap<&str, &str> = header
            .iter()
            .map(String::as_str)
            .zip(row.iter().map(String::as_str))
            .collect();

        let rendered_url = self.url.render(&vars)?;
        let url = Url::parse(&rendered_url).map_err(|err| BuildError::InvalidUrl {
            url: rendered_url.clone(),
            source: err,
        })?;
        let body = self.body.render(&vars)?;
        let headers = if self.header.is_empty() {
            HeaderMap::new()
        } else {
            parse_header_block(&self.header.render(&vars)?)?
        };

        Ok(BuiltRequest {
            method: self.method.clone(),
            url,
            headers,
            body,
        })
    }
}

/// Parses newline-separated `Name: Value` lines.
///
/// Blank lines and lines without a colon are skipped. Names and values are
/// trimmed; a later line replaces an earlier one with the same name.
///
/// # Errors
///
/// Returns an error when a name or value is not a valid HTTP header token.
pub fn parse_header_block(block: &str) -> Result<HeaderMap, BuildError> {
    let mut headers = HeaderMap::new();
    for line in block.split('\n') {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|_err| BuildError::InvalidHeaderName {
                name: name.to_owned(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_err| BuildError::InvalidHeaderValue {
                name: name.to_owned(),
            })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// Builds every row up front, skipping (with a warning) rows that fail.
#[must_use]
pub fn build_requests(factory: &RequestFactory, data: &CsvData) -> Vec<BuiltRequest> {
    let mut requests = Vec::with_capacity(data.rows.len());
    for (index, row) in data.rows.iter().enumerate() {
        match factory.build(&data.header, row) {
            Ok(request) => requests.push(request),
            Err(err) => {
                // +2: one for the header line, one for 1-based numbering.
                warn!(
                    "failed to build request for row {}: {}",
                    index.saturating_add(2),
                    err
                );
            }
        }
    }
    debug!(
        "built {} of {} requests",
        requests.len(),
        data.rows.len()
    );
    requests
}
