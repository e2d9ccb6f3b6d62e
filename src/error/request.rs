use thiserror::Error;

/// Which of the three templates an error refers to.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    #[error("url")]
    Url,
    #[error("header")]
    Header,
    #[error("body")]
    Body,
}

/// Syntax errors found while parsing a template. Fatal at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unterminated '{{{{' in {kind} template at byte {offset}.")]
    Unterminated { kind: TemplateKind, offset: usize },
    #[error("Empty placeholder in {kind} template at byte {offset}.")]
    EmptyPlaceholder { kind: TemplateKind, offset: usize },
    #[error("Invalid placeholder '{name}' in {kind} template.")]
    InvalidPlaceholder { kind: TemplateKind, name: String },
}

/// Errors scoped to a single data row. The row is skipped, the batch continues.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Row has {actual} cells but the header has {expected}.")]
    RowLengthMismatch { expected: usize, actual: usize },
    #[error("No column named '{name}' for the {kind} template.")]
    UnresolvedReference { kind: TemplateKind, name: String },
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Invalid header name '{name}'.")]
    InvalidHeaderName { name: String },
    #[error("Invalid value for header '{name}'.")]
    InvalidHeaderValue { name: String },
}
