use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid S3 location '{location}'. Expected s3://bucket/key.")]
    InvalidS3Location { location: String },
    #[error("Missing AWS credential '{name}' for S3 download.")]
    MissingAwsCredential { name: &'static str },
    #[error("Invalid S3 URL '{url}': {source}")]
    InvalidS3Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to build sigv4 params: {source}")]
    SigV4Params {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to build sigv4 request: {source}")]
    SigV4Request {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to sign request: {source}")]
    SigV4Sign {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to build sign request: {source}")]
    SigV4BuildSign {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to download '{location}': {source}")]
    DownloadFailed {
        location: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to download '{location}': HTTP {status}")]
    DownloadStatus { location: String, status: u16 },
}
