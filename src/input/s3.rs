use aws_credential_types::Credentials;
use aws_sigv4::http_request::{
    PayloadChecksumKind, PercentEncodingMode, SignableBody, SignableRequest, SigningSettings,
    UriPathNormalizationMode, sign,
};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use reqwest::{Client, Url};

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};

const DEFAULT_REGION: &str = "us-east-1";
const SERVICE: &str = "s3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Location {
    pub bucket: String,
    pub key: String,
}

impl S3Location {
    /// `rest` is the part after `s3://`: first segment is the bucket, the
    /// remainder (slashes included) is the key.
    pub(super) fn parse(original: &str, rest: &str) -> AppResult<Self> {
        let invalid = || {
            AppError::http(HttpError::InvalidS3Location {
                location: original.to_owned(),
            })
        };
        let (bucket, key) = rest.split_once('/').ok_or_else(invalid)?;
        if bucket.is_empty() || key.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
        })
    }

    fn display(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }
}

/// Credentials and addressing for the S3 download, taken from the usual AWS
/// environment variables.
#[derive(Clone)]
pub struct AwsSettings {
    pub access_key: String,
    pub secret_key: String,
    pub session_token: Option<String>,
    pub region: String,
    /// Path-style endpoint for S3-compatible stores.
    pub endpoint: Option<String>,
}

impl std::fmt::Debug for AwsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSettings")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl AwsSettings {
    /// # Errors
    ///
    /// Returns an error when the access key or secret key is not set.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let access_key = non_empty("AWS_ACCESS_KEY_ID").ok_or_else(|| {
            AppError::http(HttpError::MissingAwsCredential {
                name: "AWS_ACCESS_KEY_ID",
            })
        })?;
        let secret_key = non_empty("AWS_SECRET_ACCESS_KEY").ok_or_else(|| {
            AppError::http(HttpError::MissingAwsCredential {
                name: "AWS_SECRET_ACCESS_KEY",
            })
        })?;
        let region = non_empty("AWS_REGION")
            .or_else(|| non_empty("AWS_DEFAULT_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_owned());
        Ok(Self {
            access_key,
            secret_key,
            session_token: non_empty("AWS_SESSION_TOKEN"),
            region,
            endpoint: non_empty("AWS_ENDPOINT_URL"),
        })
    }
}

pub(crate) fn object_url(location: &S3Location, settings: &AwsSettings) -> AppResult<Url> {
    let base = match settings.endpoint.as_deref() {
        Some(endpoint) => endpoint.to_owned(),
        None => format!(
            "https://{}.s3.{}.amazonaws.com/",
            location.bucket, settings.region
        ),
    };
    let mut url = Url::parse(&base).map_err(|err| {
        AppError::http(HttpError::InvalidS3Url {
            url: base.clone(),
            source: err,
        })
    })?;
    {
        let mut segments = url.path_segments_mut().map_err(|()| {
            AppError::http(HttpError::InvalidS3Location {
                location: location.display(),
            })
        })?;
        segments.pop_if_empty();
        if settings.endpoint.is_some() {
            segments.push(&location.bucket);
        }
        segments.extend(location.key.split('/'));
    }
    Ok(url)
}

fn signed_headers(url: &Url, settings: &AwsSettings) -> AppResult<http::HeaderMap> {
    let identity: Identity = Credentials::new(
        &settings.access_key,
        &settings.secret_key,
        settings.session_token.clone(),
        None,
        "csvreq",
    )
    .into();
    let mut signing_settings = SigningSettings::default();
    signing_settings.payload_checksum_kind = PayloadChecksumKind::XAmzSha256;
    signing_settings.percent_encoding_mode = PercentEncodingMode::Single;
    signing_settings.uri_path_normalization_mode = UriPathNormalizationMode::Disabled;
    let signing_params = v4::SigningParams::builder()
        .identity(&identity)
        .region(&settings.region)
        .name(SERVICE)
        .time(std::time::SystemTime::now())
        .settings(signing_settings)
        .build()
        .map_err(|err| {
            AppError::http(HttpError::SigV4Params {
                source: Box::new(err),
            })
        })?
        .into();

    let signable = SignableRequest::new(
        "GET",
        url.as_str(),
        std::iter::empty(),
        SignableBody::Bytes(&[]),
    )
    .map_err(|err| {
        AppError::http(HttpError::SigV4Request {
            source: Box::new(err),
        })
    })?;

    let (instructions, _signature) = sign(signable, &signing_params)
        .map_err(|err| {
            AppError::http(HttpError::SigV4Sign {
                source: Box::new(err),
            })
        })?
        .into_parts();

    let mut http_req = http::Request::builder()
        .method("GET")
        .uri(url.as_str())
        .body(())
        .map_err(|err| {
            AppError::http(HttpError::SigV4BuildSign {
                source: Box::new(err),
            })
        })?;
    instructions.apply_to_request_http1x(&mut http_req);
    Ok(http_req.headers().clone())
}

pub(super) async fn download_object(
    location: &S3Location,
    settings: &AwsSettings,
) -> AppResult<Vec<u8>> {
    let url = object_url(location, settings)?;
    let headers = signed_headers(&url, settings)?;
    let client = Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;

    let download_failed = |err| {
        AppError::http(HttpError::DownloadFailed {
            location: location.display(),
            source: err,
        })
    };
    let response = client
        .get(url)
        .headers(headers)
        .send()
        .await
        .map_err(download_failed)?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::http(HttpError::DownloadStatus {
            location: location.display(),
            status: status.as_u16(),
        }));
    }
    let body = response.bytes().await.map_err(download_failed)?;
    Ok(body.to_vec())
}
