use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;

use crate::args::DEFAULT_USER_AGENT;
use crate::dispatch::{BodyMode, ResponseSummary, Transport};
use crate::error::{AppError, AppResult, HttpError, TransportError};
use crate::request::BuiltRequest;

/// Sends built requests with one shared reqwest client and a fixed timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns an error when the underlying client cannot be built.
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &BuiltRequest,
        body_mode: BodyMode,
    ) -> Result<ResponseSummary, TransportError> {
        let mut builder = self
            .client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());
        if !request.body().is_empty() {
            builder = builder.body(request.body().to_owned());
        }
        let http_request = builder
            .build()
            .map_err(|err| TransportError::BuildRequest { source: err })?;

        let response = self
            .client
            .execute(http_request)
            .await
            .map_err(TransportError::from_send)?;
        let status = response.status().as_u16();
        let (body_len, body) = drain_response_body(response, body_mode)
            .await
            .map_err(TransportError::from_read)?;

        Ok(ResponseSummary {
            status,
            body: body.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()),
            body_len,
        })
    }
}

/// Reads the body to the end so the connection is released, keeping the
/// bytes only when asked to.
async fn drain_response_body(
    response: reqwest::Response,
    body_mode: BodyMode,
) -> Result<(u64, Option<Vec<u8>>), reqwest::Error> {
    let mut captured = match body_mode {
        BodyMode::Capture => Some(Vec::new()),
        BodyMode::Discard => None,
    };
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
        if let Some(buffer) = captured.as_mut() {
            buffer.extend_from_slice(&bytes);
        }
    }
    Ok((total_bytes, captured))
}
