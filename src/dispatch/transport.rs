use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::BuiltRequest;

use super::outcome::ResponseSummary;

/// Whether the response body should be kept after it is drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    Discard,
    Capture,
}

/// Performs the network I/O for one request.
///
/// Implementations must read the response body to completion before
/// returning, and apply their own per-request timeout.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: &BuiltRequest,
        body_mode: BodyMode,
    ) -> Result<ResponseSummary, TransportError>;
}
