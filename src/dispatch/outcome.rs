use crate::error::TransportError;
use crate::request::BuiltRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSummary {
    pub status: u16,
    /// Present only when the body was captured.
    pub body: Option<String>,
    pub body_len: u64,
}

impl ResponseSummary {
    /// 2xx and 3xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 400
    }
}

/// What happened when a request was attempted.
#[derive(Debug)]
pub enum Attempt {
    Response(ResponseSummary),
    Failed(TransportError),
    /// Dry run: the request was scheduled but never sent.
    NotSent,
}

/// One per scheduled request, in completion order.
#[derive(Debug)]
pub struct Outcome {
    pub request: BuiltRequest,
    pub attempt: Attempt,
}

impl Outcome {
    #[must_use]
    pub const fn response(&self) -> Option<&ResponseSummary> {
        match &self.attempt {
            Attempt::Response(response) => Some(response),
            Attempt::Failed(_) | Attempt::NotSent => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&TransportError> {
        match &self.attempt {
            Attempt::Failed(err) => Some(err),
            Attempt::Response(_) | Attempt::NotSent => None,
        }
    }
}
