use bytes::Bytes;

use aimux_transform::{Format, TranslateError};

/// Errors from the thinking adaptation path. These abort a request before
/// any network IO happens.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AdaptError {
    /// Requested variant is outside the canonical level set for a model the
    /// registry describes.
    #[error("unknown thinking level: {level}")]
    UnknownLevel { level: String },
    #[error("no translator registered for {from} -> {to}")]
    TranslatorMissing { from: Format, to: Format },
    #[error("malformed payload: {reason}")]
    PayloadMalformed { reason: String },
}

impl From<TranslateError> for AdaptError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::UnsupportedPair { from, to } => {
                AdaptError::TranslatorMissing { from, to }
            }
            TranslateError::InvalidPayload(reason) => AdaptError::PayloadMalformed { reason },
        }
    }
}

/// Which phase of an upstream request timed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutKind {
    Connect,
    ResponseHeader,
    Unknown,
}

impl TimeoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeoutKind::Connect => "connect",
            TimeoutKind::ResponseHeader => "response_header",
            TimeoutKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TimeoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal failure of a single executor request.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Adapt(#[from] AdaptError),
    #[error("missing credential field: {field}")]
    MissingCredential { field: &'static str },
    #[error("upstream {kind} timeout: {message}")]
    Timeout { kind: TimeoutKind, message: String },
    #[error("upstream transport error: {message}")]
    Transport { message: String },
    /// Non-2xx upstream response, passed through with its body.
    #[error("upstream returned status {status}")]
    Http { status: u16, body: Bytes },
}
