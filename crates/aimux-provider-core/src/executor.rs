use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use aimux_transform::Format;

use crate::errors::ExecuteError;
use crate::usage::Detail;

pub type ByteStream = tokio::sync::mpsc::Receiver<Bytes>;

/// Credential and egress settings for one upstream account.
#[derive(Debug, Clone, Default)]
pub struct Auth {
    pub provider: String,
    pub api_key: Option<String>,
    /// Per-auth outbound proxy; overrides the global proxy when set.
    pub proxy_url: Option<String>,
    /// Endpoint override (regional gateways, test servers).
    pub base_url: Option<String>,
    pub attributes: HashMap<String, String>,
}

/// One inbound request as handed to an executor. `model` may still carry its
/// variant suffix; `payload` is the source-format JSON body.
#[derive(Debug, Clone)]
pub struct ExecRequest {
    pub model: String,
    pub payload: Bytes,
}

#[derive(Debug, Clone, Copy)]
pub struct ExecOptions {
    pub source_format: Format,
    /// Optional request-level deadline overlaid on the shared client.
    pub timeout: Option<Duration>,
}

impl ExecOptions {
    pub fn new(source_format: Format) -> Self {
        Self {
            source_format,
            timeout: None,
        }
    }
}

#[derive(Debug)]
pub struct ExecResponse {
    pub body: Bytes,
    pub usage: Option<Detail>,
}

/// Provider-specific request-issuing shell.
#[async_trait]
pub trait ProviderExecutor: Send + Sync {
    /// Provider key this executor serves (matches the registry client type).
    fn provider(&self) -> &str;

    async fn execute(
        &self,
        auth: &Auth,
        req: ExecRequest,
        opts: ExecOptions,
    ) -> Result<ExecResponse, ExecuteError>;

    async fn execute_stream(
        &self,
        auth: &Auth,
        req: ExecRequest,
        opts: ExecOptions,
    ) -> Result<ByteStream, ExecuteError>;
}
