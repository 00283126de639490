//! Streaming bridge: forwards upstream SSE bytes to the caller over a
//! bounded channel, enforcing an idle timeout, rewriting Codex lifecycle
//! frames, and scanning for a trailing usage object so streamed requests
//! publish token counts too.

use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use serde_json::Value;
use tokio::sync::mpsc;

use aimux_provider_core::{ByteStream, Detail, UsageReporter};
use aimux_transform::{Format, translate::rewrite_codex_event};

use super::usage;

const STREAM_CHANNEL_CAPACITY: usize = 16;

pub(crate) fn relay(
    response: wreq::Response,
    target: Format,
    original_request: Value,
    reporter: UsageReporter,
    idle_timeout: Duration,
) -> ByteStream {
    let (tx, rx) = mpsc::channel::<Bytes>(STREAM_CHANNEL_CAPACITY);
    tokio::spawn(async move {
        let mut stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();
        let mut detail: Option<Detail> = None;
        let rewrite = target == Format::Codex;

        'receive: loop {
            let next = tokio::time::timeout(idle_timeout, stream.next()).await;
            let item = match next {
                Ok(item) => item,
                Err(_) => {
                    tracing::warn!(
                        provider_format = target.as_str(),
                        idle = ?idle_timeout,
                        "upstream stream idle timeout, closing"
                    );
                    break;
                }
            };
            let Some(item) = item else {
                break;
            };
            let Ok(chunk) = item else {
                break;
            };
            buffer.extend_from_slice(&chunk);

            while let Some(end) = find_frame_end(&buffer) {
                let frame: Vec<u8> = buffer.drain(..end + 2).collect();
                if let Some(found) = usage::usage_from_sse_frame(target, &frame) {
                    detail = Some(found);
                }
                let out = if rewrite {
                    rewrite_frame(&original_request, &frame)
                } else {
                    Bytes::from(frame)
                };
                if tx.send(out).await.is_err() {
                    break 'receive;
                }
            }
        }

        if !buffer.is_empty() {
            if let Some(found) = usage::usage_from_sse_frame(target, &buffer) {
                detail = Some(found);
            }
            let _ = tx.send(Bytes::from(buffer)).await;
        }
        reporter.publish(detail.unwrap_or_default());
    });
    rx
}

fn find_frame_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|window| window == b"\n\n")
}

/// Rewrites each data line of a frame through the Codex lifecycle fixup,
/// keeping non-data lines (event names, comments) intact.
fn rewrite_frame(original_request: &Value, frame: &[u8]) -> Bytes {
    let text = String::from_utf8_lossy(frame);
    let body = text.trim_end_matches('\n');
    let mut lines = Vec::new();
    for line in body.lines() {
        if line.starts_with("data:") {
            lines.extend(rewrite_codex_event(original_request, line.as_bytes()));
        } else {
            lines.push(line.to_string());
        }
    }
    Bytes::from(format!("{}\n\n", lines.join("\n")))
}
