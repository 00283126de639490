//! Extracts token usage from upstream response bodies, per target format.

use serde_json::Value;

use aimux_provider_core::Detail;
use aimux_transform::Format;

pub(crate) fn usage_from_body(format: Format, body: &[u8]) -> Option<Detail> {
    let value = serde_json::from_slice::<Value>(body).ok()?;
    usage_from_value(format, &value)
}

pub(crate) fn usage_from_value(format: Format, value: &Value) -> Option<Detail> {
    match format {
        Format::OpenAI | Format::IFlow | Format::Kimi => {
            let usage = value.get("usage")?;
            Some(Detail {
                input_tokens: int_of(usage, "prompt_tokens"),
                output_tokens: int_of(usage, "completion_tokens"),
                total_tokens: int_of(usage, "total_tokens"),
            })
        }
        Format::Codex => {
            // Streaming events carry usage under the response envelope.
            let usage = value
                .get("usage")
                .or_else(|| value.pointer("/response/usage"))?;
            Some(Detail {
                input_tokens: int_of(usage, "input_tokens"),
                output_tokens: int_of(usage, "output_tokens"),
                total_tokens: int_of(usage, "total_tokens"),
            })
        }
        Format::Claude => {
            let usage = value.get("usage")?;
            let input = int_of(usage, "input_tokens");
            let output = int_of(usage, "output_tokens");
            Some(Detail {
                input_tokens: input,
                output_tokens: output,
                total_tokens: input + output,
            })
        }
        Format::Gemini | Format::GeminiCli | Format::Antigravity => {
            let usage = value
                .get("usageMetadata")
                .or_else(|| value.pointer("/response/usageMetadata"))?;
            Some(Detail {
                input_tokens: int_of(usage, "promptTokenCount"),
                output_tokens: int_of(usage, "candidatesTokenCount"),
                total_tokens: int_of(usage, "totalTokenCount"),
            })
        }
    }
}

/// Scans one SSE frame for a usage object in any of its data lines.
pub(crate) fn usage_from_sse_frame(format: Format, frame: &[u8]) -> Option<Detail> {
    let text = std::str::from_utf8(frame).ok()?;
    for line in text.lines() {
        if let Some(data) = line.strip_prefix("data:") {
            if let Ok(value) = serde_json::from_str::<Value>(data.trim()) {
                if let Some(detail) = usage_from_value(format, &value) {
                    return Some(detail);
                }
            }
        }
    }
    None
}

fn int_of(value: &Value, key: &str) -> i64 {
    value.get(key).and_then(Value::as_i64).unwrap_or(0)
}
