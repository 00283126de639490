//! Codex (OpenAI Responses) response normalization.
//!
//! Codex upstreams echo back a server-side `instructions` value on lifecycle
//! events instead of the one the client sent; these helpers restore the
//! original request's instructions and wrap bare error JSON as a proper
//! Responses SSE error event.

use serde_json::{Value, json};

const LIFECYCLE_EVENTS: [&str; 3] = ["response.created", "response.in_progress", "response.completed"];

/// Rewrites one upstream SSE frame. Non-`data:` frames and frames without an
/// instructions echo pass through unchanged.
pub fn rewrite_codex_event(original_request: &Value, raw: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(raw);
    if let Some(data) = text.strip_prefix("data:") {
        if let Ok(mut event) = serde_json::from_str::<Value>(data.trim()) {
            let event_type = event.get("type").and_then(Value::as_str).unwrap_or("");
            if LIFECYCLE_EVENTS.contains(&event_type)
                && event.pointer("/response/instructions").is_some()
            {
                let instructions = original_request
                    .get("instructions")
                    .cloned()
                    .unwrap_or(Value::String(String::new()));
                if let Some(response) = event.get_mut("response").and_then(Value::as_object_mut) {
                    response.insert("instructions".to_string(), instructions);
                }
                return vec![format!("data: {event}")];
            }
        }
        return vec![text.into_owned()];
    }

    // Bare error JSON (no SSE framing) becomes a Responses error event.
    if let Ok(body) = serde_json::from_slice::<Value>(raw) {
        if let Some(error) = body.get("error") {
            let event = json!({ "type": "error", "sequence_number": 0, "error": error });
            return vec![format!("data: {event}")];
        }
    }

    vec![text.into_owned()]
}

/// Builds the single Responses JSON body from a non-streaming
/// `response.completed` event, restoring the request's instructions.
/// Returns `None` when the body is not a completed event.
pub fn normalize_codex_response(original_request: &Value, raw: &[u8]) -> Option<String> {
    let body = serde_json::from_slice::<Value>(raw).ok()?;
    if body.get("type").and_then(Value::as_str) != Some("response.completed") {
        return None;
    }
    let mut response = body.get("response")?.clone();
    if response.get("instructions").is_some() {
        let instructions = original_request
            .get("instructions")
            .cloned()
            .unwrap_or(Value::String(String::new()));
        if let Some(object) = response.as_object_mut() {
            object.insert("instructions".to_string(), instructions);
        }
    }
    Some(response.to_string())
}
