//! Turns an inbound HTTP request into a dispatchable form: source format,
//! model id (possibly still carrying a variant suffix), and stream flag.

use bytes::Bytes;
use serde_json::Value;

use aimux_transform::Format;

#[derive(Debug)]
pub(crate) struct InboundRequest {
    pub source_format: Format,
    pub model: String,
    pub stream: bool,
    pub payload: Bytes,
}

/// Body-driven classification for the formats that carry model and stream
/// flag in the payload.
pub(crate) fn from_body(source_format: Format, payload: Bytes) -> Result<InboundRequest, String> {
    let value: Value =
        serde_json::from_slice(&payload).map_err(|err| format!("invalid JSON body: {err}"))?;
    let model = value
        .get("model")
        .and_then(Value::as_str)
        .filter(|model| !model.trim().is_empty())
        .ok_or_else(|| "missing model".to_string())?
        .to_string();
    let stream = value.get("stream").and_then(Value::as_bool).unwrap_or(false);
    Ok(InboundRequest {
        source_format,
        model,
        stream,
        payload,
    })
}

/// Splits a Gemini path segment like `gemini-2.5-flash:streamGenerateContent`
/// into the model id and stream flag. Unknown actions are rejected.
pub(crate) fn split_gemini_action(model_action: &str) -> Option<(String, bool)> {
    let (model, action) = model_action.rsplit_once(':')?;
    if model.is_empty() {
        return None;
    }
    match action {
        "generateContent" => Some((model.to_string(), false)),
        "streamGenerateContent" => Some((model.to_string(), true)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_classification_reads_model_and_stream() {
        let payload = Bytes::from(
            serde_json::to_vec(&json!({
                "model": "gpt-5(high)",
                "stream": true,
                "messages": []
            }))
            .unwrap(),
        );
        let inbound = from_body(Format::OpenAI, payload).unwrap();
        assert_eq!(inbound.model, "gpt-5(high)");
        assert!(inbound.stream);
    }

    #[test]
    fn body_without_model_is_rejected() {
        let payload = Bytes::from_static(b"{\"messages\":[]}");
        assert!(from_body(Format::OpenAI, payload).is_err());

        let payload = Bytes::from_static(b"not json");
        assert!(from_body(Format::OpenAI, payload).is_err());
    }

    #[test]
    fn gemini_action_split() {
        assert_eq!(
            split_gemini_action("gemini-2.5-flash:generateContent"),
            Some(("gemini-2.5-flash".to_string(), false))
        );
        assert_eq!(
            split_gemini_action("gemini-3.1-pro-high(medium):streamGenerateContent"),
            Some(("gemini-3.1-pro-high(medium)".to_string(), true))
        );
        assert_eq!(split_gemini_action("gemini-2.5-flash:countTokens"), None);
        assert_eq!(split_gemini_action("no-action"), None);
    }
}
