//! The default request translators, one function per `(from, to)` pair.
//!
//! These operate on `serde_json::Value` and only map the request shape:
//! thinking fields are handled afterwards by the adaptation engine, so a
//! translator dropping a source-side `reasoning_effort` or `thinking` block
//! is fine.

use serde_json::{Map, Value, json};

use super::TranslateError;

pub(super) fn identity(_model: &str, payload: Value) -> Result<Value, TranslateError> {
    Ok(payload)
}

pub(super) fn openai_to_claude(model: &str, payload: Value) -> Result<Value, TranslateError> {
    let object = as_object(&payload)?;
    let mut out = Map::new();
    out.insert("model".to_string(), json!(model));
    out.insert(
        "max_tokens".to_string(),
        object
            .get("max_completion_tokens")
            .or_else(|| object.get("max_tokens"))
            .cloned()
            .unwrap_or(json!(4096)),
    );

    let mut system_parts: Vec<String> = Vec::new();
    let mut messages = Vec::new();
    for message in array_of(object, "messages") {
        let role = str_of(message, "role");
        let text = flatten_openai_content(message.get("content"));
        match role {
            "system" | "developer" => system_parts.push(text),
            "user" | "assistant" => {
                messages.push(json!({ "role": role, "content": text }));
            }
            _ => {}
        }
    }
    if !system_parts.is_empty() {
        out.insert("system".to_string(), json!(system_parts.join("\n\n")));
    }
    out.insert("messages".to_string(), Value::Array(messages));

    copy_fields(object, &mut out, &[("temperature", "temperature"), ("top_p", "top_p"), ("stream", "stream")]);
    if let Some(stop) = object.get("stop") {
        let sequences = match stop {
            Value::String(s) => json!([s]),
            Value::Array(_) => stop.clone(),
            _ => Value::Null,
        };
        if !sequences.is_null() {
            out.insert("stop_sequences".to_string(), sequences);
        }
    }
    Ok(Value::Object(out))
}

pub(super) fn openai_to_gemini(model: &str, payload: Value) -> Result<Value, TranslateError> {
    let object = as_object(&payload)?;
    let mut out = Map::new();
    out.insert("model".to_string(), json!(model));

    let mut system_parts: Vec<Value> = Vec::new();
    let mut contents = Vec::new();
    for message in array_of(object, "messages") {
        let text = flatten_openai_content(message.get("content"));
        match str_of(message, "role") {
            "system" | "developer" => system_parts.push(json!({ "text": text })),
            "user" => contents.push(json!({ "role": "user", "parts": [{ "text": text }] })),
            "assistant" => contents.push(json!({ "role": "model", "parts": [{ "text": text }] })),
            _ => {}
        }
    }
    if !system_parts.is_empty() {
        out.insert("systemInstruction".to_string(), json!({ "parts": system_parts }));
    }
    out.insert("contents".to_string(), Value::Array(contents));

    let mut generation = Map::new();
    if let Some(temperature) = object.get("temperature") {
        generation.insert("temperature".to_string(), temperature.clone());
    }
    if let Some(top_p) = object.get("top_p") {
        generation.insert("topP".to_string(), top_p.clone());
    }
    if let Some(max) = object
        .get("max_completion_tokens")
        .or_else(|| object.get("max_tokens"))
    {
        generation.insert("maxOutputTokens".to_string(), max.clone());
    }
    if !generation.is_empty() {
        out.insert("generationConfig".to_string(), Value::Object(generation));
    }
    Ok(Value::Object(out))
}

pub(super) fn openai_to_codex(model: &str, payload: Value) -> Result<Value, TranslateError> {
    let object = as_object(&payload)?;
    let mut out = Map::new();
    out.insert("model".to_string(), json!(model));

    let mut instruction_parts: Vec<String> = Vec::new();
    let mut input = Vec::new();
    for message in array_of(object, "messages") {
        let role = str_of(message, "role");
        let text = flatten_openai_content(message.get("content"));
        match role {
            "system" | "developer" => instruction_parts.push(text),
            "user" | "assistant" => {
                let content_type = if role == "assistant" {
                    "output_text"
                } else {
                    "input_text"
                };
                input.push(json!({
                    "type": "message",
                    "role": role,
                    "content": [{ "type": content_type, "text": text }],
                }));
            }
            _ => {}
        }
    }
    if !instruction_parts.is_empty() {
        out.insert("instructions".to_string(), json!(instruction_parts.join("\n\n")));
    }
    out.insert("input".to_string(), Value::Array(input));

    if let Some(max) = object
        .get("max_completion_tokens")
        .or_else(|| object.get("max_tokens"))
    {
        out.insert("max_output_tokens".to_string(), max.clone());
    }
    copy_fields(object, &mut out, &[
        ("temperature", "temperature"),
        ("top_p", "top_p"),
        ("stream", "stream"),
        ("reasoning_effort", "reasoning_effort"),
    ]);
    Ok(Value::Object(out))
}

pub(super) fn claude_to_openai(model: &str, payload: Value) -> Result<Value, TranslateError> {
    let object = as_object(&payload)?;
    let mut out = Map::new();
    out.insert("model".to_string(), json!(model));

    let mut messages = Vec::new();
    if let Some(system) = object.get("system") {
        let text = flatten_claude_content(system);
        if !text.is_empty() {
            messages.push(json!({ "role": "system", "content": text }));
        }
    }
    for message in array_of(object, "messages") {
        let role = str_of(message, "role");
        if role != "user" && role != "assistant" {
            continue;
        }
        let text = message
            .get("content")
            .map(flatten_claude_content)
            .unwrap_or_default();
        messages.push(json!({ "role": role, "content": text }));
    }
    out.insert("messages".to_string(), Value::Array(messages));

    if let Some(max_tokens) = object.get("max_tokens") {
        out.insert("max_completion_tokens".to_string(), max_tokens.clone());
    }
    copy_fields(object, &mut out, &[("temperature", "temperature"), ("top_p", "top_p"), ("stream", "stream")]);
    if let Some(Value::Array(sequences)) = object.get("stop_sequences") {
        out.insert("stop".to_string(), Value::Array(sequences.clone()));
    }
    Ok(Value::Object(out))
}

pub(super) fn codex_to_openai(model: &str, payload: Value) -> Result<Value, TranslateError> {
    let object = as_object(&payload)?;
    let mut out = Map::new();
    out.insert("model".to_string(), json!(model));

    let mut messages = Vec::new();
    if let Some(instructions) = object.get("instructions").and_then(Value::as_str) {
        if !instructions.is_empty() {
            messages.push(json!({ "role": "system", "content": instructions }));
        }
    }
    match object.get("input") {
        Some(Value::String(text)) => {
            messages.push(json!({ "role": "user", "content": text }));
        }
        Some(Value::Array(items)) => {
            for item in items {
                if item.get("type").and_then(Value::as_str) != Some("message") {
                    continue;
                }
                let role = str_of(item, "role");
                let text = flatten_codex_content(item.get("content"));
                messages.push(json!({ "role": role, "content": text }));
            }
        }
        _ => {}
    }
    out.insert("messages".to_string(), Value::Array(messages));

    if let Some(max) = object.get("max_output_tokens") {
        out.insert("max_completion_tokens".to_string(), max.clone());
    }
    copy_fields(object, &mut out, &[("temperature", "temperature"), ("top_p", "top_p"), ("stream", "stream")]);
    Ok(Value::Object(out))
}

/// Wraps a Gemini body in the `{ "model", "request" }` envelope used by the
/// CLI-derived providers.
pub(super) fn gemini_to_gemini_cli(model: &str, payload: Value) -> Result<Value, TranslateError> {
    let mut body = payload;
    if let Some(object) = body.as_object_mut() {
        object.remove("model");
    }
    Ok(json!({ "model": model, "request": body }))
}

pub(super) fn openai_to_gemini_cli(model: &str, payload: Value) -> Result<Value, TranslateError> {
    gemini_to_gemini_cli(model, openai_to_gemini(model, payload)?)
}

pub(super) fn claude_to_gemini(model: &str, payload: Value) -> Result<Value, TranslateError> {
    openai_to_gemini(model, claude_to_openai(model, payload)?)
}

pub(super) fn claude_to_gemini_cli(model: &str, payload: Value) -> Result<Value, TranslateError> {
    gemini_to_gemini_cli(model, claude_to_gemini(model, payload)?)
}

pub(super) fn claude_to_codex(model: &str, payload: Value) -> Result<Value, TranslateError> {
    openai_to_codex(model, claude_to_openai(model, payload)?)
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, TranslateError> {
    payload
        .as_object()
        .ok_or_else(|| TranslateError::InvalidPayload("request body must be a JSON object".to_string()))
}

fn array_of<'a>(object: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn str_of<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

fn copy_fields(src: &Map<String, Value>, dst: &mut Map<String, Value>, fields: &[(&str, &str)]) {
    for (from, to) in fields {
        if let Some(value) = src.get(*from) {
            dst.insert((*to).to_string(), value.clone());
        }
    }
}

/// OpenAI message content: either a plain string or an array of typed parts.
fn flatten_openai_content(content: Option<&Value>) -> String {
    match content {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(parts)) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(""),
        _ => String::new(),
    }
}

/// Claude content: a plain string or an array of content blocks.
fn flatten_claude_content(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Array(blocks) => blocks
            .iter()
            .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|block| block.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(""),
        _ => String::new(),
    }
}

/// Codex message content: an array of `input_text` / `output_text` parts.
fn flatten_codex_content(content: Option<&Value>) -> String {
    match content {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(parts)) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(""),
        _ => String::new(),
    }
}
