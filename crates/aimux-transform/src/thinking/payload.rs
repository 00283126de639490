//! Reads and writes the thinking fields of provider payloads.
//!
//! Each wire format carries reasoning effort in one of four schemas:
//! OpenAI-style `reasoning_effort`, Codex/Responses `reasoning.effort`,
//! Claude `thinking` blocks, and the Gemini `generationConfig.thinkingConfig`
//! subtree (bare, or wrapped in a `request` envelope for the CLI-derived
//! providers).

use serde_json::{Map, Value, json};

use super::config::ThinkingConfig;
use super::level::{ThinkingLevel, budget_for_level};
use crate::translate::Format;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Schema {
    OpenAI,
    Codex,
    Claude,
    Gemini,
    GeminiEnvelope,
}

fn schema(format: Format) -> Schema {
    match format {
        Format::OpenAI | Format::IFlow | Format::Kimi => Schema::OpenAI,
        Format::Codex => Schema::Codex,
        Format::Claude => Schema::Claude,
        Format::Gemini => Schema::Gemini,
        Format::GeminiCli | Format::Antigravity => Schema::GeminiEnvelope,
    }
}

/// Extracts the in-payload thinking config using the source format's rules.
/// Returns `None` when the payload carries no thinking fields at all.
pub fn extract_config(format: Format, payload: &Value) -> Option<ThinkingConfig> {
    match schema(format) {
        Schema::OpenAI => extract_openai(payload),
        Schema::Codex => extract_codex(payload),
        Schema::Claude => extract_claude(payload),
        Schema::Gemini => extract_gemini(payload),
        Schema::GeminiEnvelope => payload
            .get("request")
            .and_then(extract_gemini)
            .or_else(|| extract_gemini(payload)),
    }
}

fn extract_openai(payload: &Value) -> Option<ThinkingConfig> {
    let effort = payload.get("reasoning_effort")?.as_str()?;
    Some(ThinkingConfig::Level(effort.trim().to_ascii_lowercase()))
}

fn extract_codex(payload: &Value) -> Option<ThinkingConfig> {
    if let Some(effort) = payload.pointer("/reasoning/effort").and_then(Value::as_str) {
        return Some(ThinkingConfig::Level(effort.trim().to_ascii_lowercase()));
    }
    extract_openai(payload)
}

fn extract_claude(payload: &Value) -> Option<ThinkingConfig> {
    let thinking = payload.get("thinking")?;
    let budget = thinking.get("budget_tokens").and_then(Value::as_i64);
    match thinking.get("type").and_then(Value::as_str) {
        Some("disabled") => Some(ThinkingConfig::None { level: None }),
        Some("enabled") => match budget {
            Some(budget) => Some(ThinkingConfig::Budget(budget)),
            None => Some(ThinkingConfig::Auto),
        },
        _ => budget.map(ThinkingConfig::Budget),
    }
}

fn extract_gemini(payload: &Value) -> Option<ThinkingConfig> {
    let config = payload.pointer("/generationConfig/thinkingConfig")?;
    if let Some(level) = config.get("thinkingLevel").and_then(Value::as_str) {
        return Some(ThinkingConfig::Level(level.trim().to_ascii_lowercase()));
    }
    match config.get("thinkingBudget").and_then(Value::as_i64) {
        // -1 asks Gemini to pick the budget itself.
        Some(-1) => Some(ThinkingConfig::Auto),
        Some(budget) => Some(ThinkingConfig::Budget(budget)),
        None => None,
    }
}

/// Writes a resolved level into the payload using the target format's schema.
pub fn apply_level(format: Format, payload: &mut Value, level: ThinkingLevel) {
    match schema(format) {
        Schema::OpenAI | Schema::Codex => apply_openai(payload, level),
        Schema::Claude => apply_claude(payload, level),
        Schema::Gemini => apply_gemini(payload, level),
        Schema::GeminiEnvelope => with_envelope_body(payload, |body| apply_gemini(body, level)),
    }
}

fn apply_openai(payload: &mut Value, level: ThinkingLevel) {
    if let Some(object) = payload.as_object_mut() {
        object.insert("reasoning_effort".to_string(), json!(level.as_str()));
        // Responses-shaped payloads may also carry a reasoning block; keep it
        // consistent with the top-level field.
        if let Some(reasoning) = object.get_mut("reasoning").and_then(Value::as_object_mut) {
            reasoning.insert("effort".to_string(), json!(level.as_str()));
        }
    }
}

fn apply_claude(payload: &mut Value, level: ThinkingLevel) {
    let Some(object) = payload.as_object_mut() else {
        return;
    };
    let thinking = match level {
        ThinkingLevel::None => json!({ "type": "disabled" }),
        level => json!({ "type": "enabled", "budget_tokens": budget_for_level(level) }),
    };
    object.insert("thinking".to_string(), thinking);
}

fn apply_gemini(payload: &mut Value, level: ThinkingLevel) {
    let Some(object) = payload.as_object_mut() else {
        return;
    };
    let generation = ensure_object(object, "generationConfig");
    let thinking = match level {
        ThinkingLevel::None => json!({ "thinkingBudget": 0 }),
        ThinkingLevel::Auto => json!({ "thinkingBudget": -1, "includeThoughts": true }),
        level => json!({ "thinkingLevel": level.as_str(), "includeThoughts": true }),
    };
    generation.insert("thinkingConfig".to_string(), thinking);
}

/// Deletes the thinking fields from the payload entirely.
pub fn remove_thinking(format: Format, payload: &mut Value) {
    match schema(format) {
        Schema::OpenAI | Schema::Codex => {
            if let Some(object) = payload.as_object_mut() {
                object.remove("reasoning_effort");
                if let Some(reasoning) = object.get_mut("reasoning").and_then(Value::as_object_mut)
                {
                    reasoning.remove("effort");
                }
            }
        }
        Schema::Claude => {
            if let Some(object) = payload.as_object_mut() {
                object.remove("thinking");
            }
        }
        Schema::Gemini => remove_gemini(payload),
        Schema::GeminiEnvelope => with_envelope_body(payload, remove_gemini),
    }
}

fn remove_gemini(payload: &mut Value) {
    if let Some(generation) = payload
        .get_mut("generationConfig")
        .and_then(Value::as_object_mut)
    {
        generation.remove("thinkingConfig");
    }
}

fn with_envelope_body(payload: &mut Value, apply: impl FnOnce(&mut Value)) {
    if payload.get("request").is_some() {
        if let Some(body) = payload.get_mut("request") {
            apply(body);
        }
    } else {
        apply(payload);
    }
}

fn ensure_object<'a>(object: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let entry = object
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    match entry {
        Value::Object(map) => map,
        _ => unreachable!("entry was just set to an object"),
    }
}
