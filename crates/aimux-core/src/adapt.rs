//! Thinking adaptation engine.
//!
//! Given a raw source-format payload and a model id that may carry a variant
//! suffix, the engine resolves the requested thinking level against the
//! model registry, translates the payload to the target format, and rewrites
//! the thinking fields to the resolved level.

use serde_json::Value;

use aimux_provider_core::registry::{ThinkingSupport, global_model_registry};
use aimux_provider_core::{AdaptError, UsageReporter};
use aimux_transform::thinking::payload as thinking_fields;
use aimux_transform::{
    AdaptationMeta, Format, ThinkingLevel, parse_suffix, translate, variant_from_config,
};

/// Provider keys whose wire envelopes this proxy knows. Requests for models
/// these providers have not registered pass through without a thinking
/// rewrite; anything else is treated as user-defined.
pub const KNOWN_PROVIDERS: [&str; 15] = [
    "openai",
    "codex",
    "claude",
    "gemini",
    "aistudio",
    "vertex",
    "gemini-cli",
    "antigravity",
    "qwen",
    "kilo",
    "kiro",
    "kimi",
    "iflow",
    "github-copilot",
    "openrouter",
];

/// Applies thinking adaptation, discarding the metadata.
pub fn apply_thinking(
    payload: &[u8],
    model_with_suffix: &str,
    from: Format,
    to: Format,
    provider: &str,
) -> Result<Vec<u8>, AdaptError> {
    apply_thinking_with_meta(payload, model_with_suffix, from, to, provider)
        .map(|(payload, _)| payload)
}

/// Applies thinking adaptation and reports how the variant was handled.
pub fn apply_thinking_with_meta(
    payload: &[u8],
    model_with_suffix: &str,
    from: Format,
    to: Format,
    provider: &str,
) -> Result<(Vec<u8>, AdaptationMeta), AdaptError> {
    let parsed = parse_suffix(model_with_suffix);
    let value = parse_payload(payload)?;

    let in_payload = thinking_fields::extract_config(from, &value);
    let origin = match parsed.level {
        // The suffix wins over any in-payload config.
        Some(level) => level,
        None => in_payload
            .as_ref()
            .map(variant_from_config)
            .unwrap_or_default(),
    };

    // No explicit variant anywhere: translate but leave thinking untouched.
    if origin.is_empty() {
        let translated =
            translate::global_registry().translate(from, to, &parsed.model_name, value)?;
        return Ok((serialize(&translated), AdaptationMeta::build("", "", "")));
    }

    let descriptor = global_model_registry().lookup(&parsed.model_name);
    let Some(descriptor) = descriptor else {
        return passthrough_unregistered(&parsed.model_name, value, &origin, from, to, provider);
    };

    match &descriptor.thinking {
        None if descriptor.user_defined => {
            // Unknown capabilities: accept canonical levels verbatim, fail
            // closed on anything else.
            let Some(level) = ThinkingLevel::parse(&origin) else {
                return Err(AdaptError::UnknownLevel { level: origin });
            };
            let mut translated =
                translate::global_registry().translate(from, to, &parsed.model_name, value)?;
            thinking_fields::apply_level(to, &mut translated, level);
            let meta = AdaptationMeta::build(&origin, level.as_str(), "");
            Ok((serialize(&translated), meta))
        }
        None => {
            // The model is declared without thinking support at all.
            if ThinkingLevel::parse(&origin).is_none() {
                return Err(AdaptError::UnknownLevel { level: origin });
            }
            let mut translated =
                translate::global_registry().translate(from, to, &parsed.model_name, value)?;
            thinking_fields::remove_thinking(to, &mut translated);
            let meta = AdaptationMeta::build(&origin, "", "");
            Ok((serialize(&translated), meta))
        }
        Some(support) => {
            resolve_with_support(&parsed.model_name, value, &origin, support, from, to)
        }
    }
}

/// Captures the requested variant on the reporter before validation, so a
/// failed request still publishes its origin, then overwrites with the
/// resolved pair on success. A `None` reporter leaves earlier reporters
/// untouched.
pub fn apply_thinking_with_usage(
    payload: &[u8],
    model_with_suffix: &str,
    from: Format,
    to: Format,
    provider: &str,
    mut reporter: Option<&mut UsageReporter>,
) -> Result<Vec<u8>, AdaptError> {
    if let Some(reporter) = reporter.as_deref_mut() {
        let origin = requested_variant(payload, model_with_suffix, from);
        reporter.set_thinking_variant(&origin, "");
    }
    let (out, meta) = apply_thinking_with_meta(payload, model_with_suffix, from, to, provider)?;
    if let Some(reporter) = reporter {
        // A meta with an empty origin (no rewrite happened) must not clear
        // the origin captured above.
        if !meta.variant_origin.is_empty() {
            reporter.set_thinking_variant(&meta.variant_origin, &meta.variant);
        }
    }
    Ok(out)
}

/// The variant the client asked for, before any validation or registry
/// consultation. Suffix wins over in-payload config.
pub fn requested_variant(payload: &[u8], model_with_suffix: &str, from: Format) -> String {
    let parsed = parse_suffix(model_with_suffix);
    if let Some(level) = parsed.level {
        return level;
    }
    serde_json::from_slice::<Value>(payload)
        .ok()
        .and_then(|value| thinking_fields::extract_config(from, &value))
        .map(|config| variant_from_config(&config))
        .unwrap_or_default()
}

fn parse_payload(payload: &[u8]) -> Result<Value, AdaptError> {
    let value: Value =
        serde_json::from_slice(payload).map_err(|err| AdaptError::PayloadMalformed {
            reason: err.to_string(),
        })?;
    if !value.is_object() {
        return Err(AdaptError::PayloadMalformed {
            reason: "request body must be a JSON object".to_string(),
        });
    }
    if value.get("model").and_then(Value::as_str).is_none() {
        return Err(AdaptError::PayloadMalformed {
            reason: "missing model".to_string(),
        });
    }
    Ok(value)
}

/// A model the registry does not describe: translate and carry the requested
/// level across the format boundary verbatim, but record no rewrite. The
/// proxy has no basis to negotiate capabilities it cannot see.
fn passthrough_unregistered(
    model_name: &str,
    value: Value,
    origin: &str,
    from: Format,
    to: Format,
    provider: &str,
) -> Result<(Vec<u8>, AdaptationMeta), AdaptError> {
    let mut translated = translate::global_registry().translate(from, to, model_name, value)?;
    if let Some(level) = ThinkingLevel::parse(origin) {
        thinking_fields::apply_level(to, &mut translated, level);
    } else if !KNOWN_PROVIDERS.contains(&provider) {
        return Err(AdaptError::UnknownLevel {
            level: origin.to_string(),
        });
    }
    Ok((
        serialize(&translated),
        AdaptationMeta::build("", "", "model_not_registered"),
    ))
}

fn resolve_with_support(
    model_name: &str,
    value: Value,
    origin: &str,
    support: &ThinkingSupport,
    from: Format,
    to: Format,
) -> Result<(Vec<u8>, AdaptationMeta), AdaptError> {
    let Some(level) = ThinkingLevel::parse(origin) else {
        return Err(AdaptError::UnknownLevel {
            level: origin.to_string(),
        });
    };

    let resolved = if support.supports(level) {
        Some(level)
    } else {
        match level {
            // Strongest request: settle for the strongest the model has.
            ThinkingLevel::XHigh => support.highest(),
            // Zero not allowed: the weakest advertised level.
            ThinkingLevel::None => support.lowest(),
            // Dynamic effort unsupported: the strongest fixed level.
            ThinkingLevel::Auto => support.highest(),
            // Otherwise the nearest weaker level; nothing weaker means the
            // thinking config is removed entirely.
            level => support.nearest_below(level),
        }
    };

    let mut translated = translate::global_registry().translate(from, to, model_name, value)?;
    let meta = match resolved {
        Some(resolved) => {
            thinking_fields::apply_level(to, &mut translated, resolved);
            AdaptationMeta::build(origin, resolved.as_str(), "")
        }
        None => {
            thinking_fields::remove_thinking(to, &mut translated);
            AdaptationMeta::build(origin, "", "")
        }
    };
    Ok((serialize(&translated), meta))
}

fn serialize(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_default()
}
