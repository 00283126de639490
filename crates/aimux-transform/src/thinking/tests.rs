use serde_json::{Value, json};

use super::payload::{apply_level, extract_config, remove_thinking};
use super::*;
use crate::translate::Format;

#[test]
fn suffix_with_level() {
    let parsed = parse_suffix("gpt-5(xhigh)");
    assert_eq!(parsed.model_name, "gpt-5");
    assert_eq!(parsed.level.as_deref(), Some("xhigh"));
}

#[test]
fn suffix_is_case_insensitive_and_trimmed() {
    let parsed = parse_suffix("gemini-3.1-pro-high( Medium )");
    assert_eq!(parsed.model_name, "gemini-3.1-pro-high");
    assert_eq!(parsed.level.as_deref(), Some("medium"));
}

#[test]
fn suffix_without_level() {
    let parsed = parse_suffix("claude-sonnet-4-5");
    assert_eq!(parsed.model_name, "claude-sonnet-4-5");
    assert_eq!(parsed.level, None);
}

#[test]
fn suffix_with_empty_base_keeps_level() {
    let parsed = parse_suffix("(ultra)");
    assert_eq!(parsed.model_name, "");
    assert_eq!(parsed.level.as_deref(), Some("ultra"));
}

#[test]
fn suffix_rejects_non_alphabetic_token() {
    let parsed = parse_suffix("model(123)");
    assert_eq!(parsed.model_name, "model(123)");
    assert_eq!(parsed.level, None);

    let parsed = parse_suffix("model()");
    assert_eq!(parsed.model_name, "model()");
    assert_eq!(parsed.level, None);
}

#[test]
fn level_parse_and_ordering() {
    assert_eq!(ThinkingLevel::parse(" XHigh "), Some(ThinkingLevel::XHigh));
    assert_eq!(ThinkingLevel::parse("ultra"), None);
    assert!(
        ThinkingLevel::Low.ordinal().unwrap() < ThinkingLevel::XHigh.ordinal().unwrap()
    );
    assert_eq!(ThinkingLevel::Auto.ordinal(), None);
}

#[test]
fn budget_bands_are_frozen() {
    assert_eq!(level_from_budget(0), Some(ThinkingLevel::None));
    assert_eq!(level_from_budget(1), Some(ThinkingLevel::Low));
    assert_eq!(level_from_budget(1024), Some(ThinkingLevel::Low));
    assert_eq!(level_from_budget(1025), Some(ThinkingLevel::Medium));
    assert_eq!(level_from_budget(4096), Some(ThinkingLevel::Medium));
    assert_eq!(level_from_budget(4097), Some(ThinkingLevel::High));
    assert_eq!(level_from_budget(16384), Some(ThinkingLevel::High));
    assert_eq!(level_from_budget(16385), Some(ThinkingLevel::XHigh));
    assert_eq!(level_from_budget(-1), None);
}

#[test]
fn budget_round_trips_through_bands() {
    for level in ThinkingLevel::ORDERED {
        assert_eq!(level_from_budget(budget_for_level(level)), Some(level));
    }
}

#[test]
fn variant_from_config_cases() {
    assert_eq!(
        variant_from_config(&ThinkingConfig::Level(" High ".to_string())),
        "high"
    );
    assert_eq!(variant_from_config(&ThinkingConfig::None { level: None }), "none");
    assert_eq!(
        variant_from_config(&ThinkingConfig::None {
            level: Some("Low".to_string())
        }),
        "low"
    );
    assert_eq!(variant_from_config(&ThinkingConfig::Auto), "auto");
    assert_eq!(variant_from_config(&ThinkingConfig::Budget(2048)), "medium");
    assert_eq!(variant_from_config(&ThinkingConfig::Budget(-5)), "");
}

#[test]
fn meta_no_explicit_variant() {
    let meta = AdaptationMeta::build("", "", "");
    assert_eq!(meta.decision, AdaptationDecision::None);
    assert_eq!(meta.reason, "no_explicit_variant");
    assert_eq!(meta.variant_origin, "");
    assert_eq!(meta.variant, "");
}

#[test]
fn meta_preserved() {
    let meta = AdaptationMeta::build("XHigh", "xhigh", "");
    assert_eq!(meta.decision, AdaptationDecision::Pass);
    assert_eq!(meta.reason, "preserved");
    assert_eq!(meta.variant_origin, "xhigh");
    assert_eq!(meta.variant, "xhigh");
}

#[test]
fn meta_downgrade_includes_removal() {
    let meta = AdaptationMeta::build("xhigh", "high", "");
    assert_eq!(meta.decision, AdaptationDecision::Downgrade);
    assert_eq!(meta.reason, "unsupported_by_model");

    let removal = AdaptationMeta::build("low", "", "");
    assert_eq!(removal.decision, AdaptationDecision::Downgrade);
    assert_eq!(removal.variant, "");
}

#[test]
fn meta_custom_reason_preserved() {
    let meta = AdaptationMeta::build("none", "low", "zero_not_allowed");
    assert_eq!(meta.reason, "zero_not_allowed");
}

#[test]
fn extract_openai_reasoning_effort() {
    let payload = json!({ "model": "gpt-5", "reasoning_effort": "High" });
    assert_eq!(
        extract_config(Format::OpenAI, &payload),
        Some(ThinkingConfig::Level("high".to_string()))
    );
    assert_eq!(extract_config(Format::OpenAI, &json!({ "model": "gpt-5" })), None);
}

#[test]
fn extract_codex_reasoning_block() {
    let payload = json!({ "model": "gpt-5", "reasoning": { "effort": "medium" } });
    assert_eq!(
        extract_config(Format::Codex, &payload),
        Some(ThinkingConfig::Level("medium".to_string()))
    );
}

#[test]
fn extract_claude_thinking() {
    let enabled = json!({ "thinking": { "type": "enabled", "budget_tokens": 2048 } });
    assert_eq!(
        extract_config(Format::Claude, &enabled),
        Some(ThinkingConfig::Budget(2048))
    );

    let disabled = json!({ "thinking": { "type": "disabled" } });
    assert_eq!(
        extract_config(Format::Claude, &disabled),
        Some(ThinkingConfig::None { level: None })
    );

    let dynamic = json!({ "thinking": { "type": "enabled" } });
    assert_eq!(extract_config(Format::Claude, &dynamic), Some(ThinkingConfig::Auto));
}

#[test]
fn extract_gemini_thinking_config() {
    let level = json!({
        "generationConfig": { "thinkingConfig": { "thinkingLevel": "high" } }
    });
    assert_eq!(
        extract_config(Format::Gemini, &level),
        Some(ThinkingConfig::Level("high".to_string()))
    );

    let budget = json!({
        "generationConfig": { "thinkingConfig": { "thinkingBudget": 512 } }
    });
    assert_eq!(extract_config(Format::Gemini, &budget), Some(ThinkingConfig::Budget(512)));

    let dynamic = json!({
        "generationConfig": { "thinkingConfig": { "thinkingBudget": -1 } }
    });
    assert_eq!(extract_config(Format::Gemini, &dynamic), Some(ThinkingConfig::Auto));
}

#[test]
fn extract_envelope_reads_inner_request() {
    let payload = json!({
        "model": "gemini-3.1-pro-high",
        "request": {
            "generationConfig": { "thinkingConfig": { "thinkingLevel": "low" } }
        }
    });
    assert_eq!(
        extract_config(Format::Antigravity, &payload),
        Some(ThinkingConfig::Level("low".to_string()))
    );
}

#[test]
fn apply_openai_sets_top_level_effort() {
    let mut payload = json!({ "model": "gpt-5" });
    apply_level(Format::OpenAI, &mut payload, ThinkingLevel::High);
    assert_eq!(payload["reasoning_effort"], json!("high"));
}

#[test]
fn apply_claude_maps_level_to_budget() {
    let mut payload = json!({ "model": "claude-sonnet-4-5" });
    apply_level(Format::Claude, &mut payload, ThinkingLevel::Medium);
    assert_eq!(payload["thinking"]["type"], json!("enabled"));
    assert_eq!(payload["thinking"]["budget_tokens"], json!(4096));

    apply_level(Format::Claude, &mut payload, ThinkingLevel::None);
    assert_eq!(payload["thinking"], json!({ "type": "disabled" }));
}

#[test]
fn apply_gemini_sets_level_and_include_thoughts() {
    let mut payload = json!({ "contents": [] });
    apply_level(Format::Gemini, &mut payload, ThinkingLevel::Medium);
    assert_eq!(
        payload["generationConfig"]["thinkingConfig"],
        json!({ "thinkingLevel": "medium", "includeThoughts": true })
    );

    apply_level(Format::Gemini, &mut payload, ThinkingLevel::None);
    assert_eq!(
        payload["generationConfig"]["thinkingConfig"],
        json!({ "thinkingBudget": 0 })
    );
}

#[test]
fn apply_envelope_targets_inner_request() {
    let mut payload = json!({ "model": "gemini-3.1-pro-high", "request": { "contents": [] } });
    apply_level(Format::Antigravity, &mut payload, ThinkingLevel::Medium);
    assert_eq!(
        payload["request"]["generationConfig"]["thinkingConfig"]["thinkingLevel"],
        json!("medium")
    );
    assert_eq!(
        payload["request"]["generationConfig"]["thinkingConfig"]["includeThoughts"],
        json!(true)
    );
}

#[test]
fn remove_thinking_per_format() {
    let mut openai = json!({ "model": "m", "reasoning_effort": "low" });
    remove_thinking(Format::OpenAI, &mut openai);
    assert!(openai.get("reasoning_effort").is_none());

    let mut claude = json!({ "model": "m", "thinking": { "type": "enabled", "budget_tokens": 1 } });
    remove_thinking(Format::Claude, &mut claude);
    assert!(claude.get("thinking").is_none());

    let mut gemini = json!({
        "generationConfig": { "temperature": 0.5, "thinkingConfig": { "thinkingLevel": "low" } }
    });
    remove_thinking(Format::Gemini, &mut gemini);
    assert!(gemini["generationConfig"].get("thinkingConfig").is_none());
    assert_eq!(gemini["generationConfig"]["temperature"], json!(0.5));
}

#[test]
fn apply_on_non_object_is_a_no_op() {
    let mut payload = Value::Null;
    apply_level(Format::OpenAI, &mut payload, ThinkingLevel::Low);
    assert!(payload.is_null());
}
