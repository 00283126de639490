//! Cross-format adaptation: an OpenAI chat request targeting the Antigravity
//! surface must come out as an enveloped Gemini body with the resolved
//! thinking level and `includeThoughts` set.

use serde_json::{Value, json};

use aimux_core::apply_thinking;
use aimux_provider_core::registry::{builtin, global_model_registry};
use aimux_transform::Format;

fn register_antigravity_models(uid: &str) {
    global_model_registry().register_client(uid, "antigravity", builtin::antigravity_models());
}

#[test]
fn antigravity_gemini31_thinking_config_includes_thoughts() {
    register_antigravity_models("antigravity-integration");

    let cases = [
        ("gemini-3.1-pro-high(medium)", "medium"),
        ("gemini-3.1-pro-low(high)", "high"),
    ];

    for (model_with_mode, expect_level) in cases {
        let input = serde_json::to_vec(&json!({
            "model": model_with_mode,
            "messages": [{ "role": "user", "content": "hi" }]
        }))
        .unwrap();

        let output = apply_thinking(
            &input,
            model_with_mode,
            Format::OpenAI,
            Format::Antigravity,
            "antigravity",
        )
        .unwrap();
        let output: Value = serde_json::from_slice(&output).unwrap();

        let level = output
            .pointer("/request/generationConfig/thinkingConfig/thinkingLevel")
            .unwrap_or_else(|| panic!("expected thinkingLevel, body={output}"));
        assert_eq!(level, &json!(expect_level), "body={output}");

        let include_thoughts = output
            .pointer("/request/generationConfig/thinkingConfig/includeThoughts")
            .unwrap_or_else(|| panic!("expected includeThoughts, body={output}"));
        assert_eq!(include_thoughts, &json!(true), "body={output}");
    }
}

#[test]
fn antigravity_downgrades_beyond_ladder() {
    register_antigravity_models("antigravity-downgrade");

    let input = serde_json::to_vec(&json!({
        "model": "gemini-3.1-pro-high(xhigh)",
        "messages": [{ "role": "user", "content": "hi" }]
    }))
    .unwrap();

    let output = apply_thinking(
        &input,
        "gemini-3.1-pro-high(xhigh)",
        Format::OpenAI,
        Format::Antigravity,
        "antigravity",
    )
    .unwrap();
    let output: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        output.pointer("/request/generationConfig/thinkingConfig/thinkingLevel"),
        Some(&json!("high"))
    );
}
