//! Static capability tables for the providers whose model lineups are known
//! ahead of time. User-defined providers register their own descriptors from
//! config instead.

use aimux_transform::ThinkingLevel as L;

use super::{ModelInfo, ThinkingSupport};

fn model(id: &str, thinking: Option<ThinkingSupport>) -> ModelInfo {
    ModelInfo {
        id: id.to_string(),
        user_defined: false,
        display_name: None,
        thinking,
    }
}

fn levels(levels: &[L], zero_allowed: bool, dynamic_allowed: bool) -> ThinkingSupport {
    ThinkingSupport {
        levels: levels.to_vec(),
        zero_allowed,
        dynamic_allowed,
    }
}

pub fn openai_models() -> Vec<ModelInfo> {
    vec![
        model(
            "gpt-5",
            Some(levels(&[L::Low, L::Medium, L::High, L::XHigh], false, false)),
        ),
        model(
            "gpt-5-mini",
            Some(levels(&[L::Low, L::Medium, L::High], false, false)),
        ),
        model("gpt-4.1", None),
    ]
}

pub fn codex_models() -> Vec<ModelInfo> {
    vec![model(
        "gpt-5-codex",
        Some(levels(&[L::Low, L::Medium, L::High, L::XHigh], false, false)),
    )]
}

pub fn claude_models() -> Vec<ModelInfo> {
    vec![
        model(
            "claude-opus-4-5",
            Some(levels(&[L::Low, L::Medium, L::High], true, false)),
        ),
        model(
            "claude-sonnet-4-5",
            Some(levels(&[L::Low, L::Medium, L::High], true, false)),
        ),
    ]
}

pub fn gemini_models() -> Vec<ModelInfo> {
    vec![
        model(
            "gemini-3-pro-preview",
            Some(levels(&[L::Low, L::High], false, true)),
        ),
        model(
            "gemini-2.5-flash",
            Some(levels(&[L::Low, L::Medium, L::High], true, true)),
        ),
    ]
}

/// The Antigravity surface exposes the Gemini 3.1 pro tiers with a fixed
/// low/medium/high ladder.
pub fn antigravity_models() -> Vec<ModelInfo> {
    vec![
        model(
            "gemini-3.1-pro-high",
            Some(levels(&[L::Low, L::Medium, L::High], false, false)),
        ),
        model(
            "gemini-3.1-pro-low",
            Some(levels(&[L::Low, L::Medium, L::High], false, false)),
        ),
    ]
}

/// Builtin table for a provider key, if one is known.
pub fn models_for_provider(provider: &str) -> Option<Vec<ModelInfo>> {
    match provider {
        "openai" => Some(openai_models()),
        "codex" => Some(codex_models()),
        "claude" => Some(claude_models()),
        "gemini" | "aistudio" | "vertex" | "gemini-cli" => Some(gemini_models()),
        "antigravity" => Some(antigravity_models()),
        _ => None,
    }
}
