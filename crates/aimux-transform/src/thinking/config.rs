use super::level::{ThinkingLevel, level_from_budget};

/// Tagged representation of an in-payload thinking request.
///
/// `Level` carries the raw lowercased token rather than a parsed
/// [`ThinkingLevel`] so non-canonical requests (e.g. `"ultra"`) survive to
/// the engine's fail-closed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThinkingConfig {
    /// Thinking explicitly disabled, optionally with the token it was
    /// disabled with.
    None { level: Option<String> },
    /// Model-chosen (dynamic) effort.
    Auto,
    /// A named effort level.
    Level(String),
    /// A raw token budget, converted to a level band on resolution.
    Budget(i64),
}

/// Reduces a config to its variant string, the value carried by usage
/// records and adaptation metadata. Unresolvable budgets yield an empty
/// string.
pub fn variant_from_config(config: &ThinkingConfig) -> String {
    match config {
        ThinkingConfig::Level(level) => level.trim().to_ascii_lowercase(),
        ThinkingConfig::None { level } => match level {
            Some(level) if !level.trim().is_empty() => level.trim().to_ascii_lowercase(),
            _ => ThinkingLevel::None.as_str().to_string(),
        },
        ThinkingConfig::Auto => ThinkingLevel::Auto.as_str().to_string(),
        ThinkingConfig::Budget(budget) => match level_from_budget(*budget) {
            Some(level) => level.as_str().to_string(),
            None => String::new(),
        },
    }
}
