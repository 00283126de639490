use serde::{Deserialize, Serialize};

/// A thinking (reasoning effort) level.
///
/// Ordering for downgrade decisions is `none < low < medium < high < xhigh`;
/// `auto` sits outside the ordering and is only valid on models that allow
/// dynamic effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThinkingLevel {
    None,
    Low,
    Medium,
    High,
    XHigh,
    Auto,
}

impl ThinkingLevel {
    /// Canonical downgrade ordering, lowest first. `Auto` is excluded.
    pub const ORDERED: [ThinkingLevel; 5] = [
        ThinkingLevel::None,
        ThinkingLevel::Low,
        ThinkingLevel::Medium,
        ThinkingLevel::High,
        ThinkingLevel::XHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThinkingLevel::None => "none",
            ThinkingLevel::Low => "low",
            ThinkingLevel::Medium => "medium",
            ThinkingLevel::High => "high",
            ThinkingLevel::XHigh => "xhigh",
            ThinkingLevel::Auto => "auto",
        }
    }

    /// Case-insensitive, whitespace-tolerant parse. Returns `None` for
    /// anything outside the canonical set.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Some(ThinkingLevel::None),
            "low" => Some(ThinkingLevel::Low),
            "medium" => Some(ThinkingLevel::Medium),
            "high" => Some(ThinkingLevel::High),
            "xhigh" => Some(ThinkingLevel::XHigh),
            "auto" => Some(ThinkingLevel::Auto),
            _ => None,
        }
    }

    /// Position in the canonical ordering; `None` for `Auto`.
    pub fn ordinal(&self) -> Option<usize> {
        Self::ORDERED.iter().position(|level| level == self)
    }
}

impl std::fmt::Display for ThinkingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a thinking token budget onto the canonical level bands.
///
/// The bands are frozen; changing them silently re-labels historical usage
/// records. Negative budgets are unresolved.
pub fn level_from_budget(budget: i64) -> Option<ThinkingLevel> {
    match budget {
        0 => Some(ThinkingLevel::None),
        1..=1024 => Some(ThinkingLevel::Low),
        1025..=4096 => Some(ThinkingLevel::Medium),
        4097..=16384 => Some(ThinkingLevel::High),
        b if b > 16384 => Some(ThinkingLevel::XHigh),
        _ => None,
    }
}

/// Inverse of [`level_from_budget`], used when a resolved level has to be
/// expressed as a token budget (Claude `thinking.budget_tokens`).
pub fn budget_for_level(level: ThinkingLevel) -> i64 {
    match level {
        ThinkingLevel::None => 0,
        ThinkingLevel::Low => 1024,
        ThinkingLevel::Medium => 4096,
        ThinkingLevel::High => 16384,
        ThinkingLevel::XHigh => 32768,
        ThinkingLevel::Auto => 8192,
    }
}
