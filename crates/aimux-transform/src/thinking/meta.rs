use serde::{Deserialize, Serialize};

/// How a requested thinking variant was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdaptationDecision {
    /// No explicit variant was requested.
    None,
    /// Requested variant was preserved.
    Pass,
    /// Requested variant was changed or removed.
    Downgrade,
}

impl AdaptationDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdaptationDecision::None => "none",
            AdaptationDecision::Pass => "pass",
            AdaptationDecision::Downgrade => "downgrade",
        }
    }
}

/// Describes how a requested thinking strength was adapted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptationMeta {
    pub variant_origin: String,
    pub variant: String,
    pub decision: AdaptationDecision,
    pub reason: String,
}

impl AdaptationMeta {
    /// Derives the decision from the origin/resolved pair:
    /// both empty → `None`, equal and non-empty → `Pass`, anything else
    /// (including removal) → `Downgrade`. An empty `reason` picks the
    /// decision's default.
    pub fn build(origin: &str, resolved: &str, reason: &str) -> Self {
        let origin = origin.trim().to_ascii_lowercase();
        let resolved = resolved.trim().to_ascii_lowercase();
        if origin.is_empty() && resolved.is_empty() {
            return Self {
                variant_origin: origin,
                variant: resolved,
                decision: AdaptationDecision::None,
                reason: default_reason(reason, "no_explicit_variant"),
            };
        }
        if !origin.is_empty() && origin == resolved {
            return Self {
                variant_origin: origin,
                variant: resolved,
                decision: AdaptationDecision::Pass,
                reason: default_reason(reason, "preserved"),
            };
        }
        Self {
            variant_origin: origin,
            variant: resolved,
            decision: AdaptationDecision::Downgrade,
            reason: default_reason(reason, "unsupported_by_model"),
        }
    }
}

fn default_reason(reason: &str, fallback: &str) -> String {
    if reason.is_empty() {
        fallback.to_string()
    } else {
        reason.to_string()
    }
}
