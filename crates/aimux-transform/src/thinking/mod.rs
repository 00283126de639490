//! Canonical thinking-effort model: levels, tagged config, the model-suffix
//! grammar, and adaptation metadata.

mod config;
mod level;
mod meta;
pub mod payload;
mod suffix;

#[cfg(test)]
mod tests;

pub use config::{ThinkingConfig, variant_from_config};
pub use level::{ThinkingLevel, budget_for_level, level_from_budget};
pub use meta::{AdaptationDecision, AdaptationMeta};
pub use suffix::{ParsedModel, parse_suffix};
