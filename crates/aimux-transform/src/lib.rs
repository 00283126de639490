//! Wire-format translation and thinking-effort payload rewrites.
//!
//! This crate is pure data transformation: it does not depend on any HTTP
//! client or server. The engine layer feeds it raw JSON payloads and applies
//! the results.

pub mod thinking;
pub mod translate;

pub use thinking::{
    AdaptationDecision, AdaptationMeta, ParsedModel, ThinkingConfig, ThinkingLevel,
    budget_for_level, level_from_budget, parse_suffix, variant_from_config,
};
pub use translate::{
    Format, RequestTranslator, TranslateError, TranslatorRegistry, global_registry,
};
