//! Request translation between wire formats.
//!
//! Translators are registered per `(from, to)` pair in a process-wide
//! registry. The pair space is closed: the defaults seeded on first use
//! cover every pair the executors dispatch, and an unregistered pair is a
//! hard error rather than a silent passthrough.

mod codex;
mod pairs;


use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use serde_json::Value;

pub use codex::{normalize_codex_response, rewrite_codex_event};

/// A chat/completion wire format, named by its public identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    OpenAI,
    Codex,
    Claude,
    Gemini,
    GeminiCli,
    Antigravity,
    IFlow,
    Kimi,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::OpenAI => "openai",
            Format::Codex => "codex",
            Format::Claude => "claude",
            Format::Gemini => "gemini",
            Format::GeminiCli => "gemini-cli",
            Format::Antigravity => "antigravity",
            Format::IFlow => "iflow",
            Format::Kimi => "kimi",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Format::OpenAI),
            "codex" => Some(Format::Codex),
            "claude" => Some(Format::Claude),
            "gemini" => Some(Format::Gemini),
            "gemini-cli" => Some(Format::GeminiCli),
            "antigravity" => Some(Format::Antigravity),
            "iflow" => Some(Format::IFlow),
            "kimi" => Some(Format::Kimi),
            _ => None,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TranslateError {
    #[error("no translator registered for {from} -> {to}")]
    UnsupportedPair { from: Format, to: Format },
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Translates a request payload from one wire format to another.
pub trait RequestTranslator: Send + Sync {
    fn translate(&self, model: &str, payload: Value) -> Result<Value, TranslateError>;
}

type TranslateFn = fn(&str, Value) -> Result<Value, TranslateError>;

struct FnTranslator(TranslateFn);

impl RequestTranslator for FnTranslator {
    fn translate(&self, model: &str, payload: Value) -> Result<Value, TranslateError> {
        (self.0)(model, payload)
    }
}

#[derive(Default)]
pub struct TranslatorRegistry {
    pairs: RwLock<HashMap<(Format, Format), Arc<dyn RequestTranslator>>>,
}

impl TranslatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, from: Format, to: Format, translator: Arc<dyn RequestTranslator>) {
        if let Ok(mut pairs) = self.pairs.write() {
            pairs.insert((from, to), translator);
        }
    }

    fn register_fn(&self, from: Format, to: Format, translate: TranslateFn) {
        self.register(from, to, Arc::new(FnTranslator(translate)));
    }

    pub fn lookup(&self, from: Format, to: Format) -> Option<Arc<dyn RequestTranslator>> {
        self.pairs
            .read()
            .ok()
            .and_then(|pairs| pairs.get(&(from, to)).cloned())
    }

    pub fn translate(
        &self,
        from: Format,
        to: Format,
        model: &str,
        payload: Value,
    ) -> Result<Value, TranslateError> {
        let translator = self
            .lookup(from, to)
            .ok_or(TranslateError::UnsupportedPair { from, to })?;
        translator.translate(model, payload)
    }

    fn with_defaults() -> Self {
        let registry = Self::new();

        // Same-shape pairs pass through untouched.
        registry.register_fn(Format::OpenAI, Format::OpenAI, pairs::identity);
        registry.register_fn(Format::OpenAI, Format::IFlow, pairs::identity);
        registry.register_fn(Format::OpenAI, Format::Kimi, pairs::identity);
        registry.register_fn(Format::Claude, Format::Claude, pairs::identity);
        registry.register_fn(Format::Gemini, Format::Gemini, pairs::identity);
        registry.register_fn(Format::Codex, Format::Codex, pairs::identity);

        registry.register_fn(Format::OpenAI, Format::Codex, pairs::openai_to_codex);
        registry.register_fn(Format::OpenAI, Format::Claude, pairs::openai_to_claude);
        registry.register_fn(Format::OpenAI, Format::Gemini, pairs::openai_to_gemini);
        registry.register_fn(Format::OpenAI, Format::GeminiCli, pairs::openai_to_gemini_cli);
        registry.register_fn(
            Format::OpenAI,
            Format::Antigravity,
            pairs::openai_to_gemini_cli,
        );

        registry.register_fn(Format::Claude, Format::OpenAI, pairs::claude_to_openai);
        registry.register_fn(Format::Claude, Format::Codex, pairs::claude_to_codex);
        registry.register_fn(Format::Claude, Format::Gemini, pairs::claude_to_gemini);
        registry.register_fn(Format::Claude, Format::GeminiCli, pairs::claude_to_gemini_cli);
        registry.register_fn(
            Format::Claude,
            Format::Antigravity,
            pairs::claude_to_gemini_cli,
        );

        registry.register_fn(Format::Gemini, Format::GeminiCli, pairs::gemini_to_gemini_cli);
        registry.register_fn(
            Format::Gemini,
            Format::Antigravity,
            pairs::gemini_to_gemini_cli,
        );

        registry.register_fn(Format::Codex, Format::OpenAI, pairs::codex_to_openai);

        registry
    }
}

/// Process-wide translator registry, seeded with the default pair space on
/// first use.
pub fn global_registry() -> &'static TranslatorRegistry {
    static REGISTRY: OnceLock<TranslatorRegistry> = OnceLock::new();
    REGISTRY.get_or_init(TranslatorRegistry::with_defaults)
}
