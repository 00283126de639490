//! In-memory model capability registry.
//!
//! Clients (credential sets, providers, user config) register the models they
//! serve; the proxy resolves a model id to its capability descriptor with
//! first-wins semantics across clients in registration order.

pub mod builtin;

use std::sync::{Arc, OnceLock, RwLock};

use serde::{Deserialize, Serialize};

use aimux_transform::ThinkingLevel;

/// Advertised thinking support of one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkingSupport {
    /// Supported named levels, a subset of the canonical ordering.
    pub levels: Vec<ThinkingLevel>,
    /// Whether the model accepts thinking being turned off entirely.
    #[serde(default)]
    pub zero_allowed: bool,
    /// Whether the model accepts model-chosen (dynamic) effort.
    #[serde(default)]
    pub dynamic_allowed: bool,
}

impl ThinkingSupport {
    pub fn supports(&self, level: ThinkingLevel) -> bool {
        match level {
            ThinkingLevel::None => self.zero_allowed || self.levels.contains(&ThinkingLevel::None),
            ThinkingLevel::Auto => self.dynamic_allowed,
            level => self.levels.contains(&level),
        }
    }

    /// Highest ordered level the model advertises.
    pub fn highest(&self) -> Option<ThinkingLevel> {
        self.levels
            .iter()
            .filter(|level| level.ordinal().is_some())
            .max_by_key(|level| level.ordinal())
            .copied()
    }

    /// Lowest ordered level the model advertises.
    pub fn lowest(&self) -> Option<ThinkingLevel> {
        self.levels
            .iter()
            .filter(|level| level.ordinal().is_some())
            .min_by_key(|level| level.ordinal())
            .copied()
    }

    /// Strongest advertised level strictly below `level` in the canonical
    /// ordering.
    pub fn nearest_below(&self, level: ThinkingLevel) -> Option<ThinkingLevel> {
        let ordinal = level.ordinal()?;
        self.levels
            .iter()
            .filter(|candidate| candidate.ordinal().map(|o| o < ordinal).unwrap_or(false))
            .max_by_key(|candidate| candidate.ordinal())
            .copied()
    }
}

/// A model's capability descriptor as registered by a client.
///
/// `user_defined = true` with `thinking = None` means "capabilities unknown":
/// requests for unrecognized levels must fail closed rather than pass
/// through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(default)]
    pub user_defined: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<ThinkingSupport>,
}

struct ClientEntry {
    uid: String,
    client_type: String,
    models: Vec<Arc<ModelInfo>>,
}

/// Registry of model descriptors keyed by the client that registered them.
#[derive(Default)]
pub struct ModelRegistry {
    // Registration order drives first-wins lookup; entries are few and
    // critical sections contain no IO.
    inner: RwLock<Vec<ClientEntry>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a client's model list. A replaced client keeps
    /// its original position in the lookup order.
    pub fn register_client(&self, uid: &str, client_type: &str, models: Vec<ModelInfo>) {
        let models: Vec<Arc<ModelInfo>> = models.into_iter().map(Arc::new).collect();
        let Ok(mut clients) = self.inner.write() else {
            return;
        };
        if let Some(entry) = clients.iter_mut().find(|entry| entry.uid == uid) {
            entry.client_type = client_type.to_string();
            entry.models = models;
            return;
        }
        clients.push(ClientEntry {
            uid: uid.to_string(),
            client_type: client_type.to_string(),
            models,
        });
    }

    pub fn unregister_client(&self, uid: &str) {
        if let Ok(mut clients) = self.inner.write() {
            clients.retain(|entry| entry.uid != uid);
        }
    }

    /// First-wins descriptor lookup across clients in registration order.
    pub fn lookup(&self, model_id: &str) -> Option<Arc<ModelInfo>> {
        self.lookup_provider(model_id).map(|(_, model)| model)
    }

    /// Like [`lookup`](Self::lookup), also returning the owning client's type
    /// (the provider key the router dispatches on).
    pub fn lookup_provider(&self, model_id: &str) -> Option<(String, Arc<ModelInfo>)> {
        let clients = self.inner.read().ok()?;
        for entry in clients.iter() {
            if let Some(model) = entry.models.iter().find(|model| model.id == model_id) {
                return Some((entry.client_type.clone(), model.clone()));
            }
        }
        None
    }

    /// All visible models, first-wins deduplicated by id.
    pub fn models(&self) -> Vec<Arc<ModelInfo>> {
        let Ok(clients) = self.inner.read() else {
            return Vec::new();
        };
        let mut seen = std::collections::HashSet::new();
        let mut models = Vec::new();
        for entry in clients.iter() {
            for model in &entry.models {
                if seen.insert(model.id.clone()) {
                    models.push(model.clone());
                }
            }
        }
        models
    }
}

/// Process-wide model registry, initialized on first use.
pub fn global_model_registry() -> &'static ModelRegistry {
    static REGISTRY: OnceLock<ModelRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ModelRegistry::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(id: &str, levels: &[ThinkingLevel]) -> ModelInfo {
        ModelInfo {
            id: id.to_string(),
            user_defined: false,
            display_name: None,
            thinking: Some(ThinkingSupport {
                levels: levels.to_vec(),
                zero_allowed: false,
                dynamic_allowed: false,
            }),
        }
    }

    #[test]
    fn register_lookup_unregister() {
        let registry = ModelRegistry::new();
        registry.register_client(
            "client-a",
            "openai",
            vec![descriptor("model-a", &[ThinkingLevel::Low])],
        );
        let (provider, model) = registry.lookup_provider("model-a").unwrap();
        assert_eq!(provider, "openai");
        assert_eq!(model.id, "model-a");

        registry.unregister_client("client-a");
        assert!(registry.lookup("model-a").is_none());
    }

    #[test]
    fn lookup_is_first_wins_in_registration_order() {
        let registry = ModelRegistry::new();
        registry.register_client(
            "client-a",
            "openai",
            vec![descriptor("shared-model", &[ThinkingLevel::Low])],
        );
        registry.register_client(
            "client-b",
            "claude",
            vec![descriptor("shared-model", &[ThinkingLevel::High])],
        );

        let (provider, model) = registry.lookup_provider("shared-model").unwrap();
        assert_eq!(provider, "openai");
        assert_eq!(
            model.thinking.as_ref().unwrap().levels,
            vec![ThinkingLevel::Low]
        );

        // Removing the first owner exposes the second.
        registry.unregister_client("client-a");
        let (provider, _) = registry.lookup_provider("shared-model").unwrap();
        assert_eq!(provider, "claude");
    }

    #[test]
    fn reregistering_a_client_replaces_its_models() {
        let registry = ModelRegistry::new();
        registry.register_client(
            "client-a",
            "openai",
            vec![descriptor("old-model", &[ThinkingLevel::Low])],
        );
        registry.register_client(
            "client-a",
            "openai",
            vec![descriptor("new-model", &[ThinkingLevel::High])],
        );
        assert!(registry.lookup("old-model").is_none());
        assert!(registry.lookup("new-model").is_some());
        assert_eq!(registry.models().len(), 1);
    }

    #[test]
    fn support_helpers_follow_canonical_ordering() {
        let support = ThinkingSupport {
            levels: vec![ThinkingLevel::Low, ThinkingLevel::High],
            zero_allowed: false,
            dynamic_allowed: false,
        };
        assert!(support.supports(ThinkingLevel::Low));
        assert!(!support.supports(ThinkingLevel::Medium));
        assert!(!support.supports(ThinkingLevel::None));
        assert!(!support.supports(ThinkingLevel::Auto));
        assert_eq!(support.highest(), Some(ThinkingLevel::High));
        assert_eq!(support.lowest(), Some(ThinkingLevel::Low));
        assert_eq!(
            support.nearest_below(ThinkingLevel::Medium),
            Some(ThinkingLevel::Low)
        );
        assert_eq!(support.nearest_below(ThinkingLevel::Low), None);
    }

    #[test]
    fn zero_and_dynamic_flags_extend_support() {
        let support = ThinkingSupport {
            levels: vec![ThinkingLevel::Medium],
            zero_allowed: true,
            dynamic_allowed: true,
        };
        assert!(support.supports(ThinkingLevel::None));
        assert!(support.supports(ThinkingLevel::Auto));
    }
}
