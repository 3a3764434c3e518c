use std::collections::BTreeMap;

use crate::{
    anthropic::AnthropicModel,
    config::{ProviderConfig, ProviderKind},
    error::ModelError,
    model::Model,
    openai::OpenAiCompatibleModel,
};

/// Named provider configurations.
///
/// An ordinary value: hosts own one and pass it to whatever builds models, so
/// independent registries never observe each other.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, ProviderConfig>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `config` under `name`, returning the config it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        config: ProviderConfig,
    ) -> Option<ProviderConfig> {
        let name = name.into();
        log::debug!("Registering provider '{name}' ({})", config.kind);
        self.providers.insert(name, config)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }

    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Builds an HTTP-backed model for the provider registered as `name`.
    ///
    /// # Errors
    /// [`ModelError::UnknownProvider`] or [`ModelError::MissingApiKey`].
    pub fn create_model(&self, name: &str, model_id: &str) -> Result<Box<dyn Model>, ModelError> {
        self.create_model_with(name, model_id, |variable| std::env::var(variable).ok())
    }

    /// [`create_model`](Self::create_model) resolving variables through `lookup`.
    ///
    /// # Errors
    /// [`ModelError::UnknownProvider`] or [`ModelError::MissingApiKey`].
    pub fn create_model_with(
        &self,
        name: &str,
        model_id: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Box<dyn Model>, ModelError> {
        let config = self
            .get(name)
            .ok_or_else(|| ModelError::UnknownProvider(name.to_owned()))?
            .resolve_with(lookup)?;

        let model: Box<dyn Model> = match config.kind {
            ProviderKind::OpenAiCompatible => {
                Box::new(OpenAiCompatibleModel::from_config(&config, model_id))
            }
            ProviderKind::Anthropic => Box::new(AnthropicModel::from_config(&config, model_id)),
        };
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(name: &str) -> Option<String> {
        match name {
            "GROQ_API_KEY" => Some("gsk".to_string()),
            "ANTHROPIC_API_KEY" => Some("sk-ant".to_string()),
            _ => None,
        }
    }

    fn registry() -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();
        registry.register(
            "groq",
            ProviderConfig::builder()
                .kind(ProviderKind::OpenAiCompatible)
                .env_prefix("GROQ")
                .base_url("https://api.groq.com/openai/v1")
                .build(),
        );
        registry.register("claude", ProviderConfig::new(ProviderKind::Anthropic));
        registry
    }

    #[test]
    fn test_lookup_and_names() {
        let registry = registry();

        assert!(registry.is_registered("groq"));
        assert!(!registry.is_registered("mistral"));
        assert_eq!(
            registry.get("claude").unwrap().kind,
            ProviderKind::Anthropic
        );
        assert_eq!(registry.names().collect::<Vec<_>>(), ["claude", "groq"]);
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = registry();
        let previous = registry.register("groq", ProviderConfig::new(ProviderKind::Anthropic));

        assert_eq!(previous.unwrap().kind, ProviderKind::OpenAiCompatible);
        assert_eq!(registry.get("groq").unwrap().kind, ProviderKind::Anthropic);
    }

    #[test]
    fn test_create_model() {
        let registry = registry();

        let groq = registry.create_model_with("groq", "llama-3.3-70b", keys).unwrap();
        let claude = registry
            .create_model_with("claude", "claude-3-5-haiku-latest", keys)
            .unwrap();

        assert_eq!(groq.name(), "llama-3.3-70b");
        assert_eq!(claude.name(), "claude-3-5-haiku-latest");
    }

    #[test]
    fn test_create_model_errors() {
        let registry = registry();

        assert!(matches!(
            registry.create_model_with("mistral", "m", keys),
            Err(ModelError::UnknownProvider(name)) if name == "mistral"
        ));
        assert!(matches!(
            registry.create_model_with("claude", "c", |_| None),
            Err(ModelError::MissingApiKey { .. })
        ));
    }

    #[test]
    fn test_registries_are_independent() {
        let mut first = ProviderRegistry::new();
        let second = ProviderRegistry::new();
        first.register("local", ProviderConfig::new(ProviderKind::OpenAiCompatible));

        assert!(first.is_registered("local"));
        assert!(!second.is_registered("local"));
    }
}
