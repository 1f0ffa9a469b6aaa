use std::collections::HashMap;

/// Boundary to externally defined views.
///
/// A view reference names a template that lives outside the plugin
/// record (shipped with a device theme, for example). Resolution yields
/// embedded-HTML template source; execution happens in the renderer.
pub trait ViewResolver: Send + Sync {
    fn resolve(&self, reference: &str) -> Option<String>;
}

/// In-memory view registry: reference -> template source.
#[derive(Debug, Default)]
pub struct StaticViewRegistry {
    views: HashMap<String, String>,
}

impl StaticViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, reference: impl Into<String>, source: impl Into<String>) {
        self.views.insert(reference.into(), source.into());
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl ViewResolver for StaticViewRegistry {
    fn resolve(&self, reference: &str) -> Option<String> {
        self.views.get(reference).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_view_resolves() {
        let mut registry = StaticViewRegistry::new();
        registry.register("cards.weather", "<div>{{ data.temperature }}</div>");
        assert_eq!(
            registry.resolve("cards.weather").as_deref(),
            Some("<div>{{ data.temperature }}</div>")
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_view_resolves_to_none() {
        let registry = StaticViewRegistry::new();
        assert!(registry.resolve("missing.view").is_none());
        assert!(registry.is_empty());
    }
}
