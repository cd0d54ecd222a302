use serde_json::{Map, Value};

use crate::element::attrs::classify;

/// Configuration inherited from enclosing context elements.
///
/// Only recognized configuration is inherited; pass-through attributes given to a context stay
/// with the context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CloudContext {
    config: Map<String, Value>,
}

impl CloudContext {
    /// Empty root context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Child context whose configuration overrides this one key by key.
    pub fn nest(&self, props: &Map<String, Value>) -> Self {
        let mut config = self.config.clone();
        for (k, v) in classify(props).config {
            config.insert(k, v);
        }
        Self { config }
    }

    /// Shorthand for a context that only sets the cloud name.
    pub fn with_cloud_name(cloud_name: impl Into<String>) -> Self {
        let mut props = Map::new();
        props.insert("cloud_name".to_string(), Value::String(cloud_name.into()));
        Self::new().nest(&props)
    }

    /// Inherited configuration, keyed by canonical name.
    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    /// Overlay an element's own (already classified) configuration on the inherited one.
    pub(crate) fn apply(&self, own: Map<String, Value>) -> Map<String, Value> {
        let mut merged = self.config.clone();
        merged.extend(own);
        merged
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/context.rs"]
mod tests;
