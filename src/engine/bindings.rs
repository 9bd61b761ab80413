use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Host-context names every test script may reference.
pub const PREDEFINED_BINDINGS: &[&str] = &[
    "app",
    "attributes",
    "authentication",
    "correlationId",
    "flow",
    "message",
    "mule",
    "payload",
    "server",
    "vars",
];

/// Named values injected into a script's execution context, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: IndexMap<String, Value>,
}

impl Bindings {
    /// Binds every name to an empty mapping.
    pub fn placeholders<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = names
            .into_iter()
            .map(|name| (name.into(), Value::Object(Map::new())))
            .collect();
        Self { values }
    }

    pub fn predefined() -> Self {
        Self::placeholders(PREDEFINED_BINDINGS.iter().copied())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
