//! Per-entity indexing options.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Indexing options for one entity kind.
///
/// An entity is addressed by `zone/base/name`, with `-` standing in for a
/// missing zone or base, which is how an entity layer writes the type field
/// (`-/-/foo`). A save whose type is either the bare `name` or that canonical
/// form uses these options.
///
/// ```
/// use search_actions::config::EntityOptions;
/// use serde_json::json;
///
/// let foo: EntityOptions = serde_json::from_value(json!({
///     "name": "foo",
///     "indexedAttributes": {"jobTitle": {"type": "string"}}
/// })).unwrap();
///
/// assert_eq!(foo.canonical(), "-/-/foo");
/// assert!(foo.matches("foo") && foo.matches("-/-/foo"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    pub name: String,

    /// Fields stored for this entity, with their field mappings. When unset,
    /// every field of a saved payload is stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_attributes: Option<Map<String, Value>>,
}

impl EntityOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Add one indexed attribute and its field mapping.
    pub fn with_indexed_attribute(mut self, field: impl Into<String>, mapping: Value) -> Self {
        self.indexed_attributes
            .get_or_insert_with(Map::new)
            .insert(field.into(), mapping);
        self
    }

    /// The `zone/base/name` form of this entity's type.
    pub fn canonical(&self) -> String {
        let part = |p: &Option<String>| match p.as_deref() {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => "-".to_string(),
        };
        format!("{}/{}/{}", part(&self.zone), part(&self.base), self.name)
    }

    /// Whether a document of type `doc_type` belongs to this entity.
    pub fn matches(&self, doc_type: &str) -> bool {
        !self.name.is_empty() && (doc_type == self.name || doc_type == self.canonical())
    }
}
