//! Request types for the search actions.
//!
//! Each request is deserialized from the body of an action message, so every
//! field the caller may omit is optional here. Required fields are enforced by
//! the adapter, not by serde, so that a missing field is reported as caller
//! misuse rather than as a malformed message.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request for `role:search,cmd:create-index`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateIndexRequest {
    /// Index to create. Falls back to the connection's default index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

impl CreateIndexRequest {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: Some(index.into()),
        }
    }
}

/// Request for `role:search,cmd:save`.
///
/// `data` is the document body. The document type is either given explicitly
/// in `doc_type` (wire name `type`) or read from the entity-kind field of
/// `data`.
///
/// # Example
///
/// ```
/// use search_actions_shared::SaveRequest;
/// use serde_json::json;
///
/// let request = SaveRequest::new(json!({"jobTitle": "eng"}).as_object().unwrap().clone())
///     .with_type("foo");
/// assert_eq!(request.doc_type.as_deref(), Some("foo"));
/// assert!(request.document_id().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl SaveRequest {
    /// Create a save request for the given payload.
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            index: None,
            doc_type: None,
            data: Some(data),
        }
    }

    /// Set the target index.
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Set the document type explicitly.
    pub fn with_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// The document id carried in the payload, if any.
    ///
    /// String ids are used as-is and numeric ids are stringified. A missing or
    /// null `id` means the engine assigns one.
    pub fn document_id(&self) -> Option<String> {
        document_id(self.data.as_ref()?.get("id")?)
    }
}

/// Normalize a wire id: non-empty strings as-is, numbers stringified.
fn document_id(id: &Value) -> Option<String> {
    match id {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Request for `role:search,cmd:delete`.
///
/// The payload is accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(flatten)]
    pub args: Map<String, Value>,
}

/// Request for `role:search,cmd:load`.
///
/// `id` follows the same rule as a saved document's `data.id`, so a document
/// saved with `id: 42` loads with `id: 42` or `id: "42"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl LoadRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            index: None,
            doc_type: None,
            id: Some(Value::String(id.into())),
        }
    }

    /// The requested document id, normalized like [`SaveRequest::document_id`].
    pub fn document_id(&self) -> Option<String> {
        document_id(self.id.as_ref()?)
    }

    /// Set the target index.
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }
}

/// Request for `role:search,cmd:search`.
///
/// `search` is a raw query body in the engine's query DSL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<Value>,
}
