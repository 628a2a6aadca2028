//! Result types for the search actions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Acknowledgment of a `save` action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResult {
    /// The document id. Engine-generated when the payload carried none.
    pub id: String,

    /// The engine's write outcome, e.g. `created` or `updated`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// The document version after the write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

impl SaveResult {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            result: None,
            version: None,
        }
    }
}

/// Outcome of a `load` action.
///
/// Serializes with the engine's get-response keys (`found`, `_id`, `_source`).
/// A missing document is reported with `found: false`, not as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadResult {
    pub found: bool,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<Map<String, Value>>,
}

impl LoadResult {
    /// A result for a document that does not exist.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self {
            found: false,
            id: id.into(),
            source: None,
        }
    }
}
