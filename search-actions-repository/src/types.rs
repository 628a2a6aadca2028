//! Request and response types for search engine client calls.

use serde_json::{Map, Value};

use crate::errors::SearchError;

/// A single index (create-or-replace) call.
///
/// `id` is optional: without one, the engine assigns an id and reports it in
/// the response.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDocumentRequest {
    pub index: String,
    pub doc_type: String,
    pub id: Option<String>,
    /// Force a refresh so the document is immediately visible to searches.
    pub refresh: bool,
    pub body: Map<String, Value>,
}

/// Acknowledgment of an index call.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDocumentResponse {
    pub id: String,
    pub result: Option<String>,
    pub version: Option<u64>,
}

impl IndexDocumentResponse {
    /// Parse the engine's index response (`_id`, `result`, `_version`).
    pub fn from_engine_response(response: &Value) -> Result<Self, SearchError> {
        let id = response
            .get("_id")
            .and_then(Value::as_str)
            .ok_or_else(|| SearchError::parse("Index response is missing '_id'"))?;

        Ok(Self {
            id: id.to_string(),
            result: response
                .get("result")
                .and_then(Value::as_str)
                .map(str::to_string),
            version: response.get("_version").and_then(Value::as_u64),
        })
    }
}

/// A document lookup by id.
#[derive(Debug, Clone, PartialEq)]
pub struct GetDocumentResponse {
    pub found: bool,
    pub id: String,
    pub source: Option<Map<String, Value>>,
}

impl GetDocumentResponse {
    /// A response for a document that does not exist.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self {
            found: false,
            id: id.into(),
            source: None,
        }
    }

    /// Parse the engine's get response (`found`, `_id`, `_source`).
    pub fn from_engine_response(id: &str, response: &Value) -> Result<Self, SearchError> {
        let found = response
            .get("found")
            .and_then(Value::as_bool)
            .ok_or_else(|| SearchError::parse("Get response is missing 'found'"))?;

        if !found {
            return Ok(Self::not_found(id));
        }

        let source = match response.get("_source") {
            Some(Value::Object(source)) => Some(source.clone()),
            Some(_) => return Err(SearchError::parse("'_source' is not an object")),
            None => None,
        };

        Ok(Self {
            found,
            id: response
                .get("_id")
                .and_then(Value::as_str)
                .unwrap_or(id)
                .to_string(),
            source,
        })
    }
}
