//! Search engine client trait definition.
//!
//! This module defines the abstract interface the action adapter calls into,
//! allowing for different backend implementations (OpenSearch, Elasticsearch,
//! in-memory mocks).

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::SearchError;
use crate::types::{GetDocumentResponse, IndexDocumentRequest, IndexDocumentResponse};

/// Abstract interface for the search engine calls the adapter makes.
///
/// Every method is a single request to the engine. Implementations do not
/// retry, and they must be `Send + Sync` so one handle can be shared by
/// concurrently running actions.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Check whether an index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` / `Ok(false)` - Whether the index exists
    /// * `Err(SearchError)` - If the check itself failed
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError>;

    /// Create an index.
    ///
    /// `properties` are field mappings keyed by field name; an empty map leaves
    /// the engine's dynamic mapping in charge. Creating an index that already
    /// exists is an error at this level; idempotency is the caller's job.
    async fn create_index(
        &self,
        index: &str,
        properties: &Map<String, Value>,
    ) -> Result<(), SearchError>;

    /// Index a document, replacing any existing document with the same id.
    ///
    /// # Returns
    ///
    /// * `Ok(IndexDocumentResponse)` - Carries the engine-assigned id when the request had none
    /// * `Err(SearchError)` - If the write fails
    async fn index_document(
        &self,
        request: &IndexDocumentRequest,
    ) -> Result<IndexDocumentResponse, SearchError>;

    /// Fetch a document by id.
    ///
    /// A missing document is `Ok` with `found: false`.
    async fn get_document(&self, index: &str, id: &str)
        -> Result<GetDocumentResponse, SearchError>;

    /// Run a raw query DSL body against an index and return the engine's response.
    async fn search(&self, index: &str, body: &Value) -> Result<Value, SearchError>;

    /// Check that the engine is reachable.
    async fn ping(&self) -> Result<bool, SearchError>;
}
