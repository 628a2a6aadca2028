//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    params::Refresh,
    GetParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::{json, Map, Value};
use tracing::{debug, error, info, instrument};

use crate::config::ConnectionConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::types::{GetDocumentResponse, IndexDocumentRequest, IndexDocumentResponse};

/// OpenSearch client implementation.
///
/// Holds one transport to the configured node for its whole lifetime.
///
/// The typeless document API has no type path segment, so the document type is
/// recorded in the stored document under the configured type field.
///
/// # Example
///
/// ```ignore
/// use search_actions_repository::{ConnectionOptions, IndexDocumentRequest, OpenSearchClient};
///
/// let config = ConnectionOptions::default().with_index("widgets").with_defaults();
/// let client = OpenSearchClient::new(config)?;
///
/// if !client.index_exists("widgets").await? {
///     client.create_index("widgets", &Default::default()).await?;
/// }
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    config: ConnectionConfig,
}

impl OpenSearchClient {
    /// Create a new client for the node named in `config.host`.
    ///
    /// No request is sent; an unreachable node surfaces on the first call.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the host is invalid or the transport cannot be built
    pub fn new(config: ConnectionConfig) -> Result<Self, SearchError> {
        let url = config.url()?;

        let conn_pool = SingleNodeConnectionPool::new(url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            host = %config.host,
            sniff_interval_ms = config.sniff_interval.as_millis() as u64,
            sniff_on_start = config.sniff_on_start,
            log_level = %config.log,
            "Created OpenSearch client"
        );

        Ok(Self { client, config })
    }

    /// The merged configuration this client was built from.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Build the stored document: the request body with the type field set to
    /// the request's type. A type field already in the body is overwritten.
    fn document_body(type_field: &str, request: &IndexDocumentRequest) -> Map<String, Value> {
        let mut body = request.body.clone();
        body.insert(
            type_field.to_string(),
            Value::String(request.doc_type.clone()),
        );
        body
    }

    /// Build the index creation body. No properties means engine defaults.
    fn index_body(properties: &Map<String, Value>) -> Value {
        if properties.is_empty() {
            json!({})
        } else {
            json!({"mappings": {"properties": properties}})
        }
    }

    /// Read the body of a failed response for error reporting.
    async fn failure_body(response: Response) -> String {
        response.text().await.unwrap_or_default()
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    #[instrument(skip(self))]
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        match status.as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            _ => {
                let error_body = Self::failure_body(response).await;
                error!(status = %status, body = %error_body, "Index existence check failed");
                Err(SearchError::query(format!(
                    "Index existence check failed with status {}: {}",
                    status, error_body
                )))
            }
        }
    }

    #[instrument(skip(self, properties), fields(mapped_fields = properties.len()))]
    async fn create_index(
        &self,
        index: &str,
        properties: &Map<String, Value>,
    ) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(Self::index_body(properties))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(SearchError::index_creation(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %index, "Index created");
        Ok(())
    }

    #[instrument(skip(self, request), fields(index = %request.index, doc_type = %request.doc_type))]
    async fn index_document(
        &self,
        request: &IndexDocumentRequest,
    ) -> Result<IndexDocumentResponse, SearchError> {
        let body = Self::document_body(&self.config.type_field, request);

        let parts = match request.id.as_deref() {
            Some(id) => IndexParts::IndexId(&request.index, id),
            None => IndexParts::Index(&request.index),
        };

        let refresh = if request.refresh {
            Refresh::True
        } else {
            Refresh::False
        };

        let response = self
            .client
            .index(parts)
            .refresh(refresh)
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(SearchError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body = response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        let indexed = IndexDocumentResponse::from_engine_response(&response_body)?;

        debug!(doc_id = %indexed.id, result = ?indexed.result, "Document indexed");
        Ok(indexed)
    }

    #[instrument(skip(self))]
    async fn get_document(
        &self,
        index: &str,
        id: &str,
    ) -> Result<GetDocumentResponse, SearchError> {
        let response = self
            .client
            .get(GetParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();

        // 404 covers both a missing document and a missing index
        if status.as_u16() == 404 {
            debug!(doc_id = %id, "Document not found");
            return Ok(GetDocumentResponse::not_found(id));
        }

        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            error!(status = %status, body = %error_body, "Get request failed");
            return Err(SearchError::query(format!(
                "Get failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body = response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        GetDocumentResponse::from_engine_response(id, &response_body)
    }

    #[instrument(skip(self, body))]
    async fn search(&self, index: &str, body: &Value) -> Result<Value, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(body.clone())
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))
    }

    async fn ping(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Ok(response.status_code().is_success())
    }
}
