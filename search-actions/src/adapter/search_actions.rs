//! Search action adapter implementation.
//!
//! Each action validates its request, makes its downstream call(s) on the
//! shared client and forwards the client's result. The adapter holds no state
//! besides the client handle and its merged configuration.

use std::sync::Arc;

use search_actions_repository::{
    ConnectionConfig, IndexDocumentRequest, OpenSearchClient, SearchEngineClient, SearchError,
};
use search_actions_shared::{
    CreateIndexRequest, DeleteRequest, LoadRequest, LoadResult, SaveRequest, SaveResult,
    SearchRequest,
};
use serde_json::{json, Value};
use tracing::{debug, error, instrument};

use crate::adapter::{entity_kind, indexed_attributes};
use crate::config::{EntityOptions, PluginOptions};
use crate::errors::ActionError;

/// The name the adapter is registered under.
pub const PLUGIN_NAME: &str = "search";

/// The search action adapter.
///
/// This is the capability interface the dispatch layer binds to. It can also be
/// used directly:
///
/// ```no_run
/// use search_actions::{PluginOptions, SearchActions};
/// use search_actions_shared::{CreateIndexRequest, SaveRequest};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let actions = SearchActions::new(PluginOptions::default())?;
///
/// actions.create_index(CreateIndexRequest::new("widgets")).await?;
///
/// let data = json!({"jobTitle": "eng"}).as_object().unwrap().clone();
/// let saved = actions
///     .save(SaveRequest::new(data).with_index("widgets").with_type("foo"))
///     .await?;
/// println!("saved {}", saved.id);
/// # Ok(())
/// # }
/// ```
pub struct SearchActions {
    client: Arc<dyn SearchEngineClient>,
    connection: ConnectionConfig,
    refresh_on_save: bool,
    entities: Vec<EntityOptions>,
}

impl SearchActions {
    /// Build the adapter and its OpenSearch client from `options`.
    ///
    /// Connection options are merged over the defaults key by key, and exactly
    /// one client is constructed from the result.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchActions)` - The adapter, ready to serve actions
    /// * `Err(SearchError)` - If the client cannot be built from the merged options
    pub fn new(options: PluginOptions) -> Result<Self, SearchError> {
        let connection = options.connection.with_defaults();
        let client = OpenSearchClient::new(connection.clone())?;

        Ok(Self {
            client: Arc::new(client),
            connection,
            refresh_on_save: options.refresh_on_save,
            entities: options.entities,
        })
    }

    /// Build the adapter around an existing client.
    ///
    /// Connection options are still merged so `connection()` and index and type
    /// field resolution behave as with [`SearchActions::new`].
    pub fn with_client(options: PluginOptions, client: Arc<dyn SearchEngineClient>) -> Self {
        Self {
            client,
            connection: options.connection.with_defaults(),
            refresh_on_save: options.refresh_on_save,
            entities: options.entities,
        }
    }

    /// The fixed name of this adapter.
    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// The underlying client handle.
    pub fn native(&self) -> &Arc<dyn SearchEngineClient> {
        &self.client
    }

    /// The merged connection configuration.
    pub fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    /// Whether every save asks the engine to refresh before returning.
    pub fn refresh_on_save(&self) -> bool {
        self.refresh_on_save
    }

    /// The configured entity for a document type, if any.
    fn entity_for(&self, doc_type: &str) -> Option<&EntityOptions> {
        self.entities.iter().find(|entity| entity.matches(doc_type))
    }

    /// The request's index, else the connection's default index.
    fn resolve_index(&self, index: Option<String>) -> Result<String, ActionError> {
        index
            .filter(|i| !i.is_empty())
            .or_else(|| self.connection.index.clone())
            .ok_or_else(|| {
                ActionError::misuse("missing index: pass 'index' or configure a default index")
            })
    }

    /// Create an index unless it already exists.
    ///
    /// An existing index is a success. An error from the existence check is
    /// forwarded without attempting creation. A new index gets the field
    /// mappings of every configured entity.
    #[instrument(skip(self, request))]
    pub async fn create_index(&self, request: CreateIndexRequest) -> Result<(), ActionError> {
        let index = self.resolve_index(request.index)?;

        if self.client.index_exists(&index).await? {
            debug!(index = %index, "Index already exists");
            return Ok(());
        }

        let properties = indexed_attributes::index_properties(&self.entities);
        self.client.create_index(&index, &properties).await?;

        debug!(index = %index, mapped_fields = properties.len(), "Index created");
        Ok(())
    }

    /// Index one document, creating or replacing it.
    ///
    /// `data` and a resolvable type are required; either missing is a misuse
    /// error raised before any call to the engine. The payload's `id`, if any,
    /// addresses the document, otherwise the engine assigns one. For a
    /// configured entity with indexed attributes, only those attributes are
    /// stored, along with `id` and the type field. Engine errors are logged
    /// and forwarded.
    #[instrument(skip(self, request))]
    pub async fn save(&self, request: SaveRequest) -> Result<SaveResult, ActionError> {
        let id = request.document_id();
        let data = request
            .data
            .ok_or_else(|| ActionError::misuse("missing data"))?;

        let doc_type = entity_kind::resolve_type(
            request.doc_type.as_deref(),
            &data,
            &self.connection.type_field,
        )
        .ok_or_else(|| {
            ActionError::misuse(format!(
                "expected either 'type' or 'data.{}' to deduce the entity type",
                self.connection.type_field
            ))
        })?;

        let index = self.resolve_index(request.index)?;

        let type_field = &self.connection.type_field;
        let data = match self
            .entity_for(&doc_type)
            .and_then(|entity| entity.indexed_attributes.as_ref())
        {
            Some(attributes) => {
                let fields = data.len();
                let data = indexed_attributes::filter_document(data, attributes, type_field);
                debug!(
                    doc_type = %doc_type,
                    dropped = fields - data.len(),
                    "Dropped fields that are not indexed attributes"
                );
                data
            }
            None => data,
        };

        let index_request = IndexDocumentRequest {
            index,
            doc_type,
            id,
            refresh: self.refresh_on_save,
            body: data,
        };

        match self.client.index_document(&index_request).await {
            Ok(indexed) => {
                debug!(doc_id = %indexed.id, index = %index_request.index, "Document saved");
                Ok(SaveResult {
                    id: indexed.id,
                    result: indexed.result,
                    version: indexed.version,
                })
            }
            Err(e) => {
                error!(
                    index = %index_request.index,
                    doc_type = %index_request.doc_type,
                    error = %e,
                    "Failed to save document"
                );
                Err(e.into())
            }
        }
    }

    /// Accept a delete and report success.
    ///
    /// This does not contact the search engine: nothing is deleted. Callers
    /// that need documents removed must do it another way.
    #[instrument(skip(self, request))]
    pub async fn delete(&self, request: DeleteRequest) -> Result<(), ActionError> {
        debug!(
            args = request.args.len(),
            "Delete accepted; not forwarded to the search engine"
        );
        Ok(())
    }

    /// Fetch one document by id.
    ///
    /// A missing document is `found: false`, not an error.
    #[instrument(skip(self, request))]
    pub async fn load(&self, request: LoadRequest) -> Result<LoadResult, ActionError> {
        let id = request
            .document_id()
            .ok_or_else(|| ActionError::misuse("missing id"))?;
        let index = self.resolve_index(request.index)?;

        let document = self.client.get_document(&index, &id).await?;

        Ok(LoadResult {
            found: document.found,
            id: document.id,
            source: document.source,
        })
    }

    /// Run a raw query against an index and forward the engine's response.
    ///
    /// Without a `search` body every document in the index matches.
    #[instrument(skip(self, request))]
    pub async fn search(&self, request: SearchRequest) -> Result<Value, ActionError> {
        let index = self.resolve_index(request.index)?;
        let body = request
            .search
            .unwrap_or_else(|| json!({"query": {"match_all": {}}}));

        Ok(self.client.search(&index, &body).await?)
    }
}
