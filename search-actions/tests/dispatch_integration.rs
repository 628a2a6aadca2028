//! Integration tests for the search actions.
//!
//! These tests wire the real adapter, registry and host loop to an in-memory
//! search engine so the full message path runs without a live cluster.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use search_actions::config::EntityOptions;
use search_actions::dispatch::{register_search_actions, ActionRegistry};
use search_actions::host::serve_lines;
use search_actions::{ActionError, PluginOptions, SearchActions};
use search_actions_repository::{
    ConnectionOptions, GetDocumentResponse, IndexDocumentRequest, IndexDocumentResponse,
    SearchEngineClient, SearchError,
};

#[derive(Clone)]
struct StoredDocument {
    doc_type: String,
    version: u64,
    source: Map<String, Value>,
}

/// In-memory engine: indices hold documents by id and ids are generated in
/// sequence when a save carries none.
#[derive(Default)]
struct InMemoryEngine {
    indices: Mutex<HashMap<String, HashMap<String, StoredDocument>>>,
    mappings: Mutex<HashMap<String, Map<String, Value>>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
    create_calls: AtomicUsize,
    fail_writes: bool,
}

impl InMemoryEngine {
    fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn stored(&self, index: &str, id: &str) -> Option<StoredDocument> {
        self.indices
            .lock()
            .unwrap()
            .get(index)
            .and_then(|docs| docs.get(id))
            .cloned()
    }
}

#[async_trait]
impl SearchEngineClient for InMemoryEngine {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.indices.lock().unwrap().contains_key(index))
    }

    async fn create_index(
        &self,
        index: &str,
        properties: &Map<String, Value>,
    ) -> Result<(), SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.mappings
            .lock()
            .unwrap()
            .insert(index.to_string(), properties.clone());
        self.indices
            .lock()
            .unwrap()
            .insert(index.to_string(), HashMap::new());
        Ok(())
    }

    async fn index_document(
        &self,
        request: &IndexDocumentRequest,
    ) -> Result<IndexDocumentResponse, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(SearchError::index("status 503: cluster unavailable"));
        }

        let id = request.id.clone().unwrap_or_else(|| {
            format!("gen-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
        });

        let mut indices = self.indices.lock().unwrap();
        let documents = indices.entry(request.index.clone()).or_default();
        let version = documents.get(&id).map(|d| d.version + 1).unwrap_or(1);
        let result = if version == 1 { "created" } else { "updated" };

        documents.insert(
            id.clone(),
            StoredDocument {
                doc_type: request.doc_type.clone(),
                version,
                source: request.body.clone(),
            },
        );

        Ok(IndexDocumentResponse {
            id,
            result: Some(result.to_string()),
            version: Some(version),
        })
    }

    async fn get_document(&self, index: &str, id: &str) -> Result<GetDocumentResponse, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match self.stored(index, id) {
            Some(doc) => GetDocumentResponse {
                found: true,
                id: id.to_string(),
                source: Some(doc.source),
            },
            None => GetDocumentResponse::not_found(id),
        })
    }

    async fn search(&self, index: &str, _body: &Value) -> Result<Value, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let indices = self.indices.lock().unwrap();
        let hits: Vec<Value> = indices
            .get(index)
            .map(|docs| {
                docs.iter()
                    .map(|(id, doc)| json!({"_id": id, "_source": doc.source}))
                    .collect()
            })
            .unwrap_or_default();

        Ok(json!({"hits": {"total": hits.len(), "hits": hits}}))
    }

    async fn ping(&self) -> Result<bool, SearchError> {
        Ok(true)
    }
}

fn setup(engine: Arc<InMemoryEngine>, options: PluginOptions) -> ActionRegistry {
    let actions = Arc::new(SearchActions::with_client(options, engine));
    let mut registry = ActionRegistry::new();
    register_search_actions(&mut registry, actions);
    registry
}

fn default_setup() -> (Arc<InMemoryEngine>, ActionRegistry) {
    let engine = Arc::new(InMemoryEngine::default());
    let registry = setup(Arc::clone(&engine), PluginOptions::default());
    (engine, registry)
}

#[tokio::test]
async fn test_save_without_id_returns_generated_id() {
    let (engine, registry) = default_setup();

    let result = registry
        .act(json!({
            "role": "search",
            "cmd": "save",
            "index": "people",
            "type": "foo",
            "data": {"jobTitle": "important person"}
        }))
        .await
        .unwrap();

    assert_eq!(result["id"], "gen-1");
    assert_eq!(result["result"], "created");

    let stored = engine.stored("people", "gen-1").unwrap();
    assert_eq!(stored.doc_type, "foo");
    assert_eq!(stored.source["jobTitle"], "important person");
}

#[tokio::test]
async fn test_save_with_id_updates_existing_document() {
    let (engine, registry) = default_setup();
    let save = |title: &str| {
        json!({
            "role": "search",
            "cmd": "save",
            "index": "people",
            "type": "foo",
            "data": {"id": "abcd", "jobTitle": title}
        })
    };

    registry.act(save("intern")).await.unwrap();
    let result = registry.act(save("manager")).await.unwrap();

    assert_eq!(result, json!({"id": "abcd", "result": "updated", "version": 2}));
    assert_eq!(engine.stored("people", "abcd").unwrap().source["jobTitle"], "manager");
}

#[tokio::test]
async fn test_save_infers_type_from_entity_field() {
    let (engine, registry) = default_setup();

    registry
        .act(json!({
            "role": "search",
            "cmd": "save",
            "index": "people",
            "data": {"id": "e1", "entity$": "-/-/person"}
        }))
        .await
        .unwrap();

    assert_eq!(engine.stored("people", "e1").unwrap().doc_type, "-/-/person");
}

#[tokio::test]
async fn test_save_without_type_is_misuse_before_any_engine_call() {
    let (engine, registry) = default_setup();

    let err = registry
        .act(json!({
            "role": "search",
            "cmd": "save",
            "index": "people",
            "data": {"jobTitle": "eng"}
        }))
        .await
        .unwrap_err();

    assert!(err.is_misuse());
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn test_save_without_data_is_misuse() {
    let (engine, registry) = default_setup();

    let err = registry
        .act(json!({"role": "search", "cmd": "save", "index": "people", "type": "foo"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ActionError::Misuse(_)));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn test_save_uses_configured_default_index() {
    let engine = Arc::new(InMemoryEngine::default());
    let options = PluginOptions::default()
        .with_connection(ConnectionOptions::default().with_index("entities"));
    let registry = setup(Arc::clone(&engine), options);

    let result = registry
        .act(json!({"role": "search", "cmd": "save", "type": "foo", "data": {"id": "x"}}))
        .await
        .unwrap();

    assert_eq!(result["id"], "x");
    assert!(engine.stored("entities", "x").is_some());
}

#[tokio::test]
async fn test_engine_failure_is_forwarded() {
    let engine = Arc::new(InMemoryEngine::failing());
    let registry = setup(Arc::clone(&engine), PluginOptions::default());

    let err = registry
        .act(json!({
            "role": "search",
            "cmd": "save",
            "index": "people",
            "type": "foo",
            "data": {"jobTitle": "eng"}
        }))
        .await
        .unwrap_err();

    assert!(!err.is_misuse());
    assert_eq!(err.kind(), "index");
    assert_eq!(engine.calls(), 1);
}

#[tokio::test]
async fn test_create_index_twice_creates_once() {
    let (engine, registry) = default_setup();
    let message = json!({"role": "search", "cmd": "create-index", "index": "widgets"});

    assert_eq!(registry.act(message.clone()).await.unwrap(), Value::Null);
    assert_eq!(registry.act(message).await.unwrap(), Value::Null);

    assert_eq!(engine.create_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_delete_is_a_no_op() {
    let (engine, registry) = default_setup();
    registry
        .act(json!({
            "role": "search",
            "cmd": "save",
            "index": "people",
            "type": "foo",
            "data": {"id": "keep"}
        }))
        .await
        .unwrap();
    let calls_before = engine.calls();

    let result = registry
        .act(json!({"role": "search", "cmd": "delete", "index": "people", "id": "keep"}))
        .await
        .unwrap();

    assert_eq!(result, Value::Null);
    assert_eq!(engine.calls(), calls_before);
    assert!(engine.stored("people", "keep").is_some());
}

#[tokio::test]
async fn test_load_after_save() {
    let (_engine, registry) = default_setup();
    registry
        .act(json!({
            "role": "search",
            "cmd": "save",
            "index": "people",
            "type": "foo",
            "data": {"id": "p1", "name": "Ada"}
        }))
        .await
        .unwrap();

    let found = registry
        .act(json!({"role": "search", "cmd": "load", "index": "people", "id": "p1"}))
        .await
        .unwrap();
    assert_eq!(found["found"], true);
    assert_eq!(found["_id"], "p1");
    assert_eq!(found["_source"]["name"], "Ada");

    let missing = registry
        .act(json!({"role": "search", "cmd": "load", "index": "people", "id": "p2"}))
        .await
        .unwrap();
    assert_eq!(missing, json!({"found": false, "_id": "p2"}));
}

#[tokio::test]
async fn test_load_with_numeric_id_after_save() {
    let (_engine, registry) = default_setup();
    registry
        .act(json!({
            "role": "search",
            "cmd": "save",
            "index": "people",
            "type": "foo",
            "data": {"id": 42, "name": "Ada"}
        }))
        .await
        .unwrap();

    let found = registry
        .act(json!({"role": "search", "cmd": "load", "index": "people", "id": 42}))
        .await
        .unwrap();

    assert_eq!(found["found"], true);
    assert_eq!(found["_id"], "42");
    assert_eq!(found["_source"]["name"], "Ada");
}

fn entity_setup() -> (Arc<InMemoryEngine>, ActionRegistry) {
    let engine = Arc::new(InMemoryEngine::default());
    let options = PluginOptions::default()
        .with_refresh_on_save(true)
        .with_entity(
            EntityOptions::new("foo")
                .with_indexed_attribute("jobTitle", json!({"type": "string"}))
                .with_indexed_attribute(
                    "configuredAnalyzer",
                    json!({"type": "string", "index": "not_analyzed"}),
                ),
        );
    let registry = setup(Arc::clone(&engine), options);
    (engine, registry)
}

#[tokio::test]
async fn test_unindexed_attributes_are_never_stored() {
    let (engine, registry) = entity_setup();

    let saved = registry
        .act(json!({
            "role": "search",
            "cmd": "save",
            "index": "people",
            "data": {
                "entity$": "-/-/foo",
                "jobTitle": "important sounding title",
                "passHash": "DO NOT INDEX!"
            }
        }))
        .await
        .unwrap();
    let id = saved["id"].as_str().unwrap().to_string();

    assert!(!engine.stored("people", &id).unwrap().source.contains_key("passHash"));

    let loaded = registry
        .act(json!({"role": "search", "cmd": "load", "index": "people", "type": "foo", "id": id}))
        .await
        .unwrap();
    let source = &loaded["_source"];
    assert_eq!(source["jobTitle"], "important sounding title");
    assert_eq!(source["entity$"], "-/-/foo");
    assert!(source.get("passHash").is_none());

    let found = registry
        .act(json!({"role": "search", "cmd": "search", "index": "people", "type": "foo"}))
        .await
        .unwrap();
    assert!(found["hits"]["hits"][0]["_source"].get("passHash").is_none());
}

#[tokio::test]
async fn test_create_index_applies_entity_mappings() {
    let (engine, registry) = entity_setup();

    registry
        .act(json!({"role": "search", "cmd": "create-index", "index": "people"}))
        .await
        .unwrap();

    let mappings = engine.mappings.lock().unwrap();
    assert_eq!(
        Value::Object(mappings["people"].clone()),
        json!({
            "jobTitle": {"type": "text"},
            "configuredAnalyzer": {"type": "keyword"}
        })
    );
}

#[tokio::test]
async fn test_search_returns_engine_response() {
    let (_engine, registry) = default_setup();
    registry
        .act(json!({
            "role": "search",
            "cmd": "save",
            "index": "people",
            "type": "foo",
            "data": {"id": "p1", "name": "Ada"}
        }))
        .await
        .unwrap();

    let response = registry
        .act(json!({
            "role": "search",
            "cmd": "search",
            "index": "people",
            "search": {"query": {"match": {"name": "Ada"}}}
        }))
        .await
        .unwrap();

    assert_eq!(response["hits"]["total"], 1);
    assert_eq!(response["hits"]["hits"][0]["_id"], "p1");
}

#[tokio::test]
async fn test_unknown_command_has_no_handler() {
    let (_engine, registry) = default_setup();

    let err = registry
        .act(json!({"role": "search", "cmd": "reindex"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ActionError::NoHandler(_)));
}

#[tokio::test]
async fn test_host_loop_serves_a_session() {
    let (_engine, registry) = default_setup();
    let input = [
        json!({"role": "search", "cmd": "create-index", "index": "people"}),
        json!({"role": "search", "cmd": "save", "index": "people", "type": "foo", "data": {"id": "p1"}}),
        json!({"role": "search", "cmd": "save", "index": "people", "data": {"id": "p2"}}),
        json!({"role": "search", "cmd": "load", "index": "people", "id": "p1"}),
    ]
    .iter()
    .map(Value::to_string)
    .collect::<Vec<_>>()
    .join("\n");
    let mut output = Vec::new();

    let summary = serve_lines(&registry, input.as_bytes(), &mut output)
        .await
        .unwrap();

    let replies: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(summary.handled, 4);
    assert_eq!(summary.failed, 1);
    assert_eq!(replies[0], json!({"ok": null}));
    assert_eq!(replies[1]["ok"]["id"], "p1");
    assert_eq!(replies[2]["error"]["kind"], "misuse");
    assert_eq!(replies[3]["ok"]["found"], true);
}
