//! Bindings from `role:search` patterns to the adapter's actions.

use std::sync::Arc;

use search_actions_shared::{
    ActionPattern, CreateIndexRequest, DeleteRequest, LoadRequest, SaveRequest, SearchRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::adapter::SearchActions;
use crate::dispatch::registry::ActionRegistry;
use crate::errors::ActionError;

/// Commands registered under `role:search`.
pub const SEARCH_COMMANDS: [&str; 5] = ["create-index", "save", "delete", "load", "search"];

/// Register every search action on `registry`.
///
/// Each handler decodes the message into its typed request, calls the adapter
/// and encodes the result. Actions without a result reply with `null`.
pub fn register_search_actions(registry: &mut ActionRegistry, actions: Arc<SearchActions>) {
    let adapter = Arc::clone(&actions);
    registry.add(ActionPattern::search("create-index"), move |args| {
        let actions = Arc::clone(&adapter);
        async move {
            let request: CreateIndexRequest = decode(args)?;
            actions.create_index(request).await?;
            Ok::<_, ActionError>(Value::Null)
        }
    });

    let adapter = Arc::clone(&actions);
    registry.add(ActionPattern::search("save"), move |args| {
        let actions = Arc::clone(&adapter);
        async move {
            let request: SaveRequest = decode(args)?;
            encode(actions.save(request).await?)
        }
    });

    let adapter = Arc::clone(&actions);
    registry.add(ActionPattern::search("delete"), move |args| {
        let actions = Arc::clone(&adapter);
        async move {
            let request: DeleteRequest = decode(args)?;
            actions.delete(request).await?;
            Ok::<_, ActionError>(Value::Null)
        }
    });

    let adapter = Arc::clone(&actions);
    registry.add(ActionPattern::search("load"), move |args| {
        let actions = Arc::clone(&adapter);
        async move {
            let request: LoadRequest = decode(args)?;
            encode(actions.load(request).await?)
        }
    });

    registry.add(ActionPattern::search("search"), move |args| {
        let actions = Arc::clone(&actions);
        async move {
            let request: SearchRequest = decode(args)?;
            actions.search(request).await
        }
    });
}

fn decode<T: DeserializeOwned>(args: Value) -> Result<T, ActionError> {
    serde_json::from_value(args).map_err(|e| ActionError::invalid_message(e.to_string()))
}

fn encode<T: Serialize>(result: T) -> Result<Value, ActionError> {
    serde_json::to_value(result).map_err(|e| ActionError::invalid_message(e.to_string()))
}
