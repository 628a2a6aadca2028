//! # Search Actions
//!
//! Exposes a handful of Elasticsearch / OpenSearch operations as message-style
//! actions addressed by `role` and `cmd`.
//!
//! ## Architecture
//!
//! 1. **Adapter**: `SearchActions` owns one search engine client and implements
//!    each action as a typed async call
//! 2. **Dispatch**: `ActionRegistry` maps `role`/`cmd` patterns to handlers and
//!    decodes JSON messages into typed requests
//! 3. **Host**: a JSON-lines loop that feeds messages from a reader into the
//!    registry and writes one reply per message
//!
//! ## Modules
//!
//! - [`adapter`]: The action adapter and entity-kind type inference
//! - [`config`]: Plugin options and dependency initialization
//! - [`dispatch`]: The role/cmd registry and the search action bindings
//! - [`host`]: The JSON-lines host loop
//! - [`errors`]: Error types for the actions

pub mod adapter;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod host;

pub use adapter::{SearchActions, PLUGIN_NAME};
pub use config::{Dependencies, PluginOptions};
pub use dispatch::ActionRegistry;
pub use errors::ActionError;

use search_actions_repository::SearchError;
use thiserror::Error;

/// Errors that can occur while starting or running the host.
#[derive(Error, Debug)]
pub enum PluginError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search engine client error.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),

    /// Reading messages or writing replies failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A reply could not be encoded.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl PluginError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
