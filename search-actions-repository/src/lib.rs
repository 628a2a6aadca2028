//! # Search Actions Repository
//!
//! This crate provides the connection options and default merging for the
//! search engine, the abstract `SearchEngineClient` interface the action
//! adapter calls into, and a concrete implementation for the OpenSearch /
//! Elasticsearch HTTP API.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;
pub mod utils;

pub use config::{ConnectionConfig, ConnectionOptions, LogLevel};
pub use errors::SearchError;
pub use interfaces::SearchEngineClient;
pub use opensearch::OpenSearchClient;
pub use types::{GetDocumentResponse, IndexDocumentRequest, IndexDocumentResponse};
pub use utils::parse_host;
