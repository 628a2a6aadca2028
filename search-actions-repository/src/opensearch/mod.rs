//! OpenSearch implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust crate. The calls used here (index existence,
//! index creation, document index/get and search) are wire-compatible with
//! Elasticsearch.

mod client;

pub use client::OpenSearchClient;
