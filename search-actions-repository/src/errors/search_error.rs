//! Search error types.
//!
//! This module defines the error type for every call into the search engine,
//! plus configuration errors raised while resolving connection options.

use thiserror::Error;

/// Errors that can occur during search engine operations.
///
/// These are operational errors: the adapter forwards them to its caller
/// unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Invalid connection configuration (bad host, unknown log level, etc.).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Failed to reach the search engine or build the transport.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to create an index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to index a document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// An existence check, document lookup or search query failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// A short, stable name for the error kind, used in wire replies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "config",
            Self::ConnectionError(_) => "connection",
            Self::IndexCreationError(_) => "index_creation",
            Self::IndexError(_) => "index",
            Self::QueryError(_) => "query",
            Self::ParseError(_) => "parse",
        }
    }
}
