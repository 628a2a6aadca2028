//! This module defines the core data structures used across the search action adapter.
//! It re-exports the action pattern and the request/result types.

pub mod action_pattern;
pub mod requests;
pub mod results;

pub use action_pattern::ActionPattern;
pub use requests::{CreateIndexRequest, DeleteRequest, LoadRequest, SaveRequest, SearchRequest};
pub use results::{LoadResult, SaveResult};
