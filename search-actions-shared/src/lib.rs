//! # Search Actions Shared
//!
//! This crate defines the data structures exchanged with the search action adapter.
//! It includes the `role`/`cmd` action pattern used for dispatch and the typed
//! requests and results for every search action.

pub mod types;

pub use types::action_pattern::{ActionPattern, SEARCH_ROLE};
pub use types::requests::{
    CreateIndexRequest, DeleteRequest, LoadRequest, SaveRequest, SearchRequest,
};
pub use types::results::{LoadResult, SaveResult};
