//! Error types for the search actions repository.

mod search_error;

pub use search_error::SearchError;
