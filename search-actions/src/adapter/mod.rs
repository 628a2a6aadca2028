//! Adapter module for the search actions.
//!
//! Implements each action as a typed async call over a shared search engine client.

pub mod entity_kind;
pub mod indexed_attributes;
mod search_actions;

pub use search_actions::{SearchActions, PLUGIN_NAME};
