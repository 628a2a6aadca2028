//! Dispatch module for the search actions.
//!
//! Binds the adapter's typed actions to `role`/`cmd` patterns in a registry.

mod bindings;
mod registry;

pub use bindings::{register_search_actions, SEARCH_COMMANDS};
pub use registry::{ActionFuture, ActionRegistry};
