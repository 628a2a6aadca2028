//! Configuration and dependency initialization for the search actions.

mod dependencies;
mod entity_options;
mod plugin_options;

pub use dependencies::Dependencies;
pub use entity_options::EntityOptions;
pub use plugin_options::PluginOptions;
