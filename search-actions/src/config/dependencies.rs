//! Dependency initialization and wiring for the search actions host.

use std::sync::Arc;
use tracing::{info, warn};

use crate::adapter::SearchActions;
use crate::config::PluginOptions;
use crate::dispatch::{register_search_actions, ActionRegistry};
use crate::PluginError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The adapter shared by every registered handler.
    pub actions: Arc<SearchActions>,

    /// Registry with the `role:search` actions bound.
    pub registry: ActionRegistry,
}

impl Dependencies {
    /// Build the adapter from `options` and register its actions.
    ///
    /// When `sniffOnStart` is enabled the engine is pinged once. An unreachable
    /// engine is logged and does not stop initialization; actions report
    /// connection failures individually.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(PluginError)` - If the client cannot be built from the options
    pub async fn new(options: PluginOptions) -> Result<Self, PluginError> {
        let actions = Arc::new(SearchActions::new(options)?);
        let connection = actions.connection();

        info!(
            host = %connection.host,
            sniff_interval_ms = connection.sniff_interval.as_millis() as u64,
            sniff_on_start = connection.sniff_on_start,
            log_level = %connection.log,
            index = connection.index.as_deref().unwrap_or("-"),
            type_field = %connection.type_field,
            refresh_on_save = actions.refresh_on_save(),
            "Initializing dependencies"
        );

        if connection.sniff_on_start {
            Self::check_connection(&actions).await;
        }

        let mut registry = ActionRegistry::new();
        register_search_actions(&mut registry, Arc::clone(&actions));

        info!(
            plugin = actions.name(),
            actions = registry.patterns().count(),
            "Search actions registered"
        );

        Ok(Self { actions, registry })
    }

    async fn check_connection(actions: &SearchActions) {
        let host = &actions.connection().host;
        match actions.native().ping().await {
            Ok(true) => info!(host = %host, "Search engine reachable"),
            Ok(false) => warn!(host = %host, "Search engine answered ping with a failure status"),
            Err(e) => warn!(host = %host, error = %e, "Search engine unreachable at startup"),
        }
    }
}
