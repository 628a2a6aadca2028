//! Plugin options and environment loading.

use std::env;

use search_actions_repository::{ConnectionOptions, LogLevel};
use serde::{Deserialize, Serialize};

use crate::config::EntityOptions;
use crate::PluginError;

/// Options the search actions are constructed from.
///
/// Deserializes from the configuration object hosts pass at registration:
///
/// ```
/// use search_actions::PluginOptions;
///
/// let options: PluginOptions = serde_json::from_str(
///     r#"{"refreshOnSave": true, "connection": {"index": "widgets"}}"#,
/// ).unwrap();
///
/// assert!(options.refresh_on_save);
/// assert_eq!(options.connection.index.as_deref(), Some("widgets"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginOptions {
    /// Connection options; defaults are merged per key at construction.
    pub connection: ConnectionOptions,

    /// Force a refresh after every save. Only for tests that read their own
    /// writes; it defeats the engine's write batching.
    pub refresh_on_save: bool,

    /// Entity kinds whose stored fields are restricted to their indexed
    /// attributes. Their mappings are applied when an index is created.
    pub entities: Vec<EntityOptions>,
}

impl PluginOptions {
    pub fn with_connection(mut self, connection: ConnectionOptions) -> Self {
        self.connection = connection;
        self
    }

    pub fn with_refresh_on_save(mut self, refresh_on_save: bool) -> Self {
        self.refresh_on_save = refresh_on_save;
        self
    }

    pub fn with_entity(mut self, entity: EntityOptions) -> Self {
        self.entities.push(entity);
        self
    }

    /// Load options from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SEARCH_HOST`: Search engine node (default: localhost:9200)
    /// - `SEARCH_SNIFF_INTERVAL_MS`: Sniff interval in milliseconds (default: 300000)
    /// - `SEARCH_SNIFF_ON_START`: Ping the engine at startup (default: true)
    /// - `SEARCH_LOG_LEVEL`: Client log level (default: error)
    /// - `SEARCH_INDEX`: Default target index (no default)
    /// - `SEARCH_TYPE_FIELD`: Document field carrying the type (default: entity$)
    /// - `SEARCH_REFRESH_ON_SAVE`: Refresh after each save (default: false)
    /// - `SEARCH_ENTITIES`: JSON array of entity options (default: none)
    ///
    /// Unset variables stay unset so the per-key defaults apply.
    pub fn from_env() -> Result<Self, PluginError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load options through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PluginError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut connection = ConnectionOptions::default();

        if let Some(host) = lookup("SEARCH_HOST") {
            connection = connection.with_host(host);
        }
        if let Some(interval) = lookup("SEARCH_SNIFF_INTERVAL_MS") {
            let interval = interval.trim().parse::<u64>().map_err(|e| {
                PluginError::config(format!("Invalid SEARCH_SNIFF_INTERVAL_MS: {}", e))
            })?;
            connection = connection.with_sniff_interval_ms(interval);
        }
        if let Some(sniff) = lookup("SEARCH_SNIFF_ON_START") {
            let sniff = parse_bool("SEARCH_SNIFF_ON_START", &sniff)?;
            connection = connection.with_sniff_on_start(sniff);
        }
        if let Some(level) = lookup("SEARCH_LOG_LEVEL") {
            let level = level
                .parse::<LogLevel>()
                .map_err(|e| PluginError::config(format!("Invalid SEARCH_LOG_LEVEL: {}", e)))?;
            connection = connection.with_log_level(level);
        }
        if let Some(index) = lookup("SEARCH_INDEX") {
            connection = connection.with_index(index);
        }
        if let Some(type_field) = lookup("SEARCH_TYPE_FIELD") {
            connection = connection.with_type_field(type_field);
        }

        let refresh_on_save = match lookup("SEARCH_REFRESH_ON_SAVE") {
            Some(value) => parse_bool("SEARCH_REFRESH_ON_SAVE", &value)?,
            None => false,
        };

        let entities = match lookup("SEARCH_ENTITIES") {
            Some(value) => serde_json::from_str::<Vec<EntityOptions>>(&value)
                .map_err(|e| PluginError::config(format!("Invalid SEARCH_ENTITIES: {}", e)))?,
            None => Vec::new(),
        };

        Ok(Self {
            connection,
            refresh_on_save,
            entities,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, PluginError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(PluginError::config(format!(
            "Invalid {}: expected a boolean, got '{}'",
            name, other
        ))),
    }
}
