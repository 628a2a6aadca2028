//! Connection configuration for the search engine client.
//!
//! Callers supply a partial [`ConnectionOptions`]. Defaults are applied one key
//! at a time: an omitted key takes its default and a supplied key overrides only
//! itself. The merged [`ConnectionConfig`] is what the client is built from.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::errors::SearchError;
use crate::utils;

/// Default search engine node.
pub const DEFAULT_HOST: &str = "localhost:9200";

/// Default interval between cluster sniffs, in milliseconds.
pub const DEFAULT_SNIFF_INTERVAL_MS: u64 = 300_000;

/// Sniff the cluster on start unless told otherwise.
pub const DEFAULT_SNIFF_ON_START: bool = true;

/// Default client log level.
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Error;

/// Default document field carrying the entity kind / document type.
pub const DEFAULT_TYPE_FIELD: &str = "entity$";

/// Log level for the search engine client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Error,
    #[serde(alias = "warn")]
    Warning,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The equivalent `tracing` filter directive.
    pub fn as_directive(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_directive())
    }
}

impl FromStr for LogLevel {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(SearchError::config(format!("Unknown log level '{}'", other))),
        }
    }
}

/// Connection options as supplied by the caller.
///
/// Every key is optional. Keys this crate does not know about are kept in
/// `extra` so engine-specific settings survive the round trip.
///
/// # Example
///
/// ```
/// use search_actions_repository::ConnectionOptions;
///
/// let config = ConnectionOptions::default()
///     .with_host("search.internal:9200")
///     .with_defaults();
///
/// assert_eq!(config.host, "search.internal:9200");
/// assert!(config.sniff_on_start);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Sniff interval in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sniff_interval: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sniff_on_start: Option<bool>,

    #[serde(alias = "logLevel", skip_serializing_if = "Option::is_none")]
    pub log: Option<LogLevel>,

    /// Default target index for actions that do not name one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    /// Document field that carries the document type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_field: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConnectionOptions {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_sniff_interval_ms(mut self, interval_ms: u64) -> Self {
        self.sniff_interval = Some(interval_ms);
        self
    }

    pub fn with_sniff_on_start(mut self, sniff_on_start: bool) -> Self {
        self.sniff_on_start = Some(sniff_on_start);
        self
    }

    pub fn with_log_level(mut self, log: LogLevel) -> Self {
        self.log = Some(log);
        self
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn with_type_field(mut self, type_field: impl Into<String>) -> Self {
        self.type_field = Some(type_field.into());
        self
    }

    /// Merge these options over the built-in defaults, key by key.
    pub fn with_defaults(self) -> ConnectionConfig {
        ConnectionConfig {
            host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            sniff_interval: Duration::from_millis(
                self.sniff_interval.unwrap_or(DEFAULT_SNIFF_INTERVAL_MS),
            ),
            sniff_on_start: self.sniff_on_start.unwrap_or(DEFAULT_SNIFF_ON_START),
            log: self.log.unwrap_or(DEFAULT_LOG_LEVEL),
            index: self.index,
            type_field: self
                .type_field
                .unwrap_or_else(|| DEFAULT_TYPE_FIELD.to_string()),
            extra: self.extra,
        }
    }
}

/// Fully resolved connection configuration.
///
/// Immutable once the client has been built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionConfig {
    pub host: String,
    pub sniff_interval: Duration,
    pub sniff_on_start: bool,
    pub log: LogLevel,
    pub index: Option<String>,
    pub type_field: String,
    pub extra: Map<String, Value>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionOptions::default().with_defaults()
    }
}

impl ConnectionConfig {
    /// The node URL for `host`.
    pub fn url(&self) -> Result<Url, SearchError> {
        utils::parse_host(&self.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_when_nothing_supplied() {
        let config = ConnectionOptions::default().with_defaults();

        assert_eq!(config.host, "localhost:9200");
        assert_eq!(config.sniff_interval, Duration::from_millis(300_000));
        assert!(config.sniff_on_start);
        assert_eq!(config.log, LogLevel::Error);
        assert_eq!(config.type_field, "entity$");
        assert!(config.index.is_none());
    }

    #[test]
    fn test_supplied_key_overrides_only_itself() {
        let config = ConnectionOptions::default()
            .with_sniff_on_start(false)
            .with_defaults();

        assert!(!config.sniff_on_start);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(
            config.sniff_interval,
            Duration::from_millis(DEFAULT_SNIFF_INTERVAL_MS)
        );
        assert_eq!(config.log, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_every_combination_merges_per_key() {
        for mask in 0u8..16 {
            let mut options = ConnectionOptions::default();
            if mask & 1 != 0 {
                options = options.with_host("es:9201");
            }
            if mask & 2 != 0 {
                options = options.with_sniff_interval_ms(1_000);
            }
            if mask & 4 != 0 {
                options = options.with_sniff_on_start(false);
            }
            if mask & 8 != 0 {
                options = options.with_log_level(LogLevel::Trace);
            }

            let config = options.with_defaults();

            let expected_host = if mask & 1 != 0 { "es:9201" } else { DEFAULT_HOST };
            let expected_interval = if mask & 2 != 0 {
                1_000
            } else {
                DEFAULT_SNIFF_INTERVAL_MS
            };
            let expected_sniff = mask & 4 == 0;
            let expected_log = if mask & 8 != 0 {
                LogLevel::Trace
            } else {
                DEFAULT_LOG_LEVEL
            };

            assert_eq!(config.host, expected_host, "mask {}", mask);
            assert_eq!(
                config.sniff_interval,
                Duration::from_millis(expected_interval),
                "mask {}",
                mask
            );
            assert_eq!(config.sniff_on_start, expected_sniff, "mask {}", mask);
            assert_eq!(config.log, expected_log, "mask {}", mask);
        }
    }

    #[test]
    fn test_deserialize_camel_case_with_extras() {
        let options: ConnectionOptions = serde_json::from_value(json!({
            "host": "es:9200",
            "sniffInterval": 5000,
            "log": "warning",
            "index": "seneca-test-entity",
            "requestTimeout": 3000
        }))
        .unwrap();

        assert_eq!(options.host.as_deref(), Some("es:9200"));
        assert_eq!(options.sniff_interval, Some(5000));
        assert!(options.sniff_on_start.is_none());
        assert_eq!(options.log, Some(LogLevel::Warning));
        assert_eq!(options.index.as_deref(), Some("seneca-test-entity"));
        assert_eq!(options.extra.get("requestTimeout"), Some(&json!(3000)));

        let config = options.with_defaults();
        assert!(config.sniff_on_start);
        assert_eq!(config.extra.get("requestTimeout"), Some(&json!(3000)));
    }

    #[test]
    fn test_log_level_alias() {
        let options: ConnectionOptions =
            serde_json::from_value(json!({"logLevel": "debug"})).unwrap();
        assert_eq!(options.log, Some(LogLevel::Debug));
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert!(matches!(
            "loud".parse::<LogLevel>().unwrap_err(),
            SearchError::ConfigError(_)
        ));
    }

    #[test]
    fn test_config_url() {
        let config = ConnectionConfig::default();
        assert_eq!(config.url().unwrap().as_str(), "http://localhost:9200/");
    }
}
