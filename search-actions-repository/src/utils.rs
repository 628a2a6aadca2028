//! Utility functions for the search actions repository.

use url::Url;

use crate::errors::SearchError;

/// Parse a configured host into a node URL.
///
/// Hosts are commonly given as `host:port` without a scheme; those are
/// treated as plain HTTP.
///
/// # Example
///
/// ```
/// use search_actions_repository::parse_host;
///
/// let url = parse_host("localhost:9200").expect("valid host");
/// assert_eq!(url.as_str(), "http://localhost:9200/");
/// ```
pub fn parse_host(host: &str) -> Result<Url, SearchError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(SearchError::config("host must not be empty"));
    }

    let candidate = if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    };

    Url::parse(&candidate)
        .map_err(|e| SearchError::config(format!("Invalid host '{}': {}", host, e)))
}
