//! Document type resolution.
//!
//! The core contract is an explicit type. As a convenience, a payload saved by
//! an entity layer may carry its kind in a designated field (`entity$` by
//! default), which is used when no explicit type is given.

use serde_json::{Map, Value};

/// Resolve the document type for a save.
///
/// A non-empty explicit type wins. Otherwise the string value of `kind_field`
/// in `data` is used. Returns `None` when neither is available.
///
/// # Example
///
/// ```
/// use search_actions::adapter::entity_kind::resolve_type;
/// use serde_json::json;
///
/// let data = json!({"entity$": "-/-/foo"});
/// let data = data.as_object().unwrap();
///
/// assert_eq!(resolve_type(Some("bar"), data, "entity$").as_deref(), Some("bar"));
/// assert_eq!(resolve_type(None, data, "entity$").as_deref(), Some("-/-/foo"));
/// assert_eq!(resolve_type(None, data, "kind"), None);
/// ```
pub fn resolve_type(
    explicit: Option<&str>,
    data: &Map<String, Value>,
    kind_field: &str,
) -> Option<String> {
    if let Some(doc_type) = explicit.filter(|t| !t.is_empty()) {
        return Some(doc_type.to_string());
    }

    match data.get(kind_field) {
        Some(Value::String(kind)) if !kind.is_empty() => Some(kind.clone()),
        _ => None,
    }
}
