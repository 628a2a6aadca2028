//! Attribute filtering and field mappings for configured entities.

use serde_json::{json, Map, Value};

use crate::config::EntityOptions;

/// Keep only the indexed attributes of `data`.
///
/// `id` and the type field are always kept so a stored document can be
/// addressed and its type read back.
pub fn filter_document(
    data: Map<String, Value>,
    attributes: &Map<String, Value>,
    type_field: &str,
) -> Map<String, Value> {
    data.into_iter()
        .filter(|(field, _)| {
            field == "id" || field == type_field || attributes.contains_key(field)
        })
        .collect()
}

/// Field mappings for the indexed attributes of every configured entity.
///
/// Attributes without a mapping `type` are only used for filtering and get no
/// explicit mapping. When two entities map the same field, the later wins.
pub fn index_properties(entities: &[EntityOptions]) -> Map<String, Value> {
    entities
        .iter()
        .filter_map(|entity| entity.indexed_attributes.as_ref())
        .flatten()
        .filter_map(|(field, mapping)| field_mapping(mapping).map(|m| (field.clone(), m)))
        .collect()
}

/// Translate one attribute mapping for the engine.
///
/// The legacy `string` type becomes `keyword` when marked `not_analyzed`, and
/// `text` otherwise; `index: "no"` becomes `index: false`.
fn field_mapping(mapping: &Value) -> Option<Value> {
    let mapping = mapping.as_object()?;
    if !mapping.contains_key("type") {
        return None;
    }
    if mapping.get("type").and_then(Value::as_str) != Some("string") {
        return Some(Value::Object(mapping.clone()));
    }

    let mut translated = mapping.clone();
    match translated.remove("index").as_ref().and_then(Value::as_str) {
        Some("not_analyzed") => {
            translated.insert("type".to_string(), json!("keyword"));
        }
        Some("no") => {
            translated.insert("type".to_string(), json!("text"));
            translated.insert("index".to_string(), json!(false));
        }
        _ => {
            translated.insert("type".to_string(), json!("text"));
        }
    }

    Some(Value::Object(translated))
}
