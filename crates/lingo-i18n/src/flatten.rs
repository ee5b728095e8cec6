//! Flattening of nested locale definitions into dot-path keys

use serde_json::Value;
use std::collections::BTreeMap;

/// Separator between path segments of a flattened resource key
pub const KEY_SEPARATOR: &str = ".";

/// Flatten nested definitions into `a.b.c` keys with stringified leaves.
///
/// Array elements are addressed by index (`items.0`). `null` leaves become
/// the text `null`, numbers and booleans their JSON text. A scalar root has
/// no key and yields an empty map.
///
/// ```rust
/// use lingo_i18n::flatten_definitions;
///
/// let flat = flatten_definitions(&serde_json::json!({
///     "menu": { "title": "Menu", "items": ["Start", "Help"] },
///     "limit": 5,
/// }));
/// assert_eq!(flat.get("menu.title").map(String::as_str), Some("Menu"));
/// assert_eq!(flat.get("menu.items.1").map(String::as_str), Some("Help"));
/// assert_eq!(flat.get("limit").map(String::as_str), Some("5"));
/// ```
#[must_use]
pub fn flatten_definitions(definitions: &Value) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();
    flatten_value(definitions, None, &mut result);
    result
}

fn flatten_value(value: &Value, prefix: Option<&str>, result: &mut BTreeMap<String, String>) {
    let join = |segment: &str| {
        prefix.map_or_else(
            || segment.to_string(),
            |p| format!("{p}{KEY_SEPARATOR}{segment}"),
        )
    };

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_value(child, Some(&join(key)), result);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_value(child, Some(&join(&index.to_string())), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        scalar => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), scalar.to_string());
            }
        }
    }
}
