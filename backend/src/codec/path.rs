//! Dotted-path lookup into JSON trees.

use serde_json::Value;

/// Read `path` (e.g. `customer.name`) out of `root`.
///
/// Any missing segment, or a `null` along the way, yields an empty string.
pub fn resolve(root: &Value, path: &str) -> Value {
    let mut current = root;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(next) if !next.is_null() => current = next,
            _ => return Value::String(String::new()),
        }
    }
    current.clone()
}
