use serde_json::{Map, Value};

/// Reads a dotted path. Missing branches and non-object intermediates read
/// as `None`.
pub(crate) fn get<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    match path.split_once('.') {
        None => map.get(path),
        Some((head, rest)) => match map.get(head)? {
            Value::Object(child) => get(child, rest),
            _ => None,
        },
    }
}

/// Writes a dotted path, creating intermediate objects as needed.
pub(crate) fn set(map: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = map
                .entry(head)
                .and_modify(|child| {
                    if !child.is_object() {
                        *child = Value::Object(Map::new());
                    }
                })
                .or_insert_with(|| Value::Object(Map::new()));

            if let Value::Object(child) = child {
                set(child, rest, value);
            }
        }
    }
}

/// Removes a dotted path, returning the value that was there.
pub(crate) fn remove(map: &mut Map<String, Value>, path: &str) -> Option<Value> {
    match path.split_once('.') {
        None => map.remove(path),
        Some((head, rest)) => match map.get_mut(head)? {
            Value::Object(child) => remove(child, rest),
            _ => None,
        },
    }
}
