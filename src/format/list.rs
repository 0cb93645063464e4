//! List helpers over JSON values.

use serde_json::Value;

/// Drops `None`, JSON `null` and blank strings, keeping the order of the rest.
pub fn remove_empty_entries(list: &mut Vec<Option<Value>>) {
    list.retain(|entry| match entry {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    });
}

/// Appends the elements of an array, or `items` itself when it is not an array.
pub fn push_range(target: &mut Vec<Value>, items: Value) {
    match items {
        Value::Array(items) => target.extend(items),
        item => target.push(item),
    }
}

/// Appends clones of every element of `source` to `target`.
pub fn copy_to<T: Clone>(source: &[T], target: &mut Vec<T>) {
    target.extend_from_slice(source);
}
