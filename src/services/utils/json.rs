//! Tolerant navigation over loosely versioned export documents.
//!
//! Export producers rename top-level keys and move usernames between fields
//! across versions. Every accessor here returns `None`/`0`/an empty slice
//! instead of failing.

use serde_json::Value;

use super::numbers;

/// One candidate location for the record array inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A named top-level property holding an array.
    Key(&'static str),
    /// The document itself is an array.
    RootArray,
    /// The first top-level property, in document order, holding an array.
    FirstArrayProperty,
}

/// Parse `text`, returning `fallback` when it is not valid JSON.
pub fn safe_parse(text: &str, fallback: Value) -> Value {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("Invalid JSON document, using fallback: {e}");
            fallback
        }
    }
}

/// Parse an optional document, absent or invalid text yields an empty object.
pub fn parse_document(text: Option<&str>) -> Value {
    match text {
        Some(text) => safe_parse(text, Value::Object(Default::default())),
        None => Value::Object(Default::default()),
    }
}

/// Evaluate `shapes` in order and return the first array that matches.
pub fn locate_array<'a>(doc: &'a Value, shapes: &[Shape]) -> Option<&'a Vec<Value>> {
    shapes.iter().find_map(|shape| match shape {
        Shape::Key(name) => doc.get(*name).and_then(Value::as_array),
        Shape::RootArray => doc.as_array(),
        Shape::FirstArrayProperty => doc
            .as_object()
            .and_then(|map| map.values().find_map(Value::as_array)),
    })
}

/// Like [`locate_array`], but an exhausted chain yields an empty slice.
pub fn records<'a>(doc: &'a Value, shapes: &[Shape]) -> &'a [Value] {
    locate_array(doc, shapes)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Owned variant of [`records`], moves the matched array out of `doc`.
pub fn into_records(doc: Value, shapes: &[Shape]) -> Vec<Value> {
    let chosen = shapes.iter().find(|shape| match shape {
        Shape::Key(name) => doc.get(*name).is_some_and(Value::is_array),
        Shape::RootArray => doc.is_array(),
        Shape::FirstArrayProperty => doc
            .as_object()
            .is_some_and(|map| map.values().any(Value::is_array)),
    });

    match (chosen, doc) {
        (Some(Shape::Key(name)), Value::Object(mut map)) => match map.remove(*name) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        (Some(Shape::RootArray), Value::Array(items)) => items,
        (Some(Shape::FirstArrayProperty), Value::Object(map)) => map
            .into_iter()
            .find_map(|(_, value)| match value {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// A non-empty string property.
pub fn str_field<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

pub fn title(item: &Value) -> Option<&str> {
    str_field(item, "title")
}

fn string_list(item: &Value) -> &[Value] {
    item.get("string_list_data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// First `value` string inside the item's `string_list_data`.
pub fn first_list_value(item: &Value) -> Option<&str> {
    string_list(item)
        .iter()
        .find_map(|entry| str_field(entry, "value"))
}

pub fn first_list_href(item: &Value) -> Option<&str> {
    string_list(item)
        .iter()
        .find_map(|entry| str_field(entry, "href"))
}

pub fn first_list_timestamp(item: &Value) -> i64 {
    string_list(item)
        .iter()
        .map(|entry| timestamp_of(entry.get("timestamp")))
        .find(|ts| *ts != 0)
        .unwrap_or(0)
}

/// Entry of `string_map_data` by label, exact match first, then ASCII case-insensitive.
fn map_entry<'a>(item: &'a Value, label: &str) -> Option<&'a Value> {
    let map = item.get("string_map_data")?.as_object()?;
    map.get(label).or_else(|| {
        map.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(label))
            .map(|(_, value)| value)
    })
}

pub fn map_value<'a>(item: &'a Value, label: &str) -> Option<&'a str> {
    map_entry(item, label).and_then(|entry| str_field(entry, "value"))
}

/// Integer `value` of a `string_map_data` entry; metric values may be strings or numbers.
pub fn map_number(item: &Value, label: &str) -> i64 {
    map_entry(item, label)
        .map(|entry| numbers::safe_parse_int(entry.get("value")))
        .unwrap_or(0)
}

/// First present label in `labels`.
pub fn map_value_any<'a>(item: &'a Value, labels: &[&str]) -> Option<&'a str> {
    labels.iter().find_map(|label| map_value(item, label))
}

pub fn map_href<'a>(item: &'a Value, label: &str) -> Option<&'a str> {
    map_entry(item, label).and_then(|entry| str_field(entry, "href"))
}

pub fn map_timestamp(item: &Value, label: &str) -> i64 {
    map_entry(item, label)
        .map(|entry| timestamp_of(entry.get("timestamp")))
        .unwrap_or(0)
}

/// First non-zero timestamp among `labels`.
pub fn map_timestamp_any(item: &Value, labels: &[&str]) -> i64 {
    labels
        .iter()
        .map(|label| map_timestamp(item, label))
        .find(|ts| *ts != 0)
        .unwrap_or(0)
}

/// Every `(label, value)` pair of `string_map_data`, in document order.
pub fn map_pairs(item: &Value) -> Vec<(String, String)> {
    let Some(map) = item.get("string_map_data").and_then(Value::as_object) else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(label, entry)| {
            let value = match entry.get("value") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => return None,
            };
            Some((label.clone(), value))
        })
        .collect()
}

/// Entry of the newer `label_values` layout by label (case-insensitive).
fn label_entry<'a>(item: &'a Value, label: &str) -> Option<&'a Value> {
    item.get("label_values")?
        .as_array()?
        .iter()
        .find(|entry| {
            entry
                .get("label")
                .and_then(Value::as_str)
                .is_some_and(|l| l.eq_ignore_ascii_case(label))
        })
}

pub fn label_value<'a>(item: &'a Value, label: &str) -> Option<&'a str> {
    let entry = label_entry(item, label)?;
    str_field(entry, "value").or_else(|| str_field(entry, "href"))
}

pub fn label_timestamp(item: &Value, label: &str) -> i64 {
    label_entry(item, label)
        .map(|entry| timestamp_of(entry.get("timestamp_value")))
        .unwrap_or(0)
}

/// Every string found under `vec[*].value` of every `label_values` entry.
pub fn label_vec_values(item: &Value) -> Vec<&str> {
    let Some(entries) = item.get("label_values").and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| entry.get("vec").and_then(Value::as_array))
        .flatten()
        .filter_map(|v| str_field(v, "value"))
        .collect()
}

/// Best-effort event time of a record across the known layouts.
pub fn event_timestamp(item: &Value) -> i64 {
    let candidates = [
        first_list_timestamp(item),
        map_timestamp_any(item, &["Time", "Timestamp", "Creation Timestamp", "Saved on"]),
        label_timestamp(item, "Time"),
        timestamp_of(item.get("timestamp")),
        timestamp_of(item.get("creation_timestamp")),
    ];
    candidates.into_iter().find(|ts| *ts != 0).unwrap_or(0)
}

/// Lower-cased username of a connection record.
///
/// Older exports keep it in `string_list_data[*].value`, newer ones in `title`.
pub fn username_of(item: &Value) -> Option<String> {
    first_list_value(item)
        .or_else(|| title(item))
        .or_else(|| label_value(item, "Username"))
        .map(|name| name.to_lowercase())
}

/// Epoch seconds from a number or numeric string, `0` when absent.
pub fn timestamp_of(value: Option<&Value>) -> i64 {
    numbers::safe_parse_int(value)
}

#[cfg(test)]
#[path = "tests/json_tests.rs"]
mod tests;
