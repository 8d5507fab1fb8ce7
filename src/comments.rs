use crate::value::{Dictionary, Value};

/// Fields consulted for a record's label, highest priority first.
const LABEL_FIELDS: [&str; 3] = ["path", "name", "isa"];

/// Label used when a record has none of [`LABEL_FIELDS`].
pub const FALLBACK_LABEL: &str = "Object";

/// Derives a human readable label for an object record: its `path`, else its
/// `name`, else its `isa`, else `"Object"`.
///
/// A field counts as missing when it is absent, `null`, an empty string, zero,
/// or a container. Never fails.
///
/// # Examples
///
/// ```rust
/// use pbxproj_core::{label_for, Dictionary, Value};
///
/// let mut record = Dictionary::new();
/// record.insert("isa".to_string(), Value::from("PBXFileReference"));
/// record.insert("path".to_string(), Value::from("AppDelegate.swift"));
/// assert_eq!(label_for(&record), "AppDelegate.swift");
/// ```
pub fn label_for(record: &Dictionary) -> String {
    LABEL_FIELDS
        .iter()
        .find_map(|field| record.get(*field).and_then(label_text))
        .unwrap_or_else(|| FALLBACK_LABEL.to_string())
}

fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if *n != 0.0 => Some(n.to_string()),
        _ => None,
    }
}
