//! The normalized top-level shape of a project file.

use crate::value::{Dictionary, Value};
use log::warn;
use serde::{Serialize, Serializer};

pub const ARCHIVE_VERSION: &str = "archiveVersion";
pub const OBJECT_VERSION: &str = "objectVersion";
pub const OBJECTS: &str = "objects";
pub const ROOT_OBJECT: &str = "rootObject";
pub const CLASSES: &str = "classes";

/// A parsed project file. The five well-known fields are always present;
/// everything else found at the top level lives in `extra`, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub archive_version: Value,
    pub object_version: Value,
    pub objects: Dictionary,
    pub root_object: Value,
    pub classes: Dictionary,
    pub extra: Dictionary,
}

impl Document {
    /// Builds a document from the raw top-level field set, defaulting any
    /// well-known field that is missing or `Null`.
    pub fn from_fields(mut fields: Dictionary) -> Self {
        let mut take_value = |key: &str| fields.shift_remove(key).unwrap_or_default();
        let archive_version = take_value(ARCHIVE_VERSION);
        let object_version = take_value(OBJECT_VERSION);
        let root_object = take_value(ROOT_OBJECT);
        let objects = take_dictionary(&mut fields, OBJECTS);
        let classes = take_dictionary(&mut fields, CLASSES);

        Document {
            archive_version,
            object_version,
            objects,
            root_object,
            classes,
            extra: fields,
        }
    }

    /// Looks up an object record by its identifier.
    #[must_use]
    pub fn object(&self, id: &str) -> Option<&Dictionary> {
        self.objects.get(id).and_then(Value::as_dictionary)
    }

    /// Resolves `rootObject` to its record in `objects`.
    #[must_use]
    pub fn root_record(&self) -> Option<&Dictionary> {
        self.root_object.as_str().and_then(|id| self.object(id))
    }

    /// Reassembles every top-level field into one dictionary, in the order the
    /// serializer writes them: `archiveVersion`, `objectVersion`, `objects`,
    /// `rootObject`, `classes`, then the extras in source order. Unlike the
    /// serializer, `classes` is always present here.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut fields = Dictionary::with_capacity(5 + self.extra.len());
        fields.insert(ARCHIVE_VERSION.to_string(), self.archive_version.clone());
        fields.insert(OBJECT_VERSION.to_string(), self.object_version.clone());
        fields.insert(OBJECTS.to_string(), Value::Dictionary(self.objects.clone()));
        fields.insert(ROOT_OBJECT.to_string(), self.root_object.clone());
        fields.insert(CLASSES.to_string(), Value::Dictionary(self.classes.clone()));
        for (key, value) in &self.extra {
            fields.insert(key.clone(), value.clone());
        }
        Value::Dictionary(fields)
    }

    /// Serializes the document into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the document into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

fn take_dictionary(fields: &mut Dictionary, key: &str) -> Dictionary {
    match fields.shift_remove(key) {
        Some(Value::Dictionary(dict)) => dict,
        None | Some(Value::Null) => Dictionary::new(),
        Some(other) => {
            warn!(
                "top-level '{key}' is a {}, not a dictionary; replacing it with an empty one",
                other.kind_name()
            );
            Dictionary::new()
        }
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: Vec<(&str, Value)>) -> Dictionary {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_empty_fields_are_defaulted() {
        let doc = Document::from_fields(Dictionary::new());
        assert_eq!(doc, Document::default());
        assert!(doc.archive_version.is_null());
        assert!(doc.objects.is_empty());
        assert!(doc.classes.is_empty());
        assert!(doc.extra.is_empty());
    }

    #[test]
    fn test_null_containers_are_defaulted() {
        let doc = Document::from_fields(fields(vec![
            ("objects", Value::Null),
            ("classes", Value::Null),
        ]));
        assert!(doc.objects.is_empty());
        assert!(doc.classes.is_empty());
    }

    #[test]
    fn test_non_dictionary_objects_are_replaced() {
        let doc = Document::from_fields(fields(vec![("objects", Value::from("oops"))]));
        assert!(doc.objects.is_empty());
        assert!(doc.extra.is_empty());
    }

    #[test]
    fn test_zero_versions_survive() {
        let doc = Document::from_fields(fields(vec![
            ("archiveVersion", Value::from(0)),
            ("objectVersion", Value::from("also_invalid")),
        ]));
        assert_eq!(doc.archive_version, Value::Number(0.0));
        assert_eq!(doc.object_version, Value::from("also_invalid"));
    }

    #[test]
    fn test_extra_fields_keep_order() {
        let doc = Document::from_fields(fields(vec![
            ("zeta", Value::from(1)),
            ("archiveVersion", Value::from(1)),
            ("alpha", Value::from(2)),
        ]));
        let keys: Vec<_> = doc.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn test_root_record() {
        let mut project = Dictionary::new();
        project.insert("isa".to_string(), Value::from("PBXProject"));
        let doc = Document::from_fields(fields(vec![
            ("objects", Value::from(fields(vec![("P1", Value::from(project.clone()))]))),
            ("rootObject", Value::from("P1")),
        ]));
        assert_eq!(doc.root_record(), Some(&project));
        assert_eq!(doc.object("missing"), None);
    }

    #[test]
    fn test_to_json() {
        let doc = Document::from_fields(fields(vec![
            ("archiveVersion", Value::from(1)),
            ("rootObject", Value::from("ABC")),
        ]));
        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "archiveVersion": 1.0,
                "classes": {},
                "objectVersion": null,
                "objects": {},
                "rootObject": "ABC",
            })
        );
    }

    #[test]
    fn test_to_value_follows_serializer_order() {
        let doc = Document::from_fields(fields(vec![
            ("tool", Value::from("x")),
            ("rootObject", Value::from("ABC")),
            ("classes", Value::Dictionary(Dictionary::new())),
            ("objects", Value::Dictionary(Dictionary::new())),
            ("archiveVersion", Value::from(1)),
        ]));
        let value = doc.to_value();
        let keys: Vec<&str> = value
            .as_dictionary()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            ["archiveVersion", "objectVersion", "objects", "rootObject", "classes", "tool"]
        );
    }

    #[test]
    fn test_to_yaml() {
        let doc = Document::from_fields(fields(vec![("rootObject", Value::from("ABC"))]));
        let yaml = doc.to_yaml().unwrap();
        assert!(yaml.contains("rootObject: ABC"));
    }
}
