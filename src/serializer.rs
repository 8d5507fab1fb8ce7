//! Rendering a [`Document`] back to ASCII plist text.
//!
//! Layout rules:
//!
//! - Top-level fields come out in a fixed order: `archiveVersion`,
//!   `objectVersion`, `objects`, `rootObject`, then `classes` (when non-empty)
//!   and any other top-level fields in source order.
//! - Every entry under `objects` is its own block, optionally annotated with an
//!   inline `/* label */` comment.
//! - Arrays of single-line elements fold onto one line; anything else gets
//!   one element per line.
//! - Strings are written bare when they are safe barewords, quoted otherwise.
//!   Keys and object ids only need to be non-empty runs of bareword characters.

use crate::comments::label_for;
use crate::document::{Document, ARCHIVE_VERSION, CLASSES, OBJECTS, OBJECT_VERSION, ROOT_OBJECT};
use crate::lexer::is_bareword_char;
use crate::value::{Dictionary, Value};
use log::{debug, trace};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A caller-supplied function producing a label for an object record.
pub type LabelFn = Arc<dyn Fn(&Dictionary) -> String + Send + Sync>;

/// How object entries are annotated with comments.
#[derive(Clone, Default)]
pub enum CommentStrategy {
    /// Never emit comments.
    Strip,
    /// Label each object with [`label_for`].
    Generate,
    /// Keep the comments of the source. Comments are not retained by the
    /// parser, so this emits nothing, exactly like `Strip`.
    #[default]
    Preserve,
    /// Label each object with a custom function.
    Custom(LabelFn),
}

impl CommentStrategy {
    /// Wraps a label function.
    ///
    /// ```rust
    /// use pbxproj_core::{CommentStrategy, Value};
    ///
    /// let strategy = CommentStrategy::custom(|record| {
    ///     format!("Custom: {}", record.get("isa").and_then(Value::as_str).unwrap_or("?"))
    /// });
    /// assert!(strategy.emits_comments());
    /// ```
    pub fn custom<F>(label: F) -> Self
    where
        F: Fn(&Dictionary) -> String + Send + Sync + 'static,
    {
        CommentStrategy::Custom(Arc::new(label))
    }

    #[must_use]
    pub fn emits_comments(&self) -> bool {
        matches!(self, CommentStrategy::Generate | CommentStrategy::Custom(_))
    }

    fn label(&self, record: &Dictionary) -> Option<String> {
        match self {
            CommentStrategy::Strip | CommentStrategy::Preserve => None,
            CommentStrategy::Generate => Some(label_for(record)),
            CommentStrategy::Custom(label) => Some(label(record)),
        }
    }
}

impl fmt::Debug for CommentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentStrategy::Strip => f.write_str("Strip"),
            CommentStrategy::Generate => f.write_str("Generate"),
            CommentStrategy::Preserve => f.write_str("Preserve"),
            CommentStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl FromStr for CommentStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strip" => Ok(CommentStrategy::Strip),
            "generate" => Ok(CommentStrategy::Generate),
            "preserve" => Ok(CommentStrategy::Preserve),
            other => Err(format!(
                "unknown comment strategy '{other}' (expected strip, generate or preserve)"
            )),
        }
    }
}

/// Configuration options for serialization.
///
/// # Examples
///
/// ```rust
/// use pbxproj_core::{CommentStrategy, SerializeOptions};
///
/// let options = SerializeOptions::new()
///     .with_comment_strategy(CommentStrategy::Generate)
///     .with_indent(4);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    pub comment_strategy: CommentStrategy,
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        SerializeOptions {
            comment_strategy: CommentStrategy::default(),
            indent: 2,
        }
    }
}

impl SerializeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that never emit comments.
    #[must_use]
    pub fn stripped() -> Self {
        Self::new().with_comment_strategy(CommentStrategy::Strip)
    }

    /// Options that label every object with [`label_for`].
    #[must_use]
    pub fn generated() -> Self {
        Self::new().with_comment_strategy(CommentStrategy::Generate)
    }

    #[must_use]
    pub fn with_comment_strategy(mut self, strategy: CommentStrategy) -> Self {
        self.comment_strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// Returns true when `s` can be written without quotes and read back unchanged.
pub fn is_bare_safe(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => chars.all(is_bareword_char),
        _ => false,
    }
}

/// Writes a string either bare or quoted with `\` and `"` escaped.
pub fn quote_if_needed(s: &str) -> String {
    if is_bare_safe(s) {
        return s.to_string();
    }
    quote(s)
}

/// Writes a dictionary key or object id.
///
/// Keys are never read as numbers, so any non-empty run of bareword characters
/// can stay bare, including ids that start with a digit. A key starting with
/// `//` is quoted since it would otherwise read as a line comment.
pub fn quote_key_if_needed(key: &str) -> String {
    if !key.is_empty() && !key.starts_with("//") && key.chars().all(is_bareword_char) {
        return key.to_string();
    }
    quote(key)
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '\\' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Keeps a label from closing its comment early.
fn sanitize_label(label: &str) -> String {
    label.replace("*/", "* /")
}

pub struct Serializer<'o> {
    options: &'o SerializeOptions,
    out: Vec<String>,
}

impl<'o> Serializer<'o> {
    pub fn new(options: &'o SerializeOptions) -> Self {
        Self {
            options,
            out: Vec::new(),
        }
    }

    fn pad(&self, level: usize) -> String {
        " ".repeat(level * self.options.indent)
    }

    /// Renders one value whose first line continues an already indented line
    /// at nesting `level`.
    pub fn serialize_value(&self, value: &Value, level: usize) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => quote_if_needed(s),
            Value::Array(items) => self.serialize_array(items, level),
            Value::Dictionary(dict) => self.serialize_dictionary(dict, level),
        }
    }

    fn serialize_array(&self, items: &[Value], level: usize) -> String {
        if items.is_empty() {
            return "()".to_string();
        }
        let rendered: Vec<String> = items
            .iter()
            .map(|item| self.serialize_value(item, level + 1))
            .collect();
        if rendered.iter().all(|item| !item.contains('\n')) {
            return format!("({})", rendered.join(", "));
        }
        let inner = self.pad(level + 1);
        let lines: Vec<String> = rendered
            .iter()
            .map(|item| format!("{inner}{item}"))
            .collect();
        format!("(\n{}\n{})", lines.join(",\n"), self.pad(level))
    }

    fn serialize_dictionary(&self, dict: &Dictionary, level: usize) -> String {
        if dict.is_empty() {
            return "{}".to_string();
        }
        let inner = self.pad(level + 1);
        let lines: Vec<String> = dict
            .iter()
            .map(|(key, value)| {
                format!(
                    "{inner}{} = {};",
                    quote_key_if_needed(key),
                    self.serialize_value(value, level + 1)
                )
            })
            .collect();
        format!("{{\n{}\n{}}}", lines.join("\n"), self.pad(level))
    }

    fn assignment(&mut self, key: &str, value: &Value) {
        let line = format!("{} = {};", quote_key_if_needed(key), self.serialize_value(value, 0));
        self.out.push(line);
    }

    fn objects(&mut self, objects: &Dictionary) {
        self.out.push(format!("{OBJECTS} = {{"));
        let entry_pad = self.pad(1);
        let field_pad = self.pad(2);
        for (id, record) in objects {
            let id_text = quote_key_if_needed(id);
            let Value::Dictionary(fields) = record else {
                let value = self.serialize_value(record, 1);
                self.out.push(format!("{entry_pad}{id_text} = {value};"));
                continue;
            };
            let comment = self
                .options
                .comment_strategy
                .label(fields)
                .map(|label| format!(" /* {} */", sanitize_label(&label)))
                .unwrap_or_default();
            trace!("rendering object {id}{comment}");
            self.out.push(format!("{entry_pad}{id_text}{comment} = {{"));
            for (key, value) in fields {
                let value = self.serialize_value(value, 2);
                self.out
                    .push(format!("{field_pad}{} = {value};", quote_key_if_needed(key)));
            }
            self.out.push(format!("{entry_pad}}};"));
        }
        self.out.push("};".to_string());
    }

    /// Renders a whole document.
    pub fn serialize_document(mut self, doc: &Document) -> String {
        debug!(
            "serializing {} objects with {:?} comments",
            doc.objects.len(),
            self.options.comment_strategy
        );
        self.assignment(ARCHIVE_VERSION, &doc.archive_version);
        self.assignment(OBJECT_VERSION, &doc.object_version);
        self.objects(&doc.objects);
        self.assignment(ROOT_OBJECT, &doc.root_object);
        if !doc.classes.is_empty() {
            self.assignment(CLASSES, &Value::Dictionary(doc.classes.clone()));
        }
        for (key, value) in &doc.extra {
            self.assignment(key, value);
        }
        self.out.join("\n")
    }
}
