use crate::document::Document;
use crate::error::PbxError;
use crate::parser::{ParseOptions, Parser};
use crate::serializer::{SerializeOptions, Serializer};

/// Parses project text into a normalized [`Document`].
///
/// Accepts either a single braced root dictionary or a bare stream of
/// `key = value;` assignments.
///
/// # Errors
///
/// Returns a `PbxError` on the first grammar violation, or when nesting is
/// deeper than the default limit.
///
/// # Examples
///
/// ```rust
/// use pbxproj_core::{parse, Value};
///
/// let doc = parse("{ archiveVersion = 1; rootObject = ABC123; }").unwrap();
/// assert_eq!(doc.archive_version, Value::Number(1.0));
/// assert!(doc.objects.is_empty());
/// ```
pub fn parse(source: &str) -> Result<Document, PbxError> {
    parse_with_options(source, ParseOptions::default())
}

/// Parses project text with explicit [`ParseOptions`].
///
/// # Errors
///
/// Returns a `PbxError` if the text is malformed or nested deeper than
/// `options.max_depth`.
pub fn parse_with_options(source: &str, options: ParseOptions) -> Result<Document, PbxError> {
    let fields = Parser::with_options(source, options).parse_fields()?;
    Ok(Document::from_fields(fields))
}

/// Renders a [`Document`] back to project text.
///
/// Rendering recurses once per nested dictionary or array and has no depth
/// limit of its own. Anything produced by [`parse`] is at most
/// [`DEFAULT_MAX_DEPTH`](crate::parser::DEFAULT_MAX_DEPTH) levels deep; trees
/// built by hand, or parsed with a raised `max_depth`, are the caller's
/// responsibility to keep within the thread's stack.
///
/// # Examples
///
/// ```rust
/// use pbxproj_core::{parse, serialize, SerializeOptions};
///
/// let doc = parse("archiveVersion = 1; objectVersion = 56;").unwrap();
/// let text = serialize(&doc, &SerializeOptions::generated());
/// assert!(text.starts_with("archiveVersion = 1;\nobjectVersion = 56;"));
/// ```
#[must_use]
pub fn serialize(doc: &Document, options: &SerializeOptions) -> String {
    Serializer::new(options).serialize_document(doc)
}

/// Alias of [`serialize`].
#[must_use]
pub fn stringify(doc: &Document, options: &SerializeOptions) -> String {
    serialize(doc, options)
}

/// Legacy alias of [`serialize`].
#[deprecated(note = "use `serialize` instead")]
#[must_use]
pub fn build(doc: &Document, options: &SerializeOptions) -> String {
    serialize(doc, options)
}
