//! Property-based tests for the parse/serialize round trip.
//!
//! Generated documents are built from nested dictionaries, arrays, strings and
//! numbers. Strings that look numeric are kept out of the strict round-trip
//! properties because the parser deliberately reads them back as numbers.

use pbxproj_core::serializer::{quote_if_needed, quote_key_if_needed, Serializer};
use pbxproj_core::value::looks_numeric;
use pbxproj_core::{
    parse, parse_with_options, serialize, Dictionary, Document, ParseOptions, SerializeOptions, Value,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_identifier() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z_][A-Za-z0-9_.$/-]{0,12}").unwrap()
}

/// Any string, bare-safe or not, including quotes, backslashes and newlines.
fn arb_any_string() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_identifier(),
        "[ -~]{0,16}",
        "[a-z \"\\\\\n\t]{0,12}",
        "\\PC{0,8}",
    ]
}

fn arb_string() -> impl Strategy<Value = String> {
    arb_any_string().prop_filter("numeric-looking strings reparse as numbers", |s| !looks_numeric(s))
}

fn arb_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-100_000i32..100_000).prop_map(f64::from),
        (-1.0e9f64..1.0e9),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        arb_number().prop_map(Value::Number),
        arb_string().prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_any_string(), inner), 0..6)
                .prop_map(|pairs| Value::Dictionary(pairs.into_iter().collect())),
        ]
    })
}

fn arb_record() -> impl Strategy<Value = Dictionary> {
    prop::collection::vec((arb_identifier(), arb_value()), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn arb_document() -> impl Strategy<Value = Document> {
    (
        arb_number(),
        arb_number(),
        prop::collection::vec((arb_any_string(), arb_record()), 0..6),
        arb_string(),
    )
        .prop_map(|(archive, object, objects, root)| Document {
            archive_version: Value::Number(archive),
            object_version: Value::Number(object),
            objects: objects
                .into_iter()
                .map(|(id, record)| (id, Value::Dictionary(record)))
                .collect(),
            root_object: Value::String(root),
            ..Document::default()
        })
}

/// Like `arb_value` but also produces nulls and numeric-looking strings.
fn arb_loose_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        arb_number().prop_map(Value::Number),
        arb_any_string().prop_map(Value::String),
        "-?[0-9]{1,4}(\\.[0-9]{1,3})?".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec((arb_identifier(), inner), 0..5)
                .prop_map(|pairs| Value::Dictionary(pairs.into_iter().collect())),
        ]
    })
}

fn arb_loose_document() -> impl Strategy<Value = Document> {
    (
        arb_loose_value(),
        arb_loose_value(),
        prop::collection::vec((arb_identifier(), arb_loose_value()), 0..5),
        arb_loose_value(),
        prop::collection::vec(("x_[a-z]{1,6}", arb_loose_value()), 0..3),
    )
        .prop_map(|(archive, object, objects, root, extra)| Document {
            archive_version: archive,
            object_version: object,
            objects: objects.into_iter().collect(),
            root_object: root,
            classes: Dictionary::new(),
            extra: extra.into_iter().collect(),
        })
}

fn matches_bareword_shape(s: &str) -> bool {
    let mut chars = s.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    first_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || "_.$/-".contains(c))
}

fn render(value: &Value) -> String {
    Serializer::new(&SerializeOptions::stripped()).serialize_value(value, 0)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_round_trip(doc in arb_document()) {
        let text = serialize(&doc, &SerializeOptions::stripped());
        let reparsed = parse(&text).map_err(|e| TestCaseError::fail(format!("{e}\n{text}")))?;
        prop_assert_eq!(&reparsed.archive_version, &doc.archive_version);
        prop_assert_eq!(&reparsed.object_version, &doc.object_version);
        prop_assert_eq!(&reparsed.objects, &doc.objects);
        prop_assert_eq!(&reparsed.root_object, &doc.root_object);
    }

    #[test]
    fn prop_round_trip_with_generated_comments(doc in arb_document()) {
        let text = serialize(&doc, &SerializeOptions::generated());
        let reparsed = parse(&text).map_err(|e| TestCaseError::fail(format!("{e}\n{text}")))?;
        prop_assert_eq!(&reparsed.objects, &doc.objects);
    }

    #[test]
    fn prop_serialize_is_idempotent(doc in arb_loose_document()) {
        let options = SerializeOptions::stripped();
        let first = serialize(&parse(&serialize(&doc, &options)).unwrap(), &options);
        let second = serialize(&parse(&first).unwrap(), &options);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_quoting_law(s in arb_any_string()) {
        let rendered = quote_if_needed(&s);
        let bare = !rendered.starts_with('"');
        prop_assert_eq!(bare, matches_bareword_shape(&s));
        if bare {
            prop_assert_eq!(&rendered, &s);
        }

        let options = ParseOptions::new().with_coerce_quoted_numbers(false);
        let doc = parse_with_options(&format!("v = {rendered};"), options).unwrap();
        prop_assert_eq!(doc.extra.get("v"), Some(&Value::String(s)));
    }

    #[test]
    fn prop_keys_round_trip(key in prop_oneof![arb_any_string(), "[0-9A-F]{24}", "[/a-z0-9.-]{1,8}"]) {
        let rendered = quote_key_if_needed(&key);
        let doc = parse(&format!("x = {{ {rendered} = 1; }};")).unwrap();
        let inner = doc.extra.get("x").and_then(Value::as_dictionary).unwrap();
        prop_assert_eq!(inner.keys().collect::<Vec<_>>(), vec![&key]);
    }

    #[test]
    fn prop_scalar_arrays_fold_onto_one_line(
        items in prop::collection::vec(
            prop_oneof![
                arb_number().prop_map(Value::Number),
                arb_identifier().prop_map(Value::String),
            ],
            1..8,
        )
    ) {
        let text = render(&Value::Array(items.clone()));
        prop_assert!(!text.contains('\n'));
        let expected: Vec<String> = items.iter().map(render).collect();
        prop_assert_eq!(text, format!("({})", expected.join(", ")));
    }

    #[test]
    fn prop_arrays_with_dictionaries_unfold(
        before in prop::collection::vec(arb_identifier().prop_map(Value::String), 0..3),
        pairs in prop::collection::vec((arb_identifier(), arb_identifier()), 1..5),
    ) {
        let record: Dictionary = pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        let mut items = before;
        items.push(Value::Dictionary(record));
        let text = render(&Value::Array(items.clone()));
        prop_assert!(text.starts_with("(\n"));
        prop_assert!(text.ends_with("\n)"));
        let element_lines = text.lines().filter(|line| line.starts_with("  ") && !line.starts_with("   ")).count();
        // every element starts on its own line at one level of indent; the
        // closing brace of the dictionary also sits at that level
        prop_assert_eq!(element_lines, items.len() + 1);
    }
}
