//! Property-based tests for the reader and writer.
//!
//! - Writing a table and reading it back yields the same table.
//! - Writing is deterministic: a second write of the re-read table is identical.

use camino::Utf8Path;
use pbxtool_model::{Object, ObjectId, Objects, Value, XcodeProject};
use proptest::prelude::*;

const ISAS: &[&str] = &[
    "PBXBuildFile",
    "PBXFileReference",
    "PBXGroup",
    "PBXNativeTarget",
    "PBXSourcesBuildPhase",
    "XCBuildConfiguration",
];

fn arb_id() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9A-F]{24}").unwrap()
}

/// Strings mixing safe tokens with quotes, spaces, comment openers and unicode.
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex(r"[A-Za-z0-9_$/:.]{1,16}").unwrap(),
        prop::string::string_regex(r#"[ -~]{0,16}"#).unwrap(),
        prop::string::string_regex("[a-z\"'\\\\\n\t/*é]{0,12}").unwrap(),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        4 => arb_text().prop_map(Value::String),
        1 => prop::collection::vec(any::<u8>(), 0..6).prop_map(Value::Data),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[A-Za-z_]{1,8}", inner, 0..4).prop_map(Value::Dict),
        ]
    })
}

fn arb_object() -> impl Strategy<Value = Object> {
    (
        prop::sample::select(ISAS),
        prop::collection::btree_map("[a-z][A-Za-z]{0,10}", arb_value(), 0..5),
    )
        .prop_map(|(isa, fields)| {
            fields
                .into_iter()
                .filter(|(k, _)| k != "isa")
                .fold(Object::new(isa), |o, (k, v)| o.with(&k, v))
        })
}

fn arb_objects() -> impl Strategy<Value = Objects> {
    prop::collection::btree_map(arb_id(), arb_object(), 1..8).prop_map(|map| {
        let mut objects = Objects::default();
        for (id, object) in map {
            objects.insert(ObjectId::new(id), object);
        }
        objects
    })
}

fn manifest_text(objects: &Objects) -> String {
    let root = objects.iter().next().map(|(id, _)| id.as_str()).unwrap_or("0");
    let mut seed = XcodeProject::parse(
        &format!(
            "{{ archiveVersion = 1; objectVersion = 56; objects = {{ }}; rootObject = {root}; }}"
        ),
        Utf8Path::new("Fuzz.xcodeproj/project.pbxproj"),
    )
    .unwrap();
    *seed.objects_mut() = objects.clone();
    seed.to_pbxproj()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn write_then_read_preserves_the_table(objects in arb_objects()) {
        let text = manifest_text(&objects);
        let reread = XcodeProject::parse(&text, Utf8Path::new("Fuzz.xcodeproj/project.pbxproj"))
            .unwrap_or_else(|e| panic!("{e}\n{text}"));
        prop_assert_eq!(reread.objects(), &objects);
    }

    #[test]
    fn writing_is_deterministic(objects in arb_objects()) {
        let text = manifest_text(&objects);
        let reread =
            XcodeProject::parse(&text, Utf8Path::new("Fuzz.xcodeproj/project.pbxproj")).unwrap();
        prop_assert_eq!(reread.to_pbxproj(), text);
    }
}
