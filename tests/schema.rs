//! End-to-end tests: the worked examples, the JSON Schema Test Suite
//! fixtures under `testdata/`, serialization round-trips, and recursion
//! safety.
use jsonvet::{must, Draft, ParseOptions, RootSchema, ValidationError};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

#[test]
fn basic_example() {
    let schema_data = br##"{
    "title": "Person",
    "type": "object",
    "$comment" : "sample comment",
    "properties": {
        "firstName": {
            "type": "string"
        },
        "lastName": {
            "type": "string"
        },
        "age": {
            "description": "Age in years",
            "type": "integer",
            "minimum": 0
        },
        "friends": {
            "type" : "array",
            "items" : { "title" : "REFERENCE", "$ref" : "#" }
        }
    },
    "required": ["firstName", "lastName"]
}"##;
    let schema: RootSchema = serde_json::from_slice(schema_data).unwrap();

    let valid = br#"{"firstName": "George", "lastName": "Michael"}"#;
    assert!(schema.validate_bytes(valid).unwrap().is_empty());

    let invalid_person = br#"{"firstName": "Prince"}"#;
    let errors = schema.validate_bytes(invalid_person).unwrap();
    assert_eq!(
        errors[0].to_string(),
        r#"/: {"firstName":"Prince... "lastName" value is required"#
    );

    let invalid_friend = br#"{
        "firstName": "Jay",
        "lastName": "Z",
        "friends": [{
            "firstName": "Nas"
        }]
    }"#;
    let errors = schema.validate_bytes(invalid_friend).unwrap();
    assert_eq!(
        errors[0].to_string(),
        r#"/friends/0: {"firstName":"Nas"} "lastName" value is required"#
    );
}

#[test]
fn top_level_type() {
    let object: RootSchema = serde_json::from_value(json!({
        "title": "Car",
        "type": "object",
        "properties": {"color": {"type": "string"}},
        "required": ["color"]
    }))
    .unwrap();
    assert_eq!(object.top_level_type(), "object");

    let array: RootSchema = serde_json::from_value(json!({
        "title": "Cities",
        "type": "array",
        "items": {"title": "REFERENCE", "$ref": "#"}
    }))
    .unwrap();
    assert_eq!(array.top_level_type(), "array");

    let unknown: RootSchema = serde_json::from_value(json!({
        "title": "Typeless",
        "items": {"title": "REFERENCE", "$ref": "#"}
    }))
    .unwrap();
    assert_eq!(unknown.top_level_type(), "unknown");
}

#[test]
fn must_returns_a_root_for_valid_documents() {
    let schema = must("{}");
    assert!(schema.is_valid(&json!({"anything": "goes"})));
}

#[test]
fn must_panics_with_the_json_eof_message() {
    let result = std::panic::catch_unwind(|| must(""));
    let panic = result.expect_err("expected invalid call to must to panic");
    let message = panic
        .downcast_ref::<String>()
        .cloned()
        .expect("must panics with an error string");
    assert_eq!(message, "unexpected end of JSON input");
}

#[derive(Deserialize)]
struct TestSet {
    description: String,
    schema: Value,
    tests: Vec<TestCase>,
}

#[derive(Deserialize)]
struct TestCase {
    description: String,
    data: Value,
    valid: bool,
}

fn run_suite(dir: &str, draft: Draft) {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join(dir);
    let mut files: Vec<_> = fs::read_dir(&root)
        .unwrap_or_else(|e| panic!("reading {}: {}", root.display(), e))
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "json"))
        .collect();
    files.sort();
    assert!(!files.is_empty(), "no fixtures in {}", root.display());

    let mut total = 0;
    for file in files {
        let base = file.file_name().unwrap().to_string_lossy().into_owned();
        let data = fs::read(&file).unwrap();
        let sets: Vec<TestSet> = serde_json::from_slice(&data)
            .unwrap_or_else(|e| panic!("{}: invalid fixture: {}", base, e));

        for set in sets {
            let schema =
                RootSchema::from_value_with(&set.schema, ParseOptions::new().draft(draft))
                    .unwrap_or_else(|e| panic!("{}: {}: schema failed to parse: {}", base, set.description, e));
            schema
                .fetch_remote_references()
                .unwrap_or_else(|e| panic!("{}: {}: fetching references: {}", base, set.description, e));
            for case in &set.tests {
                total += 1;
                let mut errors: Vec<ValidationError> = Vec::new();
                schema.validate("/", &case.data, &mut errors);
                assert_eq!(
                    errors.is_empty(),
                    case.valid,
                    "{}: {}: {} (errors: {:?})",
                    base,
                    set.description,
                    case.description,
                    errors.iter().map(ToString::to_string).collect::<Vec<_>>()
                );
            }
        }
    }
    assert!(total > 0);
}

#[test]
fn draft3_suite() {
    run_suite("testdata/draft3", Draft::Draft3);
}

#[test]
fn draft4_suite() {
    run_suite("testdata/draft4", Draft::Draft4);
}

#[test]
fn draft6_suite() {
    run_suite("testdata/draft6", Draft::Draft6);
}

#[test]
fn draft7_suite() {
    run_suite("testdata/draft7", Draft::Draft7);
}

#[test]
fn json_coding_round_trips() {
    let cases = [
        "testdata/coding/false.json",
        "testdata/coding/true.json",
        "testdata/coding/std.json",
        "testdata/coding/booleans.json",
        "testdata/coding/conditionals.json",
        "testdata/coding/numeric.json",
        "testdata/coding/objects.json",
        "testdata/coding/strings.json",
    ];

    for case in cases {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(case);
        let data = fs::read_to_string(&path).unwrap();
        let schema: RootSchema =
            serde_json::from_str(&data).unwrap_or_else(|e| panic!("{}: {}", case, e));
        let output = serde_json::to_string_pretty(&schema).unwrap();
        assert_eq!(data, output, "{} did not round-trip byte-identically", case);

        // And the serialized form parses back to an equivalent schema.
        let reparsed: RootSchema = serde_json::from_str(&output).unwrap();
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            serde_json::to_value(&reparsed).unwrap()
        );
    }
}

#[test]
fn validate_bytes_scenarios() {
    struct Case {
        schema: &'static str,
        input: &'static [u8],
        errors: &'static [&'static str],
    }
    let cases = [
        Case {
            schema: "true",
            input: br#""just a string yo""#,
            errors: &[],
        },
        Case {
            schema: r#"{"type":"array", "items": {"type":"string"}}"#,
            input: b"[1,false,null]",
            errors: &[
                "/0: 1 type should be string",
                "/1: false type should be string",
                "/2: type should be string",
            ],
        },
    ];

    for (index, case) in cases.iter().enumerate() {
        let schema = must(case.schema);
        let errors = schema.validate_bytes(case.input).unwrap();
        let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, case.errors, "case {}", index);
    }
}

#[test]
fn empty_schema_is_universal() {
    let empty = must("{}");
    let truthy = must("true");
    for instance in [
        json!(null),
        json!(true),
        json!(42),
        json!(4.2),
        json!("s"),
        json!([1, [2]]),
        json!({"nested": {"deep": []}}),
    ] {
        assert!(empty.is_valid(&instance));
        assert!(truthy.is_valid(&instance));
    }
}

#[test]
fn false_schema_rejects_everything_once() {
    let schema = must("false");
    for instance in [json!(null), json!(0), json!(""), json!({}), json!([])] {
        let mut errors = Vec::new();
        schema.validate("/", &instance, &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path(), "/");
    }
}

#[test]
fn unique_items_folds_numeric_representations() {
    let schema = must(r#"{"uniqueItems":true}"#);
    let errors = schema.validate_bytes(b"[1,1.0]").unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].keyword(), "uniqueItems");
}

#[test]
fn recursive_ref_validates_deep_instances() {
    // Depth is bounded by the instance, so give the test thread room.
    let handle = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            let schema = must(r##"{"type": "array", "items": {"$ref": "#"}}"##);
            let mut instance = json!([]);
            for _ in 0..10_000 {
                instance = json!([instance]);
            }
            assert!(schema.is_valid(&instance));

            let mut not_an_array = instance;
            for _ in 0..3 {
                not_an_array = json!([not_an_array]);
            }
            assert!(schema.is_valid(&not_an_array));
        })
        .unwrap();
    handle.join().unwrap();
}

#[test]
fn self_referential_schema_terminates() {
    let schema = must(r##"{"$ref": "#"}"##);
    assert!(schema.is_valid(&json!({"a": [1, 2, {"b": 3}]})));
}

#[test]
fn mutually_recursive_definitions_terminate() {
    let schema = must(
        r##"{
            "definitions": {
                "a": {"properties": {"next": {"$ref": "#/definitions/b"}}},
                "b": {"properties": {"next": {"$ref": "#/definitions/a"}}}
            },
            "$ref": "#/definitions/a"
        }"##,
    );
    assert!(schema.is_valid(&json!({"next": {"next": {"next": {}}}})));
}

#[test]
fn concurrent_validations_share_a_root() {
    let schema = std::sync::Arc::new(must(
        r##"{"type": "object", "properties": {"n": {"$ref": "#/definitions/int"}}, "definitions": {"int": {"type": "integer"}}}"##,
    ));
    let handles: Vec<_> = (0..8)
        .map(|n| {
            let schema = std::sync::Arc::clone(&schema);
            std::thread::spawn(move || {
                let instance = json!({"n": n});
                assert!(schema.is_valid(&instance));
                assert!(!schema.is_valid(&json!({"n": "nope"})));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
