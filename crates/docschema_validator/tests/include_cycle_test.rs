//! Tests for named schema references.
//!
//! Named schemas may refer to themselves or to each other. These tests make
//! sure matching terminates on recursive schemas, follows the document as
//! deep as it goes, and still reports divergence at any depth.

use docschema_core::{
    DocumentValidator, FailureKind, Schema, SchemaBuilder, ValidationContext, Validator, ValidatorBuilder,
    ValidatorKind, Value,
};
use docschema_validator::SchemaValidator;
use pretty_assertions::assert_eq;

fn doc(pairs: Vec<(&str, Value)>) -> Value {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn include(name: &str, optional: bool) -> Validator {
    ValidatorBuilder::new(ValidatorKind::Include)
        .include(name)
        .optional(optional)
        .build()
        .unwrap()
}

fn map_of(fields: Vec<(&str, Validator)>) -> Validator {
    fields
        .into_iter()
        .fold(ValidatorBuilder::new(ValidatorKind::Map), |b, (name, v)| {
            b.field(name, v)
        })
        .build()
        .unwrap()
}

/// `A = {name: str, b: include(B)?}`, `B = {a: include(A)?}`; root is `{a: include(A)}`.
fn mutual_schema() -> Schema {
    let string = ValidatorBuilder::new(ValidatorKind::String).build().unwrap();
    SchemaBuilder::new()
        .field("a", include("A", false))
        .include("A", map_of(vec![("name", string), ("b", include("B", true))]))
        .include("B", map_of(vec![("a", include("A", true))]))
        .build()
        .unwrap()
}

/// Builds `{a: {name, b: {a: {name, b: ...}}}}` with `levels` A-nodes.
fn nested(levels: usize, leaf: Value) -> Value {
    let mut current = leaf;
    for level in (0..levels).rev() {
        let b = doc(vec![("a", current)]);
        current = doc(vec![("name", Value::from(format!("level{}", level))), ("b", b)]);
    }
    current
}

#[test]
fn test_mutual_recursion_matches_nesting() {
    let schema = mutual_schema();
    let leaf = doc(vec![("name", Value::from("leaf"))]);
    let document = doc(vec![("a", nested(10, leaf))]);

    let report = SchemaValidator::new().validate_with_report(
        &schema,
        &document,
        &ValidationContext::new(),
    );
    assert!(report.passed, "unexpected failures: {:?}", report.failures);
    assert_eq!(report.stats.includes_resolved, 21);
}

#[test]
fn test_mutual_recursion_rejects_divergence_deep_down() {
    let schema = mutual_schema();
    // the innermost A lacks `name` and carries an undeclared key
    let leaf = doc(vec![("nickname", Value::from("leaf"))]);
    let document = doc(vec![("a", nested(4, leaf))]);

    let failures =
        SchemaValidator::new().validate(&schema, &document, &ValidationContext::new());
    let rendered: Vec<_> = failures.iter().map(|f| f.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "a.b.a.b.a.b.a.b.a.name: Required field missing",
            "a.b.a.b.a.b.a.b.a.nickname: Unexpected element",
        ]
    );
}

#[test]
fn test_mutual_recursion_rejects_wrong_type_midway() {
    let schema = mutual_schema();
    let mut document = nested(3, doc(vec![("name", Value::from("leaf"))]));
    if let Value::Map(map) = &mut document {
        map.insert("b".to_string(), Value::from("not a map"));
    }
    let document = doc(vec![("a", document)]);

    let failures =
        SchemaValidator::new().validate(&schema, &document, &ValidationContext::new());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path.to_string(), "a.b");
    assert_eq!(failures[0].validator_tag, "include");
    assert_eq!(failures[0].kind, FailureKind::TypeMismatch);
}

#[test]
fn test_include_loop_on_same_value_terminates() {
    // A and B only defer to each other and never consume structure
    let schema = SchemaBuilder::new()
        .field("x", include("A", false))
        .include("A", include("B", false))
        .include("B", include("A", false))
        .build()
        .unwrap();

    let document = doc(vec![("x", doc(vec![]))]);
    let failures =
        SchemaValidator::new().validate(&schema, &document, &ValidationContext::new());
    assert!(failures.is_empty());

    let document = doc(vec![("x", Value::Int(1))]);
    let failures =
        SchemaValidator::new().validate(&schema, &document, &ValidationContext::new());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].reason, "'1' is not a include.");
}

#[test]
fn test_self_recursive_tree() {
    let children = ValidatorBuilder::new(ValidatorKind::List)
        .child(include("node", false))
        .optional(true)
        .build()
        .unwrap();
    let node = map_of(vec![
        ("value", ValidatorBuilder::new(ValidatorKind::Integer).build().unwrap()),
        ("children", children),
    ]);
    let schema = SchemaBuilder::new()
        .field("root", include("node", false))
        .include("node", node)
        .build()
        .unwrap();

    let leaf = |v: i64| doc(vec![("value", Value::Int(v))]);
    let tree = doc(vec![
        ("value", Value::Int(1)),
        (
            "children",
            Value::List(vec![
                leaf(2),
                doc(vec![
                    ("value", Value::Int(3)),
                    ("children", Value::List(vec![leaf(4), doc(vec![("value", Value::from("five"))])])),
                ]),
            ]),
        ),
    ]);

    let failures = SchemaValidator::new().validate(
        &schema,
        &doc(vec![("root", tree)]),
        &ValidationContext::new(),
    );
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path.to_string(), "root.children.1.children.1.value");
}

#[test]
fn test_include_strictness_override() {
    let person = map_of(vec![(
        "name",
        ValidatorBuilder::new(ValidatorKind::String).build().unwrap(),
    )]);
    let lenient_include = ValidatorBuilder::new(ValidatorKind::Include)
        .include("person")
        .strict(false)
        .build()
        .unwrap();
    let schema = SchemaBuilder::new()
        .field("owner", lenient_include)
        .field("editor", include("person", false))
        .include("person", person)
        .build()
        .unwrap();

    let person_doc = || doc(vec![("name", Value::from("x")), ("age", Value::Int(3))]);
    let document = doc(vec![("owner", person_doc()), ("editor", person_doc())]);

    let failures =
        SchemaValidator::new().validate(&schema, &document, &ValidationContext::new());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path.to_string(), "editor.age");
}

#[test]
fn test_deep_recursion_bounded_by_depth_limit() {
    let schema = mutual_schema();
    let document = doc(vec![("a", nested(50, doc(vec![("name", Value::from("leaf"))])))]);

    let context = ValidationContext::new().with_max_depth(10);
    let failures = SchemaValidator::new().validate(&schema, &document, &context);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind, FailureKind::DepthExceeded);
}
