//! Behavioural properties of the matching engine.
//!
//! Each test pins one observable guarantee of a validation run: ordering
//! and determinism of failures, disambiguation of overlapping native kinds,
//! constraint composition, map strictness and list union semantics.

use chrono::NaiveDate;
use docschema_core::{
    FailureKind, Path, Schema, SchemaBuilder, ValidationContext, Validator, ValidatorBuilder,
    ValidatorKind, Value,
};
use docschema_validator::SchemaValidator;
use pretty_assertions::assert_eq;

fn scalar(kind: ValidatorKind) -> Validator {
    ValidatorBuilder::new(kind).build().unwrap()
}

fn doc(pairs: Vec<(&str, Value)>) -> Value {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// Wraps a validator in a single-field schema under `value`.
fn single(validator: Validator) -> Schema {
    SchemaBuilder::new().field("value", validator).build().unwrap()
}

fn check(schema: &Schema, value: Value) -> Vec<docschema_core::Failure> {
    SchemaValidator::new().validate(schema, &doc(vec![("value", value)]), &ValidationContext::new())
}

#[test]
fn test_validation_is_deterministic() {
    let schema = SchemaBuilder::new()
        .field("a", scalar(ValidatorKind::Integer))
        .field(
            "b",
            ValidatorBuilder::new(ValidatorKind::List)
                .child(scalar(ValidatorKind::String))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let document = doc(vec![
        ("a", Value::Bool(true)),
        ("b", Value::from(vec![Value::Int(1), Value::from("x"), Value::Float(2.5)])),
        ("c", Value::Null),
        ("d", Value::Int(4)),
    ]);

    let validator = SchemaValidator::new();
    let context = ValidationContext::new();
    let first = validator.validate(&schema, &document, &context);
    for _ in 0..5 {
        assert_eq!(validator.validate(&schema, &document, &context), first);
    }

    let paths: Vec<_> = first.iter().map(|f| f.path.to_string()).collect();
    assert_eq!(paths, vec!["a", "b.0", "b.2", "c", "d"]);
}

#[test]
fn test_passing_document_stays_passing() {
    let schema = SchemaBuilder::new()
        .field("name", scalar(ValidatorKind::String))
        .build()
        .unwrap();
    let document = doc(vec![("name", Value::from("x"))]);
    let snapshot = document.clone();

    let validator = SchemaValidator::new();
    let context = ValidationContext::new();
    assert!(validator.validate(&schema, &document, &context).is_empty());
    assert!(validator.validate(&schema, &document, &context).is_empty());
    assert_eq!(document, snapshot);
}

#[test]
fn test_boolean_fails_integer_and_number() {
    for kind in [ValidatorKind::Integer, ValidatorKind::Number] {
        let failures = check(&single(scalar(kind)), Value::Bool(true));
        assert_eq!(failures.len(), 1, "bool accepted by {}", kind);
        assert_eq!(failures[0].kind, FailureKind::TypeMismatch);
    }

    assert!(check(&single(scalar(ValidatorKind::Boolean)), Value::Bool(false)).is_empty());
    assert_eq!(
        check(&single(scalar(ValidatorKind::Boolean)), Value::Int(1)).len(),
        1
    );
}

#[test]
fn test_string_fails_list() {
    let list = ValidatorBuilder::new(ValidatorKind::List)
        .child(scalar(ValidatorKind::String))
        .build()
        .unwrap();

    let failures = check(&single(list), Value::from("abc"));
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind, FailureKind::TypeMismatch);
    assert_eq!(failures[0].reason, "'abc' is not a list.");
}

#[test]
fn test_day_and_timestamp_checked_separately() {
    let date = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
    let ts = date.and_hms_opt(8, 30, 0).unwrap();

    let day = single(scalar(ValidatorKind::Day));
    let timestamp = single(scalar(ValidatorKind::Timestamp));

    assert!(check(&day, Value::Date(date)).is_empty());
    assert_eq!(check(&day, Value::Timestamp(ts)).len(), 1);
    assert!(check(&timestamp, Value::Timestamp(ts)).is_empty());
    assert_eq!(check(&timestamp, Value::Date(date)).len(), 1);
}

#[test]
fn test_enum_membership() {
    let schema = single(
        ValidatorBuilder::new(ValidatorKind::Enum)
            .members(["a", "b"])
            .build()
            .unwrap(),
    );

    assert!(check(&schema, Value::from("a")).is_empty());
    assert!(check(&schema, Value::from("b")).is_empty());

    let failures = check(&schema, Value::from("c"));
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind, FailureKind::NotInEnum);
    assert!(
        failures[0].reason.contains("(\"a\", \"b\")"),
        "reason should list the members: {}",
        failures[0].reason
    );
}

#[test]
fn test_integer_bounds_compose() {
    let schema = single(
        ValidatorBuilder::new(ValidatorKind::Integer)
            .min(1)
            .max(10)
            .build()
            .unwrap(),
    );

    let below = check(&schema, Value::Int(0));
    assert_eq!(below.len(), 1);
    assert_eq!(below[0].kind, FailureKind::ConstraintViolation);
    assert_eq!(below[0].reason, "0 is less than 1");

    let above = check(&schema, Value::Int(11));
    assert_eq!(above.len(), 1);
    assert_eq!(above[0].reason, "11 is greater than 10");

    assert!(check(&schema, Value::Int(5)).is_empty());
}

#[test]
fn test_map_strictness() {
    let schema = SchemaBuilder::new()
        .field("name", scalar(ValidatorKind::String))
        .field(
            "age",
            ValidatorBuilder::new(ValidatorKind::Integer)
                .optional(true)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let validator = SchemaValidator::new();
    let strict = ValidationContext::new();
    let lenient = ValidationContext::new().with_strict(false);

    let ok = doc(vec![("name", Value::from("x"))]);
    assert!(validator.validate(&schema, &ok, &strict).is_empty());

    let empty = doc(vec![]);
    let failures = validator.validate(&schema, &empty, &strict);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, Path::root().key("name"));
    assert_eq!(failures[0].kind, FailureKind::MissingField);

    let extra = doc(vec![("name", Value::from("x")), ("extra", Value::Int(1))]);
    let failures = validator.validate(&schema, &extra, &strict);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind, FailureKind::UnknownKey);
    assert_eq!(failures[0].path, Path::root().key("extra"));
    assert!(validator.validate(&schema, &extra, &lenient).is_empty());
}

#[test]
fn test_nested_map_override_beats_context() {
    let inner = ValidatorBuilder::new(ValidatorKind::Map)
        .field("id", scalar(ValidatorKind::Integer))
        .strict(true)
        .build()
        .unwrap();
    let schema = SchemaBuilder::new().field("inner", inner).build().unwrap();

    let document = doc(vec![(
        "inner",
        doc(vec![("id", Value::Int(1)), ("other", Value::Int(2))]),
    )]);
    let lenient = ValidationContext::new().with_strict(false);
    let failures = SchemaValidator::new().validate(&schema, &document, &lenient);

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path.to_string(), "inner.other");
}

#[test]
fn test_list_union() {
    let schema = single(
        ValidatorBuilder::new(ValidatorKind::List)
            .child(scalar(ValidatorKind::String))
            .child(scalar(ValidatorKind::Integer))
            .build()
            .unwrap(),
    );

    let good = Value::from(vec![Value::from("a"), Value::Int(2), Value::from("b")]);
    assert!(check(&schema, good).is_empty());

    let bad = Value::from(vec![Value::from("a"), Value::Float(2.5)]);
    let failures = check(&schema, bad);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, Path::root().key("value").index(1));
    assert_eq!(failures[0].kind, FailureKind::NoMatchingAlternative);
    assert_eq!(failures[0].reason, "'2.5' does not match any of (str, int)");
}

#[test]
fn test_list_union_respects_constraints() {
    let schema = single(
        ValidatorBuilder::new(ValidatorKind::List)
            .child(ValidatorBuilder::new(ValidatorKind::Integer).max(5).build().unwrap())
            .child(ValidatorBuilder::new(ValidatorKind::String).max_length(1).build().unwrap())
            .build()
            .unwrap(),
    );

    let failures = check(
        &schema,
        Value::from(vec![Value::Int(3), Value::Int(9), Value::from("x"), Value::from("xy")]),
    );
    let paths: Vec<_> = failures.iter().map(|f| f.path.to_string()).collect();
    assert_eq!(paths, vec!["value.1", "value.3"]);
}
