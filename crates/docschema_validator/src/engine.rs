//! Main matching engine.
//!
//! This module provides the `SchemaValidator` that walks a validator tree in
//! lock-step with a document tree. Every node goes through the same phases:
//! absence check, base type check, constraints, then structural descent for
//! maps, lists and includes. Failures from every depth are accumulated in
//! traversal order; matching never stops early.

use crate::IncludeResolver;
use docschema_core::{
    DocumentValidator, Failure, FailureKind, Field, Path, PathSegment, Schema, Shape,
    ValidationContext, ValidationReport, ValidationStats, Validator, ValidatorKind, Value,
};
use std::time::Instant;
use tracing::{debug, error, warn};

const MISSING_REASON: &str = "Required field missing";
const UNKNOWN_KEY_REASON: &str = "Unexpected element";

/// Matching engine for schemas.
///
/// Holds no state between runs; a single instance can validate any number
/// of documents, from any number of threads.
///
/// # Example
///
/// ```rust
/// use docschema_core::{SchemaBuilder, ValidationContext, ValidatorBuilder, ValidatorKind, Value};
/// use docschema_validator::SchemaValidator;
///
/// let schema = SchemaBuilder::new()
///     .field("name", ValidatorBuilder::new(ValidatorKind::String).build().unwrap())
///     .build()
///     .unwrap();
///
/// let document: Value = vec![("name".to_string(), Value::from("x"))]
///     .into_iter()
///     .collect();
///
/// let failures = SchemaValidator::new().validate(&schema, &document, &ValidationContext::new());
/// assert!(failures.is_empty());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaValidator;

impl SchemaValidator {
    /// Creates a new schema validator.
    pub fn new() -> Self {
        Self
    }

    /// Matches `document` against `schema`.
    ///
    /// Returns every failure found, in traversal order. An empty list means
    /// the document conforms.
    pub fn validate(
        &self,
        schema: &Schema,
        document: &Value,
        context: &ValidationContext,
    ) -> Vec<Failure> {
        self.run(schema, document, context).0
    }

    fn run(
        &self,
        schema: &Schema,
        document: &Value,
        context: &ValidationContext,
    ) -> (Vec<Failure>, ValidationStats) {
        let mut matcher = Matcher::new(schema, context);
        let mut failures = Vec::new();
        matcher.match_node(schema.root(), Some(document), &mut failures);
        (failures, matcher.stats)
    }
}

impl DocumentValidator for SchemaValidator {
    fn validate(
        &self,
        schema: &Schema,
        document: &Value,
        context: &ValidationContext,
    ) -> Vec<Failure> {
        SchemaValidator::validate(self, schema, document, context)
    }

    fn validate_with_report(
        &self,
        schema: &Schema,
        document: &Value,
        context: &ValidationContext,
    ) -> ValidationReport {
        let start = Instant::now();
        let (failures, mut stats) = self.run(schema, document, context);
        stats.duration_ms = start.elapsed().as_millis() as u64;

        let mut report = ValidationReport::from_failures(failures);
        report.stats = stats;
        report
    }
}

/// State of a single validation run.
struct Matcher<'a> {
    resolver: IncludeResolver<'a>,
    max_depth: usize,
    /// Effective strictness; map and include overrides replace it for
    /// their subtree.
    strict: bool,
    depth: usize,
    path: Path,
    stats: ValidationStats,
}

impl<'a> Matcher<'a> {
    fn new(schema: &'a Schema, context: &ValidationContext) -> Self {
        Self {
            resolver: IncludeResolver::new(schema),
            max_depth: context.max_depth,
            strict: context.strict,
            depth: 0,
            path: Path::root(),
            stats: ValidationStats::default(),
        }
    }

    fn fail(&self, out: &mut Vec<Failure>, kind: FailureKind, tag: &str, reason: impl Into<String>) {
        out.push(Failure::new(kind, &self.path, tag, reason));
    }

    fn match_node(&mut self, validator: &'a Validator, value: Option<&'a Value>, out: &mut Vec<Failure>) {
        self.stats.nodes_visited += 1;

        let value = match value {
            Some(value) if !value.is_null() => value,
            _ => {
                if !validator.is_optional() {
                    self.fail(out, FailureKind::MissingField, validator.tag(), MISSING_REASON);
                }
                return;
            }
        };

        if !validator.is_valid(value) {
            let kind = if validator.kind() == ValidatorKind::Enum {
                FailureKind::NotInEnum
            } else {
                FailureKind::TypeMismatch
            };
            self.fail(out, kind, validator.tag(), validator.fail(value));
            return;
        }

        for constraint in validator.constraints() {
            self.stats.constraints_evaluated += 1;
            if let Some(reason) = constraint.check(value) {
                self.fail(out, FailureKind::ConstraintViolation, validator.tag(), reason);
            }
        }

        let saved_strict = self.strict;
        if let Some(strict) = validator.strict() {
            self.strict = strict;
        }

        match validator.shape() {
            Shape::Map { fields, values, .. } => {
                if let Some(map) = value.as_map() {
                    self.match_map(validator, fields, values, map, out);
                }
            }
            Shape::List(children) => {
                if let Some(items) = value.as_list() {
                    self.match_list(validator, children, items, out);
                }
            }
            Shape::Include { name, .. } => self.match_include(validator, name, value, out),
            Shape::Scalar | Shape::Enum(_) => {}
        }

        self.strict = saved_strict;
    }

    /// Guards structural descent against the configured depth limit.
    fn descend(&mut self, validator: &Validator, out: &mut Vec<Failure>) -> bool {
        if self.depth >= self.max_depth {
            warn!(path = %self.path, max_depth = self.max_depth, "nesting depth limit reached");
            self.fail(
                out,
                FailureKind::DepthExceeded,
                validator.tag(),
                format!("Maximum nesting depth of {} exceeded", self.max_depth),
            );
            return false;
        }
        self.depth += 1;
        true
    }

    fn match_map(
        &mut self,
        validator: &'a Validator,
        fields: &'a [Field],
        values: &'a [Validator],
        map: &'a docschema_core::Mapping,
        out: &mut Vec<Failure>,
    ) {
        if fields.is_empty() && values.is_empty() {
            return;
        }
        if !self.descend(validator, out) {
            return;
        }

        for field in fields {
            self.path.push(PathSegment::Key(field.name().to_string()));
            self.match_node(field.validator(), map.get(field.name()), out);
            self.path.pop();
        }

        let undeclared = map
            .iter()
            .filter(|(key, _)| !fields.iter().any(|f| f.name() == key.as_str()));

        if !values.is_empty() {
            for (key, item) in undeclared {
                self.path.push(PathSegment::Key(key.clone()));
                self.match_alternatives(validator, values, item, out);
                self.path.pop();
            }
        } else if self.strict {
            for (key, _) in undeclared {
                self.path.push(PathSegment::Key(key.clone()));
                self.fail(out, FailureKind::UnknownKey, validator.tag(), UNKNOWN_KEY_REASON);
                self.path.pop();
            }
        }

        self.depth -= 1;
    }

    fn match_list(
        &mut self,
        validator: &'a Validator,
        children: &'a [Validator],
        items: &'a [Value],
        out: &mut Vec<Failure>,
    ) {
        if children.is_empty() {
            return;
        }
        if !self.descend(validator, out) {
            return;
        }

        for (index, item) in items.iter().enumerate() {
            self.path.push(PathSegment::Index(index));
            self.match_alternatives(validator, children, item, out);
            self.path.pop();
        }

        self.depth -= 1;
    }

    /// Matches `item` against a union of validators.
    ///
    /// A single alternative reports its own failures; with several, the
    /// item passes if any alternative passes and otherwise yields one
    /// summary failure.
    fn match_alternatives(
        &mut self,
        parent: &Validator,
        alternatives: &'a [Validator],
        item: &'a Value,
        out: &mut Vec<Failure>,
    ) {
        if let [only] = alternatives {
            self.match_node(only, Some(item), out);
            return;
        }

        for alternative in alternatives {
            let mut attempt = Vec::new();
            self.match_node(alternative, Some(item), &mut attempt);
            if attempt.is_empty() {
                return;
            }
        }

        let tags: Vec<&str> = alternatives.iter().map(Validator::tag).collect();
        self.fail(
            out,
            FailureKind::NoMatchingAlternative,
            parent.tag(),
            format!("'{}' does not match any of ({})", item, tags.join(", ")),
        );
    }

    fn match_include(
        &mut self,
        validator: &Validator,
        name: &str,
        value: &'a Value,
        out: &mut Vec<Failure>,
    ) {
        let Some(resolved) = self.resolver.resolve(name) else {
            // Schema::with_includes rejects unresolved names
            error!(include = name, "include reference not found");
            return;
        };

        if !self.resolver.enter(name, value) {
            debug!(include = name, path = %self.path, "include already in flight, treating as satisfied");
            return;
        }

        debug!(include = name, tag = validator.tag(), depth = self.resolver.depth(), "resolving include");
        self.stats.includes_resolved += 1;
        self.match_node(resolved, Some(value), out);
        self.resolver.leave(name, value);
    }
}
