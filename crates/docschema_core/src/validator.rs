//! Validator kinds and validator nodes.
//!
//! A [`Validator`] is one node of a schema tree. Its [`ValidatorKind`]
//! decides which document values pass the base type check and which
//! [`ConstraintKind`]s may be attached to it. Structural kinds (map, list)
//! carry child validators; an include carries the name of another schema.
//!
//! Validators are built through [`crate::ValidatorBuilder`], which enforces
//! the construction-time invariants, and are immutable afterwards.

use crate::{Constraint, ConstraintKind, Value};
use std::fmt;

const NUMERIC_CONSTRAINTS: &[ConstraintKind] = &[ConstraintKind::Min, ConstraintKind::Max];

const TEXT_CONSTRAINTS: &[ConstraintKind] = &[
    ConstraintKind::LengthMin,
    ConstraintKind::LengthMax,
    ConstraintKind::CharacterExclude,
    ConstraintKind::Pattern,
];

/// Built-in validator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
    String,
    Number,
    Integer,
    Boolean,
    Enum,
    Day,
    Timestamp,
    Map,
    List,
    Include,
}

impl ValidatorKind {
    /// Every built-in kind, in registration order.
    pub const ALL: [ValidatorKind; 10] = [
        ValidatorKind::String,
        ValidatorKind::Number,
        ValidatorKind::Integer,
        ValidatorKind::Boolean,
        ValidatorKind::Enum,
        ValidatorKind::Day,
        ValidatorKind::Timestamp,
        ValidatorKind::Map,
        ValidatorKind::List,
        ValidatorKind::Include,
    ];

    /// Short schema keyword (e.g. `int`).
    pub fn tag(&self) -> &'static str {
        match self {
            ValidatorKind::String => "str",
            ValidatorKind::Number => "num",
            ValidatorKind::Integer => "int",
            ValidatorKind::Boolean => "bool",
            ValidatorKind::Enum => "enum",
            ValidatorKind::Day => "day",
            ValidatorKind::Timestamp => "timestamp",
            ValidatorKind::Map => "map",
            ValidatorKind::List => "list",
            ValidatorKind::Include => "include",
        }
    }

    /// Canonical variant name (e.g. `Integer`).
    pub fn name(&self) -> &'static str {
        match self {
            ValidatorKind::String => "String",
            ValidatorKind::Number => "Number",
            ValidatorKind::Integer => "Integer",
            ValidatorKind::Boolean => "Boolean",
            ValidatorKind::Enum => "Enum",
            ValidatorKind::Day => "Day",
            ValidatorKind::Timestamp => "Timestamp",
            ValidatorKind::Map => "Map",
            ValidatorKind::List => "List",
            ValidatorKind::Include => "Include",
        }
    }

    /// Constraint kinds this validator may carry.
    pub fn applicable_constraints(&self) -> &'static [ConstraintKind] {
        match self {
            ValidatorKind::String => TEXT_CONSTRAINTS,
            ValidatorKind::Number
            | ValidatorKind::Integer
            | ValidatorKind::Day
            | ValidatorKind::Timestamp => NUMERIC_CONSTRAINTS,
            ValidatorKind::Boolean
            | ValidatorKind::Enum
            | ValidatorKind::Map
            | ValidatorKind::List
            | ValidatorKind::Include => &[],
        }
    }

    /// Native value kinds (as [`Value::type_name`]) that can pass the base
    /// check. Booleans are never numbers and strings are never lists.
    /// `day` and `timestamp` also take ISO-8601 strings.
    pub fn accepted_kinds(&self) -> &'static [&'static str] {
        match self {
            ValidatorKind::String => &["string"],
            ValidatorKind::Number => &["int", "float"],
            ValidatorKind::Integer => &["int"],
            ValidatorKind::Boolean => &["bool"],
            ValidatorKind::Enum => &["string", "int", "float", "bool", "date", "timestamp"],
            ValidatorKind::Day => &["date", "string"],
            ValidatorKind::Timestamp => &["timestamp", "string"],
            ValidatorKind::Map | ValidatorKind::Include => &["map"],
            ValidatorKind::List => &["list"],
        }
    }

    /// Whether `constraint` may be attached to this kind.
    pub fn accepts_constraint(&self, constraint: ConstraintKind) -> bool {
        self.applicable_constraints().contains(&constraint)
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A named entry of a map validator.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    validator: Validator,
}

impl Field {
    pub fn new(name: impl Into<String>, validator: Validator) -> Self {
        Self {
            name: name.into(),
            validator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}

/// Variant-specific data of a validator.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Scalar kinds carry nothing beyond their constraints
    Scalar,
    /// Allowed literal members, in declaration order
    Enum(Vec<Value>),
    /// Declared fields plus validators for undeclared values
    Map {
        fields: Vec<Field>,
        values: Vec<Validator>,
        strict: Option<bool>,
    },
    /// Alternatives applied to every element
    List(Vec<Validator>),
    /// Reference to a named schema
    Include { name: String, strict: Option<bool> },
}

/// A schema node: one type rule plus its refinements.
#[derive(Debug, Clone)]
pub struct Validator {
    pub(crate) kind: ValidatorKind,
    pub(crate) shape: Shape,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) optional: bool,
}

impl Validator {
    pub fn kind(&self) -> ValidatorKind {
        self.kind
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Attached constraints, in declaration order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Whether an absent document value is permitted.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Declared fields of a map validator; empty for other kinds.
    pub fn fields(&self) -> &[Field] {
        match &self.shape {
            Shape::Map { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Child validators of a list, or the value validators of a map.
    pub fn children(&self) -> &[Validator] {
        match &self.shape {
            Shape::List(children) => children,
            Shape::Map { values, .. } => values,
            _ => &[],
        }
    }

    /// Referenced schema name of an include.
    pub fn include_name(&self) -> Option<&str> {
        match &self.shape {
            Shape::Include { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Strictness override for unknown map keys, if any.
    pub fn strict(&self) -> Option<bool> {
        match &self.shape {
            Shape::Map { strict, .. } | Shape::Include { strict, .. } => *strict,
            _ => None,
        }
    }

    /// Base type check.
    ///
    /// Booleans are rejected by the numeric kinds even though some hosts
    /// treat them as integers, and strings never satisfy `list`.
    pub fn is_valid(&self, value: &Value) -> bool {
        if !self.kind.accepted_kinds().contains(&value.type_name()) {
            return false;
        }
        match self.kind {
            ValidatorKind::Enum => match &self.shape {
                Shape::Enum(members) => members.iter().any(|m| same_literal(m, value)),
                _ => false,
            },
            ValidatorKind::Day => value.as_date().is_some(),
            ValidatorKind::Timestamp => value.as_timestamp().is_some(),
            _ => true,
        }
    }

    /// Failure reason for a value rejected by [`Validator::is_valid`].
    pub fn fail(&self, value: &Value) -> String {
        match &self.shape {
            Shape::Enum(members) => {
                let listed: Vec<String> = members.iter().map(Value::literal).collect();
                format!("'{}' not in ({})", value, listed.join(", "))
            }
            _ => format!("'{}' is not a {}.", value, self.tag()),
        }
    }
}

/// Enum membership compares by value; integers and floats compare
/// numerically, booleans only ever equal booleans. A date or timestamp
/// equals the ISO-8601 string that spells it.
fn same_literal(member: &Value, value: &Value) -> bool {
    match (member, value) {
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => (*a as f64) == *b,
        (Value::Date(_), Value::String(_)) | (Value::String(_), Value::Date(_)) => {
            member.as_date() == value.as_date()
        }
        (Value::Timestamp(_), Value::String(_)) | (Value::String(_), Value::Timestamp(_)) => {
            member.as_timestamp() == value.as_timestamp()
        }
        _ => member == value,
    }
}
