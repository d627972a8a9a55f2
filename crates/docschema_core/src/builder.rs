//! Builder pattern for creating validators and schemas.
//!
//! Builders are the only way to construct a [`Validator`] or a [`Schema`],
//! so every tree that reaches the matching engine has already passed the
//! construction-time checks: constraint applicability, bound families and
//! required arguments.

use crate::{
    Bound, Constraint, Field, Result, Schema, SchemaError, Shape, Validator, ValidatorKind, Value,
};
use chrono::{NaiveDate, NaiveDateTime};

/// Builder for creating a [`Validator`].
///
/// # Example
///
/// ```rust
/// use docschema_core::{ValidatorBuilder, ValidatorKind};
///
/// let age = ValidatorBuilder::new(ValidatorKind::Integer)
///     .min(0)
///     .max(150)
///     .optional(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(age.constraints().len(), 2);
/// assert!(age.is_optional());
/// ```
#[derive(Debug)]
pub struct ValidatorBuilder {
    kind: ValidatorKind,
    optional: bool,
    constraints: Vec<Constraint>,
    members: Vec<Value>,
    fields: Vec<Field>,
    children: Vec<Validator>,
    include: Option<String>,
    strict: Option<bool>,
    error: Option<SchemaError>,
}

impl ValidatorBuilder {
    /// Creates a new builder for a required validator of `kind`.
    pub fn new(kind: ValidatorKind) -> Self {
        Self {
            kind,
            optional: false,
            constraints: Vec::new(),
            members: Vec::new(),
            fields: Vec::new(),
            children: Vec::new(),
            include: None,
            strict: None,
            error: None,
        }
    }

    /// Sets whether an absent value is permitted.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Attaches a constraint. Applicability is checked by [`Self::build`].
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds an inclusive lower bound.
    pub fn min(self, bound: impl Into<Bound>) -> Self {
        self.constraint(Constraint::Min(bound.into()))
    }

    /// Adds an inclusive upper bound.
    pub fn max(self, bound: impl Into<Bound>) -> Self {
        self.constraint(Constraint::Max(bound.into()))
    }

    /// Adds a minimum string length.
    pub fn min_length(self, length: usize) -> Self {
        self.constraint(Constraint::LengthMin(length))
    }

    /// Adds a maximum string length.
    pub fn max_length(self, length: usize) -> Self {
        self.constraint(Constraint::LengthMax(length))
    }

    /// Forbids every character of `characters`.
    pub fn exclude(self, characters: impl Into<String>) -> Self {
        self.constraint(Constraint::CharacterExclude(characters.into()))
    }

    /// Requires a regex match. Compile errors surface from [`Self::build`].
    pub fn pattern(mut self, pattern: &str) -> Self {
        match Constraint::pattern(pattern) {
            Ok(constraint) => self.constraints.push(constraint),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    /// Adds an enum member.
    pub fn member(mut self, member: impl Into<Value>) -> Self {
        self.members.push(member.into());
        self
    }

    /// Adds several enum members.
    pub fn members<I, T>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.members.extend(members.into_iter().map(Into::into));
        self
    }

    /// Adds a named field to a map validator.
    pub fn field(mut self, name: impl Into<String>, validator: Validator) -> Self {
        self.fields.push(Field::new(name, validator));
        self
    }

    /// Adds a list alternative, or a value validator to a map.
    pub fn child(mut self, validator: Validator) -> Self {
        self.children.push(validator);
        self
    }

    /// Sets the schema name referenced by an include.
    pub fn include(mut self, name: impl Into<String>) -> Self {
        self.include = Some(name.into());
        self
    }

    /// Overrides the run-wide strictness for a map or include.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Builds the validator.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when a constraint is not applicable to the
    /// kind, a bound belongs to the wrong family, a required argument is
    /// missing, or an argument was given to a kind that does not take it.
    pub fn build(self) -> Result<Validator> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let kind = self.kind;
        let tag = kind.tag();

        for constraint in &self.constraints {
            if !kind.accepts_constraint(constraint.kind()) {
                return Err(SchemaError::not_applicable(constraint.kind().name(), tag));
            }
            if let Some(bound) = constraint.bound() {
                check_bound_family(kind, bound)?;
            }
        }

        if !self.members.is_empty() && kind != ValidatorKind::Enum {
            return Err(SchemaError::invalid_argument(tag, "members", "only enum takes members"));
        }
        if !self.fields.is_empty() && kind != ValidatorKind::Map {
            return Err(SchemaError::invalid_argument(tag, "fields", "only map takes fields"));
        }
        if !self.children.is_empty() && !matches!(kind, ValidatorKind::List | ValidatorKind::Map) {
            return Err(SchemaError::invalid_argument(
                tag,
                "validators",
                "only list and map take child validators",
            ));
        }
        if self.include.is_some() && kind != ValidatorKind::Include {
            return Err(SchemaError::invalid_argument(tag, "name", "only include takes a name"));
        }
        if self.strict.is_some() && !matches!(kind, ValidatorKind::Map | ValidatorKind::Include) {
            return Err(SchemaError::invalid_argument(
                tag,
                "strict",
                "only map and include take a strictness override",
            ));
        }

        let shape = match kind {
            ValidatorKind::Enum => {
                if self.members.is_empty() {
                    return Err(SchemaError::missing_argument(tag, "members"));
                }
                Shape::Enum(self.members)
            }
            ValidatorKind::Map => Shape::Map {
                fields: self.fields,
                values: self.children,
                strict: self.strict,
            },
            ValidatorKind::List => Shape::List(self.children),
            ValidatorKind::Include => match self.include {
                Some(name) if !name.trim().is_empty() => Shape::Include {
                    name,
                    strict: self.strict,
                },
                _ => return Err(SchemaError::missing_argument(tag, "name")),
            },
            _ => Shape::Scalar,
        };

        Ok(Validator {
            kind,
            shape,
            constraints: self.constraints,
            optional: self.optional,
        })
    }
}

fn check_bound_family(kind: ValidatorKind, bound: &Bound) -> Result<()> {
    let (fits, expected) = match kind {
        ValidatorKind::Number | ValidatorKind::Integer => (bound.is_numeric(), "a number"),
        ValidatorKind::Day => (matches!(bound, Bound::Date(_)), "a date"),
        ValidatorKind::Timestamp => (
            matches!(bound, Bound::Date(_) | Bound::Timestamp(_)),
            "a date or timestamp",
        ),
        _ => (true, ""),
    };

    if fits {
        Ok(())
    } else {
        Err(SchemaError::InvalidBound {
            validator: kind.tag().to_string(),
            bound: bound.to_string(),
            expected: expected.to_string(),
        })
    }
}

impl From<i32> for Bound {
    fn from(i: i32) -> Self {
        Bound::Int(i64::from(i))
    }
}

impl From<i64> for Bound {
    fn from(i: i64) -> Self {
        Bound::Int(i)
    }
}

impl From<f64> for Bound {
    fn from(f: f64) -> Self {
        Bound::Float(f)
    }
}

impl From<NaiveDate> for Bound {
    fn from(d: NaiveDate) -> Self {
        Bound::Date(d)
    }
}

impl From<NaiveDateTime> for Bound {
    fn from(ts: NaiveDateTime) -> Self {
        Bound::Timestamp(ts)
    }
}

/// Builder for creating a [`Schema`].
///
/// The root is a map validator assembled field by field; named schemas are
/// registered for include resolution.
///
/// # Example
///
/// ```rust
/// use docschema_core::{SchemaBuilder, ValidatorBuilder, ValidatorKind};
///
/// let person = ValidatorBuilder::new(ValidatorKind::Map)
///     .field("name", ValidatorBuilder::new(ValidatorKind::String).build().unwrap())
///     .build()
///     .unwrap();
///
/// let schema = SchemaBuilder::new()
///     .field(
///         "owner",
///         ValidatorBuilder::new(ValidatorKind::Include)
///             .include("person")
///             .build()
///             .unwrap(),
///     )
///     .include("person", person)
///     .build()
///     .unwrap();
///
/// assert!(schema.include("person").is_some());
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<Field>,
    includes: Vec<(String, Validator)>,
    strict: Option<bool>,
}

impl SchemaBuilder {
    /// Creates a new, empty schema builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root field.
    pub fn field(mut self, name: impl Into<String>, validator: Validator) -> Self {
        self.fields.push(Field::new(name, validator));
        self
    }

    /// Registers a named schema for include resolution.
    pub fn include(mut self, name: impl Into<String>, validator: Validator) -> Self {
        self.includes.push((name.into(), validator));
        self
    }

    /// Overrides the run-wide strictness for the root mapping.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Builds the schema, checking that every include resolves.
    pub fn build(self) -> Result<Schema> {
        let root = Validator {
            kind: ValidatorKind::Map,
            shape: Shape::Map {
                fields: self.fields,
                values: Vec::new(),
                strict: self.strict,
            },
            constraints: Vec::new(),
            optional: false,
        };
        Schema::with_includes(root, self.includes)
    }
}
