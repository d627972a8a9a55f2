//! Schema source to validator tree.
//!
//! The first YAML document of a schema source is the root. Each following
//! document is a mapping of include names to schema nodes. A schema node is
//! either a validator expression string, a nested mapping (an implicit
//! `map` with those fields) or a sequence (an implicit `list` of its items).

use crate::document::parse_temporal;
use crate::expr::{Expr, parse_expression};
use crate::{ParserError, Result};
use docschema_core::{
    Bound, Schema, SchemaError, Validator, ValidatorBuilder, ValidatorKind, ValidatorRegistry,
    Value,
};
use serde::Deserialize;
use serde_yaml_ng::Value as Yaml;

/// Parses a schema from YAML source using the built-in registry.
///
/// # Example
///
/// ```rust
/// use docschema_parser::parse_schema_yaml;
///
/// let schema = parse_schema_yaml(
///     r#"
/// name: str(max=32)
/// tags: list(str(), required=False)
/// owner: include('person')
/// ---
/// person:
///   email: str(matches='^[^@]+@[^@]+$')
/// "#,
/// )
/// .unwrap();
///
/// assert!(schema.include("person").is_some());
/// ```
pub fn parse_schema_yaml(content: &str) -> Result<Schema> {
    SchemaParser::new(ValidatorRegistry::builtin()).parse(content)
}

/// Converts schema source into a [`Schema`] against a validator registry.
#[derive(Debug, Clone, Copy)]
pub struct SchemaParser<'r> {
    registry: &'r ValidatorRegistry,
}

impl<'r> SchemaParser<'r> {
    /// Creates a parser resolving tags against `registry`.
    pub fn new(registry: &'r ValidatorRegistry) -> Self {
        Self { registry }
    }

    /// Parses multi-document YAML schema source.
    pub fn parse(&self, content: &str) -> Result<Schema> {
        let mut documents = Vec::new();
        for document in serde_yaml_ng::Deserializer::from_str(content) {
            documents.push(Yaml::deserialize(document)?);
        }

        let mut documents = documents.into_iter();
        let root = match documents.next() {
            Some(Yaml::Null) | None => return Err(ParserError::EmptySchema),
            Some(root) => self.node(&root, "")?,
        };

        let mut includes = Vec::new();
        for document in documents {
            match document {
                Yaml::Null => continue,
                Yaml::Mapping(mapping) => {
                    for (key, node) in &mapping {
                        let name = key_name(key, "")?;
                        // include only ever accepts mappings
                        if !matches!(node, Yaml::Mapping(_)) {
                            return Err(ParserError::InvalidSchema {
                                path: name,
                                message: format!(
                                    "named schemas must be mappings, found {}",
                                    yaml_kind(node)
                                ),
                            });
                        }
                        let validator = self.node(node, &name)?;
                        includes.push((name, validator));
                    }
                }
                other => {
                    return Err(ParserError::InvalidSchema {
                        path: String::new(),
                        message: format!(
                            "include documents must map names to schemas, found {}",
                            yaml_kind(&other)
                        ),
                    });
                }
            }
        }

        Schema::with_includes(root, includes).map_err(|source| ParserError::Schema {
            path: String::new(),
            source,
        })
    }

    /// Converts one schema node found at `path`.
    pub fn node(&self, node: &Yaml, path: &str) -> Result<Validator> {
        match node {
            Yaml::String(source) => {
                let expr = parse_expression(source)?;
                self.expression(&expr, path)
            }
            Yaml::Mapping(mapping) => {
                let mut builder = ValidatorBuilder::new(ValidatorKind::Map);
                for (key, child) in mapping {
                    let name = key_name(key, path)?;
                    let child_path = join(path, &name);
                    builder = builder.field(name, self.node(child, &child_path)?);
                }
                finish(builder, path)
            }
            Yaml::Sequence(items) => {
                let mut builder = ValidatorBuilder::new(ValidatorKind::List);
                for (index, item) in items.iter().enumerate() {
                    builder = builder.child(self.node(item, &join(path, &index.to_string()))?);
                }
                finish(builder, path)
            }
            Yaml::Tagged(tagged) => self.node(&tagged.value, path),
            other => Err(ParserError::InvalidSchema {
                path: path.to_string(),
                message: format!(
                    "expected a validator expression, mapping or sequence, found {}",
                    yaml_kind(other)
                ),
            }),
        }
    }

    /// Converts a parsed validator expression.
    pub fn expression(&self, expr: &Expr, path: &str) -> Result<Validator> {
        let (name, args, kwargs) = match expr {
            Expr::Call { name, args, kwargs } => (name, args, kwargs),
            Expr::Literal(_) => {
                return Err(ParserError::InvalidSchema {
                    path: path.to_string(),
                    message: format!("expected a validator, found {}", expr.describe()),
                });
            }
        };

        let schema_err = |source: SchemaError| ParserError::Schema {
            path: path.to_string(),
            source,
        };

        let kind = self.registry.lookup(name).map_err(schema_err)?;
        let tag = kind.tag();
        let mut builder = ValidatorBuilder::new(kind);

        match kind {
            ValidatorKind::Enum => {
                for arg in args {
                    match arg {
                        Expr::Literal(value) => builder = builder.member(value.clone()),
                        call => {
                            return Err(schema_err(SchemaError::invalid_argument(
                                tag,
                                "members",
                                format!("expected a literal, found {}", call.describe()),
                            )));
                        }
                    }
                }
            }
            ValidatorKind::List | ValidatorKind::Map => {
                for (index, arg) in args.iter().enumerate() {
                    let child = self.expression(arg, &join(path, &index.to_string()))?;
                    builder = builder.child(child);
                }
            }
            ValidatorKind::Include => match args.as_slice() {
                [Expr::Literal(Value::String(target))] => builder = builder.include(target.as_str()),
                [] => return Err(schema_err(SchemaError::missing_argument(tag, "name"))),
                _ => {
                    return Err(schema_err(SchemaError::invalid_argument(
                        tag,
                        "name",
                        "expected exactly one quoted schema name",
                    )));
                }
            },
            _ => {
                if let Some(arg) = args.first() {
                    return Err(schema_err(SchemaError::invalid_argument(
                        tag,
                        "arguments",
                        format!("unexpected positional argument {}", arg.describe()),
                    )));
                }
            }
        }

        for (key, value) in kwargs {
            builder = self.keyword(builder, kind, key, value).map_err(schema_err)?;
        }

        finish(builder, path)
    }

    fn keyword(
        &self,
        builder: ValidatorBuilder,
        kind: ValidatorKind,
        key: &str,
        value: &Expr,
    ) -> std::result::Result<ValidatorBuilder, SchemaError> {
        let tag = kind.tag();
        let literal = match value {
            Expr::Literal(value) => value,
            call => {
                return Err(SchemaError::invalid_argument(
                    tag,
                    key,
                    format!("expected a literal, found {}", call.describe()),
                ));
            }
        };
        let invalid = |expected: &str| {
            SchemaError::invalid_argument(
                tag,
                key,
                format!("expected {}, found {}", expected, literal.literal()),
            )
        };

        Ok(match key {
            "required" => {
                let required = literal.as_bool().ok_or_else(|| invalid("True or False"))?;
                builder.optional(!required)
            }
            "strict" => builder.strict(literal.as_bool().ok_or_else(|| invalid("True or False"))?),
            "exclude" => builder.exclude(literal.as_str().ok_or_else(|| invalid("a string"))?),
            "matches" => builder.pattern(literal.as_str().ok_or_else(|| invalid("a string"))?),
            "min" | "max" if kind == ValidatorKind::String => {
                let length = literal
                    .as_int()
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| invalid("a non-negative integer"))?;
                if key == "min" {
                    builder.min_length(length)
                } else {
                    builder.max_length(length)
                }
            }
            "min" | "max" => {
                let bound = literal_bound(literal).ok_or_else(|| invalid("a number or date"))?;
                if key == "min" {
                    builder.min(bound)
                } else {
                    builder.max(bound)
                }
            }
            other => {
                return Err(SchemaError::invalid_argument(tag, other, "unknown keyword"));
            }
        })
    }
}

fn finish(builder: ValidatorBuilder, path: &str) -> Result<Validator> {
    builder.build().map_err(|source| ParserError::Schema {
        path: path.to_string(),
        source,
    })
}

fn literal_bound(literal: &Value) -> Option<Bound> {
    match literal {
        Value::Int(i) => Some(Bound::Int(*i)),
        Value::Float(f) => Some(Bound::Float(*f)),
        Value::Date(d) => Some(Bound::Date(*d)),
        Value::Timestamp(t) => Some(Bound::Timestamp(*t)),
        Value::String(s) => match parse_temporal(s)? {
            Value::Date(d) => Some(Bound::Date(d)),
            Value::Timestamp(t) => Some(Bound::Timestamp(t)),
            _ => None,
        },
        _ => None,
    }
}

fn key_name(key: &Yaml, path: &str) -> Result<String> {
    match key {
        Yaml::String(s) => Ok(s.clone()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        other => Err(ParserError::InvalidSchema {
            path: path.to_string(),
            message: format!("field names must be scalars, found {}", yaml_kind(other)),
        }),
    }
}

pub(crate) fn yaml_kind(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a sequence",
        Yaml::Mapping(_) => "a mapping",
        Yaml::Tagged(_) => "a tagged value",
    }
}

pub(crate) fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}
