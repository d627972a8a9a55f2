//! Assembled schemas.
//!
//! A [`Schema`] pairs a root validator with the named schemas its include
//! validators refer to. Include names are checked when the schema is
//! assembled; cycles between named schemas are legal and are handled by the
//! matching engine.

use crate::{Result, SchemaError, Shape, Validator};
use std::collections::BTreeMap;

/// A root validator plus the named schemas available to includes.
#[derive(Debug, Clone)]
pub struct Schema {
    root: Validator,
    includes: BTreeMap<String, Validator>,
}

impl Schema {
    /// Creates a schema without named includes.
    pub fn new(root: Validator) -> Result<Self> {
        Self::with_includes(root, Vec::new())
    }

    /// Creates a schema with named includes.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateSchema`] when two includes share a
    /// name and [`SchemaError::UnresolvedInclude`] when any include
    /// validator, in the root or in a named schema, references a name that
    /// is not defined.
    pub fn with_includes<I>(root: Validator, includes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Validator)>,
    {
        let mut named = BTreeMap::new();
        for (name, validator) in includes {
            if named.contains_key(&name) {
                return Err(SchemaError::DuplicateSchema(name));
            }
            named.insert(name, validator);
        }

        let schema = Self {
            root,
            includes: named,
        };
        schema.check_references(&schema.root)?;
        for validator in schema.includes.values() {
            schema.check_references(validator)?;
        }
        Ok(schema)
    }

    /// Root validator.
    pub fn root(&self) -> &Validator {
        &self.root
    }

    /// Looks up a named schema.
    pub fn include(&self, name: &str) -> Option<&Validator> {
        self.includes.get(name)
    }

    /// Named schemas, in name order.
    pub fn includes(&self) -> impl Iterator<Item = (&str, &Validator)> {
        self.includes.iter().map(|(name, v)| (name.as_str(), v))
    }

    fn check_references(&self, validator: &Validator) -> Result<()> {
        match validator.shape() {
            Shape::Include { name, .. } => {
                if !self.includes.contains_key(name) {
                    return Err(SchemaError::UnresolvedInclude(name.clone()));
                }
            }
            Shape::Map { fields, values, .. } => {
                for field in fields {
                    self.check_references(field.validator())?;
                }
                for child in values {
                    self.check_references(child)?;
                }
            }
            Shape::List(children) => {
                for child in children {
                    self.check_references(child)?;
                }
            }
            Shape::Scalar | Shape::Enum(_) => {}
        }
        Ok(())
    }
}
