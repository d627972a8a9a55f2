//! Include resolution and cycle guarding.
//!
//! Named schemas may reference each other, directly or mutually. The engine
//! resolves a reference lazily each time an include validator is matched and
//! records the `(reference name, value identity)` pair while the referenced
//! schema is being matched. Meeting the same pair again on the same path
//! means the schemas loop without consuming any document structure, and the
//! inner occurrence is treated as satisfied.

use docschema_core::{Schema, Validator, Value};

/// Identity of a document node for the duration of a run.
///
/// Documents are immutable while they are matched, so the address of a node
/// is stable and unique among live nodes.
fn identity(value: &Value) -> usize {
    value as *const Value as usize
}

/// Stack of include references currently being matched.
#[derive(Debug, Default)]
pub struct InFlight {
    entries: Vec<(String, usize)>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `(name, value)` unless it is already in flight.
    ///
    /// Returns `false` when the pair is already on the stack; nothing is
    /// pushed in that case.
    pub fn enter(&mut self, name: &str, value: &Value) -> bool {
        if self.contains(name, value) {
            return false;
        }
        self.entries.push((name.to_string(), identity(value)));
        true
    }

    /// Pops the innermost entry, which must be `(name, value)`.
    pub fn leave(&mut self, name: &str, value: &Value) {
        let popped = self.entries.pop();
        debug_assert_eq!(
            popped.as_ref().map(|(n, id)| (n.as_str(), *id)),
            Some((name, identity(value))),
            "include stack out of order"
        );
    }

    pub fn contains(&self, name: &str, value: &Value) -> bool {
        let id = identity(value);
        self.entries.iter().any(|(n, i)| *i == id && n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves include names against a schema's named schemas.
#[derive(Debug)]
pub struct IncludeResolver<'s> {
    schema: &'s Schema,
    in_flight: InFlight,
}

impl<'s> IncludeResolver<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            in_flight: InFlight::new(),
        }
    }

    /// Looks up the named schema `name`.
    pub fn resolve(&self, name: &str) -> Option<&'s Validator> {
        self.schema.include(name)
    }

    /// See [`InFlight::enter`].
    pub fn enter(&mut self, name: &str, value: &Value) -> bool {
        self.in_flight.enter(name, value)
    }

    /// See [`InFlight::leave`].
    pub fn leave(&mut self, name: &str, value: &Value) {
        self.in_flight.leave(name, value);
    }

    /// Number of includes currently being matched.
    pub fn depth(&self) -> usize {
        self.in_flight.len()
    }
}
