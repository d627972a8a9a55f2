//! Validator registry.
//!
//! Maps schema keywords (`int`) and canonical variant names (`Integer`) to
//! the validator kind implementing them. The built-in set is enumerated
//! explicitly; a registry is populated once and only read afterwards.

use crate::{Result, SchemaError, ValidatorBuilder, ValidatorKind};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Lookup table from tag or name to validator kind.
///
/// # Example
///
/// ```rust
/// use docschema_core::{ValidatorKind, ValidatorRegistry};
///
/// let registry = ValidatorRegistry::default();
/// assert_eq!(registry.lookup("int").unwrap(), ValidatorKind::Integer);
/// assert_eq!(registry.lookup("Integer").unwrap(), ValidatorKind::Integer);
/// assert!(registry.lookup("uuid").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ValidatorRegistry {
    kinds: HashMap<String, ValidatorKind>,
}

impl ValidatorRegistry {
    /// Creates a registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Process-wide registry holding every built-in kind.
    ///
    /// Built on first use and never mutated afterwards.
    pub fn builtin() -> &'static ValidatorRegistry {
        static BUILTIN: OnceLock<ValidatorRegistry> = OnceLock::new();
        BUILTIN.get_or_init(ValidatorRegistry::default)
    }

    /// Registers `kind` under both its tag and its canonical name.
    pub fn register(&mut self, kind: ValidatorKind) {
        self.kinds.insert(kind.tag().to_string(), kind);
        self.kinds.insert(kind.name().to_string(), kind);
    }

    /// Resolves a tag or canonical name.
    pub fn lookup(&self, tag_or_name: &str) -> Result<ValidatorKind> {
        self.kinds
            .get(tag_or_name)
            .copied()
            .ok_or_else(|| SchemaError::UnknownValidatorKind(tag_or_name.to_string()))
    }

    /// Starts a validator builder for a tag or canonical name.
    pub fn builder(&self, tag_or_name: &str) -> Result<ValidatorBuilder> {
        self.lookup(tag_or_name).map(ValidatorBuilder::new)
    }

    pub fn contains(&self, tag_or_name: &str) -> bool {
        self.kinds.contains_key(tag_or_name)
    }

    /// Registered keys, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for kind in ValidatorKind::ALL {
            registry.register(kind);
        }
        registry
    }
}
