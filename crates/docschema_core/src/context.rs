//! Validation traits and types.
//!
//! This module defines the seam between schemas and the engines that match
//! documents against them, together with the run options and the report
//! shape returned to callers.

use crate::{Failure, Schema, Value};
use std::time::Instant;

/// Default limit on structural nesting during a run.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Core trait for matching documents against schemas.
///
/// Implementations must be pure: the same schema, document and context
/// always produce the same ordered failure list.
///
/// # Example
///
/// ```rust
/// use docschema_core::{DocumentValidator, Failure, Schema, ValidationContext, Value};
///
/// struct AcceptAll;
///
/// impl DocumentValidator for AcceptAll {
///     fn validate(&self, _: &Schema, _: &Value, _: &ValidationContext) -> Vec<Failure> {
///         Vec::new()
///     }
/// }
/// ```
pub trait DocumentValidator: Send + Sync {
    /// Matches `document` against `schema`.
    ///
    /// Returns every failure found; an empty list means the document
    /// conforms.
    fn validate(
        &self,
        schema: &Schema,
        document: &Value,
        context: &ValidationContext,
    ) -> Vec<Failure>;

    /// Matches `document` against `schema` and wraps the result in a report.
    ///
    /// Default implementation delegates to `validate()` and only records
    /// the duration.
    fn validate_with_report(
        &self,
        schema: &Schema,
        document: &Value,
        context: &ValidationContext,
    ) -> ValidationReport {
        let start = Instant::now();
        let failures = self.validate(schema, document, context);
        let mut report = ValidationReport::from_failures(failures);
        report.stats.duration_ms = start.elapsed().as_millis() as u64;
        report
    }
}

/// Options for a validation run.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Whether maps reject keys they do not declare
    pub strict: bool,

    /// Maximum structural nesting before matching stops descending
    pub max_depth: usize,
}

impl ValidationContext {
    /// Creates a new validation context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict mapping mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self {
            strict: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Report of a validation run.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Whether the document conforms
    pub passed: bool,

    /// Every failure found, in traversal order
    pub failures: Vec<Failure>,

    /// Run statistics
    pub stats: ValidationStats,
}

/// Statistics about a validation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationStats {
    /// Number of (validator, value) pairs matched
    pub nodes_visited: usize,

    /// Number of constraints evaluated
    pub constraints_evaluated: usize,

    /// Number of include references followed
    pub includes_resolved: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Creates a report from a failure list.
    pub fn from_failures(failures: Vec<Failure>) -> Self {
        Self {
            passed: failures.is_empty(),
            failures,
            stats: ValidationStats::default(),
        }
    }

    /// Creates a new successful validation report.
    pub fn success() -> Self {
        Self::from_failures(Vec::new())
    }

    /// Adds a failure to the report.
    pub fn add_failure(&mut self, failure: Failure) {
        self.failures.push(failure);
        self.passed = false;
    }
}
