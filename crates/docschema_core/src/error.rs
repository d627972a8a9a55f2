//! Error types for schema construction.
//!
//! Every error in this module is a schema-authoring error: it is raised
//! while a validator tree is being built and never while a document is
//! matched. Document mismatches are data, see [`crate::Failure`].

use thiserror::Error;

/// Result type for schema construction.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while building validators and schemas.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Tag or canonical name not present in the registry
    #[error("Unknown validator kind: '{0}'")]
    UnknownValidatorKind(String),

    /// Constraint attached to a validator that cannot carry it
    #[error("Constraint '{constraint}' is not applicable to validator '{validator}'")]
    ConstraintNotApplicable {
        /// Constraint kind name
        constraint: String,
        /// Validator tag
        validator: String,
    },

    /// Min/Max bound of the wrong family (e.g. a date bound on `int`)
    #[error("Invalid bound {bound} for validator '{validator}': expected {expected}")]
    InvalidBound {
        /// Validator tag
        validator: String,
        /// Offending bound, rendered
        bound: String,
        /// Expected bound family
        expected: String,
    },

    /// Required constructor argument was not supplied
    #[error("Validator '{validator}' requires argument '{argument}'")]
    MissingArgument {
        /// Validator tag
        validator: String,
        /// Missing argument name
        argument: String,
    },

    /// Argument supplied with an unusable value
    #[error("Invalid argument '{argument}' for validator '{validator}': {message}")]
    InvalidArgument {
        /// Validator tag
        validator: String,
        /// Argument name
        argument: String,
        /// Description of the problem
        message: String,
    },

    /// Pattern constraint with a regex that does not compile
    #[error("Invalid pattern '{pattern}': {error}")]
    InvalidPattern {
        /// Source pattern
        pattern: String,
        /// Compiler error
        error: String,
    },

    /// Include referencing a schema name that was never defined
    #[error("Include references undefined schema '{0}'")]
    UnresolvedInclude(String),

    /// Two named schemas share a name
    #[error("Duplicate schema name: '{0}'")]
    DuplicateSchema(String),
}

impl SchemaError {
    /// Creates a new constraint applicability error.
    pub fn not_applicable(constraint: impl Into<String>, validator: impl Into<String>) -> Self {
        Self::ConstraintNotApplicable {
            constraint: constraint.into(),
            validator: validator.into(),
        }
    }

    /// Creates a new missing argument error.
    pub fn missing_argument(validator: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::MissingArgument {
            validator: validator.into(),
            argument: argument.into(),
        }
    }

    /// Creates a new invalid argument error.
    pub fn invalid_argument(
        validator: impl Into<String>,
        argument: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            validator: validator.into(),
            argument: argument.into(),
            message: message.into(),
        }
    }
}
