//! # docschema Validator
//!
//! Matching engine for docschema. This crate walks a validator tree from
//! `docschema_core` against a loaded document and collects every mismatch:
//!
//! - Base type checks (with booleans kept apart from numbers and strings
//!   kept apart from lists)
//! - Refinement constraints (bounds, lengths, excluded characters, patterns)
//! - Structural descent into maps and lists, with strict or lenient handling
//!   of undeclared keys
//! - Include resolution with a cycle guard for mutually recursive schemas
//!
//! ## Example
//!
//! ```rust
//! use docschema_core::{SchemaBuilder, ValidationContext, ValidatorBuilder, ValidatorKind, Value};
//! use docschema_validator::SchemaValidator;
//!
//! let schema = SchemaBuilder::new()
//!     .field(
//!         "count",
//!         ValidatorBuilder::new(ValidatorKind::Integer).min(1).build().unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let document: Value = vec![("count".to_string(), Value::Int(0))].into_iter().collect();
//!
//! let failures = SchemaValidator::new().validate(&schema, &document, &ValidationContext::new());
//! for failure in &failures {
//!     println!("{}", failure);
//! }
//! assert_eq!(failures.len(), 1);
//! ```

mod engine;
mod include;

pub use engine::*;
pub use include::*;
