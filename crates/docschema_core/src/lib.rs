//! # docschema Core
//!
//! Core types for schema-driven document validation.
//!
//! A schema is a tree of [`Validator`]s. Each validator checks that a
//! document value has the right base type and then applies its attached
//! [`Constraint`]s. Structural validators (map, list) recurse into nested
//! values; include validators defer to a named sub-schema.
//!
//! ## Key Concepts
//!
//! - **Validator**: one type rule plus its refinements, identified by a tag
//! - **Constraint**: a refinement (bounds, length, excluded characters, pattern)
//! - **Schema**: a root validator plus named schemas for includes
//! - **Failure**: one structured mismatch between a document and a schema
//!
//! ## Example
//!
//! ```rust
//! use docschema_core::{SchemaBuilder, ValidatorBuilder, ValidatorKind};
//!
//! let schema = SchemaBuilder::new()
//!     .field(
//!         "name",
//!         ValidatorBuilder::new(ValidatorKind::String)
//!             .min_length(1)
//!             .build()
//!             .unwrap(),
//!     )
//!     .field(
//!         "age",
//!         ValidatorBuilder::new(ValidatorKind::Integer)
//!             .min(0)
//!             .optional(true)
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.root().fields().len(), 2);
//! ```

pub mod builder;
pub mod constraint;
pub mod context;
pub mod error;
pub mod failure;
pub mod registry;
pub mod schema;
pub mod validator;
pub mod value;

pub use builder::*;
pub use constraint::*;
pub use context::*;
pub use error::*;
pub use failure::*;
pub use registry::*;
pub use schema::*;
pub use validator::*;
pub use value::*;
