//! `typed-records` is a small library giving record pipelines a uniform,
//! type-safe view of heterogeneous data without a fixed compile-time schema.
//!
//! Rows parsed from arbitrary sources are wrapped as dynamically-typed
//! [`value::TypedValue`]s and assembled into [`record::TypedStruct`]s shaped
//! by a mutable, positionally-indexed [`schema::StructSchema`]. On top of
//! that data model sit three engines:
//!
//! - **Coercion** ([`coerce`]): explicit, total-or-failing conversion
//!   between types — numeric widening/narrowing with overflow checks,
//!   string parsing/formatting, scalar-to-array wrapping.
//! - **Merge** ([`merge()`]): deterministic combination of two structs, with
//!   per-field array-folding or right-wins override semantics.
//! - **Expressions** ([`expression`]): literal and dotted-path expressions
//!   (`$.user.name`) that read and write possibly-nested fields through the
//!   same type system, plus a library of scalar functions.
//!
//! ## Quick example: build, address, merge
//!
//! ```
//! use std::collections::HashSet;
//! use typed_records::{merge, EvaluationContext, Expression, TypedStruct, Type};
//!
//! # fn main() -> Result<(), typed_records::RecordError> {
//! // Assemble a record; the schema grows field by field.
//! let left = TypedStruct::new()
//!     .with("id", 7_i64)?
//!     .with("host", "SERVER-01")?;
//!
//! // Address nested fields with dotted paths, creating structure on write.
//! let context = EvaluationContext::new();
//! let mut right = TypedStruct::new().with("id", 7_i64)?;
//! Expression::parse("$.meta.source").write_value(&context, &mut right, "syslog")?;
//! let source = Expression::parse("$.meta.source").read_value(&context, &right)?;
//! assert_eq!(source.get_string()?, "syslog");
//!
//! // Merge two sources: shared non-override fields fold into arrays.
//! let merged = merge(&left, &right, &HashSet::new())?;
//! assert_eq!(merged.get_array("id")?.len(), 2);
//! assert_eq!(merged.get_struct("meta")?.get_string("source")?, "syslog");
//!
//! // Convert explicitly; nothing is ever coerced behind your back.
//! let id = left.get("id").unwrap().as_type(Type::String)?;
//! assert_eq!(id.get_string()?, "7");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: the closed enumeration of value kinds
//! - [`schema`]: structural schemas with ordered, name-indexed fields
//! - [`value`]: the typed value union and its containers
//! - [`coerce`]: the coercion rule matrix
//! - [`record`]: structured values ([`TypedStruct`])
//! - [`mod@merge`]: the struct merge engine
//! - [`expression`]: literal/path expressions, accessors, converters and
//!   scalar functions
//! - [`json`]: `serde_json` interop and `serde::Serialize` support
//! - [`error`]: the error taxonomy shared across the crate
//!
//! ## Error taxonomy
//!
//! Every failure is one of five typed errors — [`SchemaError`],
//! [`DataError`], [`ConversionError`], [`AccessError`],
//! [`UnsupportedOperationError`] — collected under the [`RecordError`]
//! umbrella so surrounding pipelines can classify and route failures
//! (skip/dead-letter/abort) per record. The core itself never retries and
//! never guesses a conversion.

pub mod coerce;
pub mod error;
pub mod expression;
pub mod json;
pub mod merge;
pub mod record;
pub mod schema;
pub mod types;
pub mod value;

pub use error::{
    AccessError, ConversionError, DataError, RecordError, RecordResult, SchemaError,
    UnsupportedOperationError,
};
pub use expression::{EvaluationContext, Expression};
pub use merge::merge;
pub use record::TypedStruct;
pub use schema::{Schema, StructSchema, TypedField};
pub use types::Type;
pub use value::{TypedArray, TypedMap, TypedValue};
