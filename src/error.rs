use thiserror::Error;

use crate::types::Type;

/// Convenience result type for record operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Umbrella error type covering every failure the record core can produce.
///
/// Each variant wraps one of the dedicated error types, so a surrounding
/// pipeline can classify failures (skip, dead-letter, abort) without string
/// matching. All failures are immediate and local to the single record being
/// processed; the core never retries or degrades.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Structural schema violation.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Shape/type mismatch between a value's declared type and requested access.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Coercion between two types failed.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A path expression could not resolve a field on its target.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// The operation is not implemented for this expression variant.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedOperationError),
}

/// Structural violations of a [`crate::schema::StructSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A field name was empty.
    #[error("field name cannot be empty")]
    EmptyFieldName,

    /// Adding a field whose name already exists.
    #[error("cannot add field '{name}': a field with that name already exists")]
    DuplicateField { name: String },

    /// An operation referenced a field the schema does not contain.
    #[error("schema has no field named '{name}'")]
    UnknownField { name: String },

    /// Renaming a field to a name that already exists (fail closed).
    #[error("cannot rename field '{from}' to '{to}': a field with that name already exists")]
    RenameCollision { from: String, to: String },
}

/// Shape/type mismatches between a typed value and the requested access,
/// plus unmergeable field combinations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// An accessor asked for a different shape than the value carries.
    #[error("expected a {expected} value, found {actual}")]
    TypeMismatch { expected: Type, actual: Type },

    /// A typed getter referenced a field the struct does not contain.
    #[error("struct has no field named '{name}'")]
    MissingField { name: String },

    /// An element of the wrong type was pushed into a typed array or map.
    #[error("container of {expected} cannot hold a {actual} element")]
    ItemTypeMismatch { expected: Type, actual: Type },

    /// Two struct fields could not be merged: no coercion bridges their types.
    #[error("cannot merge field '{field}': {left} and {right} have no common representation")]
    Unmergeable {
        field: String,
        left: Type,
        right: Type,
    },

    /// An external value (e.g. JSON) has no representation in the value model.
    #[error("unrepresentable value: {message}")]
    Unrepresentable { message: String },

    /// Schema violation raised while mutating a struct.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Coercion between two types failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// No coercion rule is defined between the two types.
    #[error("no coercion rule from {from} to {to}")]
    NoRule { from: Type, to: Type },

    /// The payload does not parse as the target type.
    #[error("value '{raw}' cannot be parsed as {target}")]
    Unparsable { raw: String, target: Type },

    /// A narrowing conversion would overflow the target type.
    #[error("value {raw} is out of range for {target}")]
    Overflow { raw: String, target: Type },

    /// No converter in the chain accepted the literal.
    #[error("no property converter accepts '{raw}' as {target}")]
    NoConverter { raw: String, target: Type },
}

/// A path expression could not resolve a field on its target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The path does not resolve to a field.
    #[error("cannot access field '{path}'")]
    CannotAccess { path: String },

    /// The path could not be written through.
    #[error("cannot write field '{path}': {message}")]
    CannotWrite { path: String, message: String },
}

/// An operation that is structurally valid on expressions in general but not
/// implemented for this particular expression variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expression '{expression}' does not support {operation}")]
pub struct UnsupportedOperationError {
    /// The original expression text.
    pub expression: String,
    /// The unsupported operation, e.g. `"write"`.
    pub operation: &'static str,
}
