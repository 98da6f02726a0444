//! Read/write expressions evaluated against structured values.
//!
//! Two expression variants exist, modeled as a closed enum:
//!
//! - [`Expression::Literal`]: a fixed string, readable in any context and
//!   convertible to other types through the context's converter chain;
//!   writing through a literal is unsupported.
//! - [`Expression::Path`]: a dotted field path (written `$.a.b.c`) resolved
//!   recursively against nested structs for both read and write.
//!
//! Scalar functions (lowercase and friends) live in [`function`].

mod accessor;
mod converter;
pub mod function;

pub use accessor::{PropertyAccessor, TypedStructAccessor};
pub use converter::{PropertyConverter, ScalarConverter, convert_with};

use std::fmt;

use crate::error::{RecordResult, UnsupportedOperationError};
use crate::record::TypedStruct;
use crate::types::Type;
use crate::value::TypedValue;

/// Evaluation-scoped services: the chain of property converters used to
/// coerce literal expressions to an expected type.
pub struct EvaluationContext {
    converters: Vec<Box<dyn PropertyConverter>>,
}

impl EvaluationContext {
    /// A context with the default converter chain ([`ScalarConverter`]).
    pub fn new() -> Self {
        Self {
            converters: vec![Box::new(ScalarConverter)],
        }
    }

    /// Append a converter to the chain. Converters are consulted in order;
    /// the first one accepting a conversion wins.
    pub fn with_converter(mut self, converter: Box<dyn PropertyConverter>) -> Self {
        self.converters.push(converter);
        self
    }

    /// The converter chain, in consultation order.
    pub fn converters(&self) -> &[Box<dyn PropertyConverter>] {
        &self.converters
    }
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EvaluationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationContext")
            .field("converters_len", &self.converters.len())
            .finish()
    }
}

/// A parsed expression: either a fixed literal or a dotted field path.
///
/// ```
/// use typed_records::{EvaluationContext, Expression, TypedStruct};
///
/// # fn main() -> Result<(), typed_records::RecordError> {
/// let context = EvaluationContext::new();
/// let user = TypedStruct::new().with("name", "al")?;
/// let record = TypedStruct::new().with("user", user)?;
///
/// let value = Expression::parse("$.user.name").read_value(&context, &record)?;
/// assert_eq!(value.get_string()?, "al");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A fixed string value.
    Literal(LiteralExpression),
    /// A dotted field path into a struct.
    Path(PathExpression),
}

impl Expression {
    /// Parse an expression: strings starting with `$.` are field paths,
    /// everything else is a literal.
    pub fn parse(raw: &str) -> Expression {
        match raw.strip_prefix("$.") {
            Some(path) => Expression::Path(PathExpression {
                path: path.to_string(),
            }),
            None => Expression::Literal(LiteralExpression {
                value: raw.to_string(),
            }),
        }
    }

    /// Evaluate the expression against `target`.
    ///
    /// A literal reads as a string value regardless of the target; a path
    /// resolves (possibly nested) fields, failing with
    /// [`crate::error::AccessError`] when the path cannot be resolved.
    pub fn read_value(
        &self,
        context: &EvaluationContext,
        target: &TypedStruct,
    ) -> RecordResult<TypedValue> {
        match self {
            Expression::Literal(literal) => Ok(TypedValue::String(literal.value.clone())),
            Expression::Path(path) => {
                let accessor = TypedStructAccessor;
                Ok(accessor.read(context, target, &path.path)?)
            }
        }
    }

    /// Evaluate the expression and convert the result to `expected`.
    ///
    /// A literal returns its raw string unchanged when `expected` is
    /// [`Type::String`]; otherwise it is routed through the context's
    /// converter chain. A path result goes through the ordinary coercion
    /// engine.
    pub fn read_value_as(
        &self,
        context: &EvaluationContext,
        target: &TypedStruct,
        expected: Type,
    ) -> RecordResult<TypedValue> {
        match self {
            Expression::Literal(literal) => {
                if expected == Type::String {
                    return Ok(TypedValue::String(literal.value.clone()));
                }
                Ok(convert_with(context.converters(), &literal.value, expected)?)
            }
            Expression::Path(_) => {
                let value = self.read_value(context, target)?;
                Ok(value.as_type(expected)?)
            }
        }
    }

    /// Write `value` through the expression into `target`.
    ///
    /// Only path expressions are writable; a dotted path creates missing
    /// intermediate structs and installs them into their parents, so the
    /// write is always observable on a subsequent read. Literals fail with
    /// [`UnsupportedOperationError`].
    pub fn write_value(
        &self,
        context: &EvaluationContext,
        target: &mut TypedStruct,
        value: impl Into<TypedValue>,
    ) -> RecordResult<()> {
        match self {
            Expression::Literal(literal) => Err(UnsupportedOperationError {
                expression: literal.value.clone(),
                operation: "write",
            }
            .into()),
            Expression::Path(path) => {
                let accessor = TypedStructAccessor;
                accessor.write(context, target, &path.path, value.into())?;
                Ok(())
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(literal) => f.write_str(&literal.value),
            Expression::Path(path) => write!(f, "$.{}", path.path),
        }
    }
}

/// A fixed string expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralExpression {
    value: String,
}

impl LiteralExpression {
    /// The literal text.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A dotted field path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    path: String,
}

impl PathExpression {
    /// The path, without the `$.` prefix.
    pub fn path(&self) -> &str {
        &self.path
    }
}
