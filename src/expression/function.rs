//! Scalar functions callable from expressions, e.g. `lowercase`.
//!
//! A function declares the [`Type`] it expects its field argument to already
//! be, validates its call arguments once per invocation site in
//! [`ExpressionFunction::prepare`], and transforms one field value per
//! record in [`ExpressionFunction::apply`]. Functions are pure and never
//! coerce: a field of the wrong type surfaces as a deterministic
//! [`crate::error::DataError`] from `apply`.

use crate::error::RecordResult;
use crate::types::Type;
use crate::value::TypedValue;

/// One named, already-evaluated call argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    name: String,
    value: TypedValue,
}

impl Argument {
    /// Create an argument.
    pub fn new(name: impl Into<String>, value: impl Into<TypedValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Argument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Argument value.
    pub fn value(&self) -> &TypedValue {
        &self.value
    }
}

/// An ordered, name-or-position addressable bag of call arguments, scoped to
/// a single function invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Vec<Argument>);

impl Arguments {
    /// No arguments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Arguments from a list.
    pub fn of(arguments: Vec<Argument>) -> Self {
        Self(arguments)
    }

    /// Append an argument.
    pub fn push(&mut self, argument: Argument) {
        self.0.push(argument);
    }

    /// Value of the argument named `name`, if any.
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.0.iter().find(|a| a.name == name).map(|a| &a.value)
    }

    /// Argument at `position`, if any.
    pub fn at(&self, position: usize) -> Option<&Argument> {
        self.0.get(position)
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no arguments were passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A scalar function over one field value.
pub trait ExpressionFunction {
    /// Name the function is registered and called by.
    fn name(&self) -> &'static str;

    /// The type the field argument is expected to already be. Callers are
    /// responsible for matching it; `apply` never coerces.
    fn expected_type(&self) -> Type;

    /// Validate and transform the literal call arguments, once per
    /// invocation site.
    fn prepare(&self, _args: &[TypedValue]) -> RecordResult<Arguments> {
        Ok(Arguments::empty())
    }

    /// Transform one field value. Executed per record.
    fn apply(&self, field: &TypedValue, args: &Arguments) -> RecordResult<TypedValue>;
}

/// Lowercase a string field.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lowercase;

impl ExpressionFunction for Lowercase {
    fn name(&self) -> &'static str {
        "lowercase"
    }

    fn expected_type(&self) -> Type {
        Type::String
    }

    fn apply(&self, field: &TypedValue, _args: &Arguments) -> RecordResult<TypedValue> {
        Ok(TypedValue::String(field.get_string()?.to_lowercase()))
    }
}

/// Uppercase a string field.
#[derive(Debug, Default, Clone, Copy)]
pub struct Uppercase;

impl ExpressionFunction for Uppercase {
    fn name(&self) -> &'static str {
        "uppercase"
    }

    fn expected_type(&self) -> Type {
        Type::String
    }

    fn apply(&self, field: &TypedValue, _args: &Arguments) -> RecordResult<TypedValue> {
        Ok(TypedValue::String(field.get_string()?.to_uppercase()))
    }
}

/// Trim leading and trailing whitespace from a string field.
#[derive(Debug, Default, Clone, Copy)]
pub struct Trim;

impl ExpressionFunction for Trim {
    fn name(&self) -> &'static str {
        "trim"
    }

    fn expected_type(&self) -> Type {
        Type::String
    }

    fn apply(&self, field: &TypedValue, _args: &Arguments) -> RecordResult<TypedValue> {
        Ok(TypedValue::String(field.get_string()?.trim().to_string()))
    }
}

/// Length of a string field, in bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Length;

impl ExpressionFunction for Length {
    fn name(&self) -> &'static str {
        "length"
    }

    fn expected_type(&self) -> Type {
        Type::String
    }

    fn apply(&self, field: &TypedValue, _args: &Arguments) -> RecordResult<TypedValue> {
        Ok(TypedValue::Int32(field.get_string()?.len() as i32))
    }
}

/// Case-insensitive registry of scalar functions.
pub struct FunctionRegistry {
    functions: Vec<Box<dyn ExpressionFunction>>,
}

impl FunctionRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            functions: Vec::new(),
        }
    }

    /// Register a function.
    pub fn register(&mut self, function: Box<dyn ExpressionFunction>) {
        self.functions.push(function);
    }

    /// Find a function by name, case-insensitively.
    pub fn find(&self, name: &str) -> Option<&dyn ExpressionFunction> {
        self.functions
            .iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
            .map(|f| f.as_ref())
    }
}

impl Default for FunctionRegistry {
    /// The built-in library: `lowercase`, `uppercase`, `trim`, `length`.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(Lowercase));
        registry.register(Box::new(Uppercase));
        registry.register(Box::new(Trim));
        registry.register(Box::new(Length));
        registry
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.functions.iter().map(|x| x.name()).collect();
        f.debug_struct("FunctionRegistry")
            .field("functions", &names)
            .finish()
    }
}
