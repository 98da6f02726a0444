//! Property converters: pluggable coercion of literal expression text.

use crate::coerce;
use crate::error::ConversionError;
use crate::types::Type;
use crate::value::TypedValue;

/// Converts a raw literal string into a typed value of a requested type.
///
/// Converters form a chain on the evaluation context; the first converter
/// accepting a `(value, target)` pair performs the conversion.
pub trait PropertyConverter {
    /// Whether this converter can attempt `value` → `target`.
    fn can_convert(&self, value: &str, target: Type) -> bool;

    /// Convert `value` to `target`.
    fn convert(&self, value: &str, target: Type) -> Result<TypedValue, ConversionError>;
}

/// The default converter: parses literals into any primitive type through
/// the string→scalar rules of the coercion engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScalarConverter;

impl PropertyConverter for ScalarConverter {
    fn can_convert(&self, _value: &str, target: Type) -> bool {
        target.is_primitive()
    }

    fn convert(&self, value: &str, target: Type) -> Result<TypedValue, ConversionError> {
        coerce::coerce(&TypedValue::String(value.to_string()), target)
    }
}

/// Walk `converters` in order and apply the first one accepting the
/// conversion. Fails with [`ConversionError::NoConverter`] when none does.
pub fn convert_with(
    converters: &[Box<dyn PropertyConverter>],
    value: &str,
    target: Type,
) -> Result<TypedValue, ConversionError> {
    for converter in converters {
        if converter.can_convert(value, target) {
            return converter.convert(value, target);
        }
    }
    Err(ConversionError::NoConverter {
        raw: value.to_string(),
        target,
    })
}
