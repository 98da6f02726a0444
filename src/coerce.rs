//! The coercion engine: explicit, total-or-failing conversion between types.
//!
//! Rules:
//!
//! - numeric widening and narrowing; narrowing is overflow-checked, never a
//!   silent truncation
//! - any scalar → string via canonical formatting (always succeeds)
//! - string → scalar parses, failing on malformed input
//! - string ↔ bytes through UTF-8 (bytes → string fails on invalid UTF-8)
//! - scalar → array wraps the value as a single-element array
//! - array → array re-types every element (see [`coerce_elements`]), failing
//!   if any element fails
//! - struct and map coercion is identity-only
//!
//! Coercion is pure: inputs are never mutated and no rule is ever guessed.

use crate::error::ConversionError;
use crate::schema::Schema;
use crate::types::Type;
use crate::value::{TypedArray, TypedValue};

/// Coerce `value` to `target`.
///
/// Returns an equal value when the types already match; otherwise applies
/// the rule matrix above and fails with [`ConversionError`] when no rule
/// exists or the payload does not convert.
pub fn coerce(value: &TypedValue, target: Type) -> Result<TypedValue, ConversionError> {
    if value.r#type() == target {
        return Ok(value.clone());
    }
    match (value, target) {
        (TypedValue::Struct(_), _) | (_, Type::Struct) => Err(no_rule(value, target)),
        (TypedValue::Map(_), _) | (_, Type::Map) => Err(no_rule(value, target)),
        (TypedValue::Array(_), _) => Err(no_rule(value, target)),
        (v, Type::Array) => Ok(TypedValue::Array(TypedArray::of_single(v.clone()))),
        (TypedValue::Bytes(b), Type::String) => String::from_utf8(b.clone())
            .map(TypedValue::String)
            .map_err(|_| ConversionError::Unparsable {
                raw: format!("{} non-utf8 bytes", b.len()),
                target,
            }),
        (TypedValue::String(s), Type::Bytes) => Ok(TypedValue::Bytes(s.clone().into_bytes())),
        (TypedValue::Bytes(_), _) | (_, Type::Bytes) => Err(no_rule(value, target)),
        (v, Type::String) => match render_scalar(v) {
            Some(rendered) => Ok(TypedValue::String(rendered)),
            None => Err(no_rule(v, target)),
        },
        (TypedValue::String(s), t) => parse_scalar(s, t),
        (TypedValue::Bool(_), _) | (_, Type::Bool) => Err(no_rule(value, target)),
        (v, t) => coerce_number(v, t),
    }
}

/// Re-type every element of `array` to `item`, failing if any element fails.
pub fn coerce_elements(array: &TypedArray, item: Type) -> Result<TypedArray, ConversionError> {
    let mut out = Vec::with_capacity(array.len());
    for element in array.iter() {
        out.push(coerce(element, item)?);
    }
    let item_schema = match Schema::for_primitive(item) {
        Some(schema) => schema,
        None => match out.first() {
            Some(first) => first.schema(),
            None => {
                return Err(ConversionError::NoRule {
                    from: Type::Array,
                    to: item,
                });
            }
        },
    };
    TypedArray::from_values(item_schema, out).map_err(|_| ConversionError::NoRule {
        from: Type::Array,
        to: item,
    })
}

fn no_rule(value: &TypedValue, target: Type) -> ConversionError {
    ConversionError::NoRule {
        from: value.r#type(),
        to: target,
    }
}

fn render_scalar(value: &TypedValue) -> Option<String> {
    match value {
        TypedValue::Int16(v) => Some(v.to_string()),
        TypedValue::Int32(v) => Some(v.to_string()),
        TypedValue::Int64(v) => Some(v.to_string()),
        TypedValue::Float32(v) => Some(v.to_string()),
        TypedValue::Float64(v) => Some(v.to_string()),
        TypedValue::Bool(v) => Some(v.to_string()),
        _ => None,
    }
}

fn parse_scalar(raw: &str, target: Type) -> Result<TypedValue, ConversionError> {
    let unparsable = || ConversionError::Unparsable {
        raw: raw.to_string(),
        target,
    };
    match target {
        Type::Int16 => raw.parse::<i16>().map(TypedValue::Int16).map_err(|_| unparsable()),
        Type::Int32 => raw.parse::<i32>().map(TypedValue::Int32).map_err(|_| unparsable()),
        Type::Int64 => raw.parse::<i64>().map(TypedValue::Int64).map_err(|_| unparsable()),
        Type::Float32 => raw.parse::<f32>().map(TypedValue::Float32).map_err(|_| unparsable()),
        Type::Float64 => raw.parse::<f64>().map(TypedValue::Float64).map_err(|_| unparsable()),
        Type::Bool => {
            if raw.eq_ignore_ascii_case("true") {
                Ok(TypedValue::Bool(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Ok(TypedValue::Bool(false))
            } else {
                Err(unparsable())
            }
        }
        _ => Err(ConversionError::NoRule {
            from: Type::String,
            to: target,
        }),
    }
}

fn coerce_number(value: &TypedValue, target: Type) -> Result<TypedValue, ConversionError> {
    match value {
        TypedValue::Int16(v) => int_to(i64::from(*v), target),
        TypedValue::Int32(v) => int_to(i64::from(*v), target),
        TypedValue::Int64(v) => int_to(*v, target),
        TypedValue::Float32(v) => float_to(f64::from(*v), target),
        TypedValue::Float64(v) => float_to(*v, target),
        other => Err(no_rule(other, target)),
    }
}

fn int_to(v: i64, target: Type) -> Result<TypedValue, ConversionError> {
    let overflow = || ConversionError::Overflow {
        raw: v.to_string(),
        target,
    };
    match target {
        Type::Int16 => i16::try_from(v).map(TypedValue::Int16).map_err(|_| overflow()),
        Type::Int32 => i32::try_from(v).map(TypedValue::Int32).map_err(|_| overflow()),
        Type::Int64 => Ok(TypedValue::Int64(v)),
        Type::Float32 => Ok(TypedValue::Float32(v as f32)),
        Type::Float64 => Ok(TypedValue::Float64(v as f64)),
        _ => Err(ConversionError::NoRule {
            from: Type::Int64,
            to: target,
        }),
    }
}

fn float_to(v: f64, target: Type) -> Result<TypedValue, ConversionError> {
    match target {
        Type::Float64 => Ok(TypedValue::Float64(v)),
        Type::Float32 => {
            let narrowed = v as f32;
            if v.is_finite() && !narrowed.is_finite() {
                return Err(ConversionError::Overflow {
                    raw: v.to_string(),
                    target,
                });
            }
            Ok(TypedValue::Float32(narrowed))
        }
        Type::Int16 | Type::Int32 | Type::Int64 => {
            if !v.is_finite() || v.fract() != 0.0 {
                return Err(ConversionError::Unparsable {
                    raw: v.to_string(),
                    target,
                });
            }
            // i64::MAX is not exactly representable as f64; the first exact
            // double at or above it is 2^63, which must be rejected.
            if v < i64::MIN as f64 || v >= i64::MAX as f64 {
                return Err(ConversionError::Overflow {
                    raw: v.to_string(),
                    target,
                });
            }
            int_to(v as i64, target)
        }
        _ => Err(ConversionError::NoRule {
            from: Type::Float64,
            to: target,
        }),
    }
}
