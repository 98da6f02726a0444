//! Combining two structs into one.
//!
//! Per-field semantics:
//!
//! - a field present on only one side is copied as-is
//! - a field present on both sides whose name is in the override set takes
//!   the right side's value, discarding the left
//! - two non-array values fold into a two-element array, left value first
//! - an array on one side absorbs the scalar from the other, preserving the
//!   array's element order: a right scalar is appended after a left array, a
//!   left scalar is prepended before a right array
//! - two arrays concatenate, left elements first
//!
//! The merged struct lists the left side's fields first, then the right
//! side's fields not present on the left, in their original order. Results
//! are buffered into a fresh struct, so a failed merge leaves both operands
//! untouched.

use std::collections::HashSet;

use crate::coerce;
use crate::error::DataError;
use crate::record::TypedStruct;
use crate::types::Type;
use crate::value::{TypedArray, TypedValue};

/// Merge `left` and `right` into a new struct.
///
/// Field names listed in `override_fields` take the right side's value when
/// present on both sides; all other shared fields fold into arrays as
/// described in the module docs. Fails with [`DataError`] when a shared
/// field's types cannot be bridged by any coercion (e.g. struct vs. number).
///
/// ```
/// use std::collections::HashSet;
/// use typed_records::{merge, TypedStruct};
///
/// # fn main() -> Result<(), typed_records::RecordError> {
/// let left = TypedStruct::new().with("a", "value-a")?;
/// let right = TypedStruct::new().with("a", "value-b")?;
///
/// let merged = merge(&left, &right, &HashSet::new())?;
/// let folded = merged.get_array("a")?;
/// assert_eq!(folded.len(), 2);
/// assert_eq!(folded.get(0).unwrap().get_string()?, "value-a");
/// assert_eq!(folded.get(1).unwrap().get_string()?, "value-b");
/// # Ok(())
/// # }
/// ```
pub fn merge(
    left: &TypedStruct,
    right: &TypedStruct,
    override_fields: &HashSet<String>,
) -> Result<TypedStruct, DataError> {
    let mut merged = TypedStruct::new();

    for (field, left_value) in left.iter() {
        let name = field.name();
        match right.get(name) {
            None => merged.put(name, left_value.clone())?,
            Some(right_value) if override_fields.contains(name) => {
                merged.put(name, right_value.clone())?;
            }
            Some(right_value) => {
                let folded = merge_values(name, left_value, right_value)?;
                merged.put(name, folded)?;
            }
        }
    }

    for (field, right_value) in right.iter() {
        if !left.has(field.name()) {
            merged.put(field.name(), right_value.clone())?;
        }
    }

    Ok(merged)
}

fn merge_values(
    name: &str,
    left: &TypedValue,
    right: &TypedValue,
) -> Result<TypedValue, DataError> {
    match (left, right) {
        (TypedValue::Array(left_array), TypedValue::Array(right_array)) => {
            let mut folded = left_array.clone();
            let aligned = align_array(name, right_array, left_array.item().r#type(), left, right)?;
            for element in aligned.into_items() {
                folded.push(element)?;
            }
            Ok(TypedValue::Array(folded))
        }
        (TypedValue::Array(left_array), scalar) => {
            let mut folded = left_array.clone();
            let element = align_scalar(name, scalar, left_array.item().r#type(), left, right)?;
            folded.push(element)?;
            Ok(TypedValue::Array(folded))
        }
        (scalar, TypedValue::Array(right_array)) => {
            let element = align_scalar(name, scalar, right_array.item().r#type(), left, right)?;
            let mut items = Vec::with_capacity(right_array.len() + 1);
            items.push(element);
            items.extend(right_array.items().iter().cloned());
            Ok(TypedValue::Array(TypedArray::from_values(
                right_array.item().clone(),
                items,
            )?))
        }
        (left_value, right_value) => {
            let aligned_right = if left_value.r#type() == right_value.r#type() {
                right_value.clone()
            } else {
                align_scalar(name, right_value, left_value.r#type(), left, right)?
            };
            Ok(TypedValue::Array(TypedArray::from_values(
                left_value.schema(),
                vec![left_value.clone(), aligned_right],
            )?))
        }
    }
}

fn align_scalar(
    name: &str,
    value: &TypedValue,
    target: Type,
    left: &TypedValue,
    right: &TypedValue,
) -> Result<TypedValue, DataError> {
    if value.r#type() == target {
        return Ok(value.clone());
    }
    coerce::coerce(value, target).map_err(|_| unmergeable(name, left, right))
}

fn align_array(
    name: &str,
    array: &TypedArray,
    target: Type,
    left: &TypedValue,
    right: &TypedValue,
) -> Result<TypedArray, DataError> {
    if array.item().r#type() == target {
        return Ok(array.clone());
    }
    coerce::coerce_elements(array, target).map_err(|_| unmergeable(name, left, right))
}

fn unmergeable(name: &str, left: &TypedValue, right: &TypedValue) -> DataError {
    DataError::Unmergeable {
        field: name.to_string(),
        left: left.r#type(),
        right: right.r#type(),
    }
}
