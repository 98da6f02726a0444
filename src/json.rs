//! JSON interop: build structs from parsed `serde_json` values and render
//! them back, plus `serde::Serialize` for handing values to any serde sink.
//!
//! Mapping notes:
//!
//! - JSON numbers become `Int64` when integral (unsigned values out of `i64`
//!   range are rejected), otherwise `Float64`
//! - JSON `null` has no counterpart in the value model and is rejected;
//!   absent fields are simply omitted
//! - heterogeneous JSON arrays are rejected (arrays carry one item schema)
//! - on output, bytes render as an array of numbers and a non-finite float
//!   renders as `null` (JSON has neither kind)

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::DataError;
use crate::record::TypedStruct;
use crate::value::{TypedArray, TypedMap, TypedValue};

/// Build a struct from a JSON object.
///
/// Fails with [`DataError`] when `value` is not an object or any member is
/// unrepresentable.
///
/// ```
/// # fn main() -> Result<(), typed_records::RecordError> {
/// let parsed: serde_json::Value =
///     serde_json::from_str(r#"{"id": 7, "user": {"name": "al"}}"#).unwrap();
/// let record = typed_records::json::struct_from_json(&parsed)?;
/// assert_eq!(record.get_struct("user")?.get_string("name")?, "al");
/// # Ok(())
/// # }
/// ```
pub fn struct_from_json(value: &serde_json::Value) -> Result<TypedStruct, DataError> {
    let object = value.as_object().ok_or_else(|| DataError::Unrepresentable {
        message: format!("expected a json object, got {}", json_kind(value)),
    })?;
    let mut record = TypedStruct::new();
    for (name, member) in object {
        record.put(name.clone(), value_from_json(member)?)?;
    }
    Ok(record)
}

/// Convert one JSON value into a typed value.
pub fn value_from_json(value: &serde_json::Value) -> Result<TypedValue, DataError> {
    match value {
        serde_json::Value::Null => Err(DataError::Unrepresentable {
            message: "json null has no typed representation".to_string(),
        }),
        serde_json::Value::Bool(b) => Ok(TypedValue::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(TypedValue::Int64(v))
            } else if let Some(v) = n.as_u64() {
                i64::try_from(v)
                    .map(TypedValue::Int64)
                    .map_err(|_| DataError::Unrepresentable {
                        message: format!("integer {v} is out of range for int64"),
                    })
            } else if let Some(v) = n.as_f64() {
                Ok(TypedValue::Float64(v))
            } else {
                Err(DataError::Unrepresentable {
                    message: format!("number {n} is not representable"),
                })
            }
        }
        serde_json::Value::String(s) => Ok(TypedValue::String(s.clone())),
        serde_json::Value::Array(items) => {
            let mut converted = Vec::with_capacity(items.len());
            for item in items {
                converted.push(value_from_json(item)?);
            }
            let item_schema = match converted.first() {
                Some(first) => first.schema(),
                None => crate::schema::Schema::String,
            };
            let array = TypedArray::from_values(item_schema, converted).map_err(|e| match e {
                DataError::ItemTypeMismatch { expected, actual } => DataError::Unrepresentable {
                    message: format!(
                        "mixed-type json array: expected {expected}, found {actual}"
                    ),
                },
                other => other,
            })?;
            Ok(TypedValue::Array(array))
        }
        serde_json::Value::Object(_) => Ok(TypedValue::Struct(struct_from_json(value)?)),
    }
}

/// Render a struct as a JSON object.
pub fn struct_to_json(record: &TypedStruct) -> serde_json::Value {
    let mut object = serde_json::Map::with_capacity(record.len());
    for (field, value) in record.iter() {
        object.insert(field.name().to_string(), value_to_json(value));
    }
    serde_json::Value::Object(object)
}

/// Render one typed value as JSON.
pub fn value_to_json(value: &TypedValue) -> serde_json::Value {
    match value {
        TypedValue::Int16(v) => serde_json::Value::from(*v),
        TypedValue::Int32(v) => serde_json::Value::from(*v),
        TypedValue::Int64(v) => serde_json::Value::from(*v),
        TypedValue::Float32(v) => float_to_json(f64::from(*v)),
        TypedValue::Float64(v) => float_to_json(*v),
        TypedValue::Bool(v) => serde_json::Value::Bool(*v),
        TypedValue::String(v) => serde_json::Value::String(v.clone()),
        TypedValue::Bytes(v) => {
            serde_json::Value::Array(v.iter().map(|b| serde_json::Value::from(*b)).collect())
        }
        TypedValue::Array(array) => {
            serde_json::Value::Array(array.iter().map(value_to_json).collect())
        }
        TypedValue::Map(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (key, entry) in map.entries() {
                object.insert(key.clone(), value_to_json(entry));
            }
            serde_json::Value::Object(object)
        }
        TypedValue::Struct(record) => struct_to_json(record),
    }
}

fn float_to_json(v: f64) -> serde_json::Value {
    serde_json::Number::from_f64(v)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a bool",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypedValue::Int16(v) => serializer.serialize_i16(*v),
            TypedValue::Int32(v) => serializer.serialize_i32(*v),
            TypedValue::Int64(v) => serializer.serialize_i64(*v),
            TypedValue::Float32(v) => serializer.serialize_f32(*v),
            TypedValue::Float64(v) => serializer.serialize_f64(*v),
            TypedValue::Bool(v) => serializer.serialize_bool(*v),
            TypedValue::String(v) => serializer.serialize_str(v),
            TypedValue::Bytes(v) => serializer.serialize_bytes(v),
            TypedValue::Array(array) => array.serialize(serializer),
            TypedValue::Map(map) => map.serialize(serializer),
            TypedValue::Struct(record) => record.serialize(serializer),
        }
    }
}

impl Serialize for TypedArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self.iter() {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl Serialize for TypedMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.entries() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for TypedStruct {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::{struct_from_json, struct_to_json, value_from_json};
    use crate::error::DataError;
    use crate::schema::Schema;
    use crate::value::TypedValue;

    #[test]
    fn objects_round_trip_through_structs() {
        let parsed: serde_json::Value =
            serde_json::from_str(r#"{"id": 1, "name": "ada", "score": 1.5, "active": true}"#)
                .unwrap();
        let record = struct_from_json(&parsed).unwrap();

        assert_eq!(record.get_i64("id").unwrap(), 1);
        assert_eq!(record.get_string("name").unwrap(), "ada");
        assert_eq!(record.get_f64("score").unwrap(), 1.5);
        assert!(record.get_bool("active").unwrap());

        assert_eq!(struct_to_json(&record), parsed);
    }

    #[test]
    fn nested_objects_become_nested_structs() {
        let parsed: serde_json::Value =
            serde_json::from_str(r#"{"user": {"name": "al"}}"#).unwrap();
        let record = struct_from_json(&parsed).unwrap();
        assert_eq!(
            record.get_struct("user").unwrap().get_string("name").unwrap(),
            "al"
        );
    }

    #[test]
    fn arrays_require_a_uniform_item_type() {
        let uniform: serde_json::Value = serde_json::from_str(r#"{"tags": ["a", "b"]}"#).unwrap();
        let record = struct_from_json(&uniform).unwrap();
        let tags = record.get_array("tags").unwrap();
        assert_eq!(*tags.item(), Schema::String);
        assert_eq!(tags.len(), 2);

        let mixed: serde_json::Value = serde_json::from_str(r#"["a", 1]"#).unwrap();
        assert!(matches!(
            value_from_json(&mixed),
            Err(DataError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn null_is_rejected() {
        assert!(matches!(
            value_from_json(&serde_json::Value::Null),
            Err(DataError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn serde_serialize_matches_to_json() {
        let record = crate::record::TypedStruct::new()
            .with("id", 7_i64)
            .unwrap()
            .with("name", "ada")
            .unwrap();
        let via_serde = serde_json::to_value(&record).unwrap();
        assert_eq!(via_serde, struct_to_json(&record));
    }

    #[test]
    fn non_finite_floats_render_as_null() {
        let value = TypedValue::Float64(f64::NAN);
        assert_eq!(super::value_to_json(&value), serde_json::Value::Null);
    }
}
