//! Structured values: schema-shaped records.
//!
//! A [`TypedStruct`] stores its values positionally parallel to its
//! [`StructSchema`] fields (the same layout a tabular row uses against its
//! schema), so the "every payload key has a schema field and vice versa"
//! invariant holds by construction after every mutation.

use crate::error::DataError;
use crate::schema::{StructSchema, TypedField};
use crate::value::{TypedArray, TypedMap, TypedValue};

/// A structured value: a name-keyed mapping of typed values shaped by a
/// [`StructSchema`].
///
/// ```
/// use typed_records::TypedStruct;
///
/// # fn main() -> Result<(), typed_records::RecordError> {
/// let record = TypedStruct::new()
///     .with("id", 7_i64)?
///     .with("name", "ada")?;
///
/// assert!(record.has("name"));
/// assert_eq!(record.get_string("name")?, "ada");
/// assert_eq!(record.schema().index_of("name")?, Some(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypedStruct {
    schema: StructSchema,
    values: Vec<TypedValue>,
}

impl TypedStruct {
    /// Create an empty struct.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, consuming and returning `self` for chained
    /// construction.
    pub fn with(
        mut self,
        name: impl Into<String>,
        value: impl Into<TypedValue>,
    ) -> Result<Self, DataError> {
        self.put(name, value)?;
        Ok(self)
    }

    /// Insert or replace a field.
    ///
    /// Replacing an existing field keeps its index and updates the schema to
    /// the new value's schema; inserting appends at the next index. Fails
    /// with [`DataError`] on an empty field name.
    pub fn put(
        &mut self,
        name: impl Into<String>,
        value: impl Into<TypedValue>,
    ) -> Result<(), DataError> {
        let name = name.into();
        let value = value.into();
        match self.schema.index_of(&name)? {
            Some(index) => {
                self.schema.set(&name, value.schema())?;
                self.values[index] = value;
            }
            None => {
                self.schema.add(name, value.schema())?;
                self.values.push(value);
            }
        }
        Ok(())
    }

    /// `true` when a field with this name exists.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The value of a field, or `None` if absent.
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        let index = self.schema.index_of(name).ok().flatten()?;
        self.values.get(index)
    }

    /// Remove a field, returning its value. `None` when the field is absent;
    /// remaining fields keep their relative order with compacted indices.
    pub fn remove(&mut self, name: &str) -> Option<TypedValue> {
        let index = self.schema.remove(name)?;
        Some(self.values.remove(index))
    }

    /// Rename a field in place, preserving its index and value.
    ///
    /// Fails when `old` is absent or `new` collides with an existing field.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> Result<(), DataError> {
        self.schema.rename(old, new)?;
        Ok(())
    }

    /// String value of a field.
    pub fn get_string(&self, name: &str) -> Result<&str, DataError> {
        self.field_value(name)?.get_string()
    }

    /// `i64` value of a field.
    pub fn get_i64(&self, name: &str) -> Result<i64, DataError> {
        self.field_value(name)?.get_i64()
    }

    /// `f64` value of a field.
    pub fn get_f64(&self, name: &str) -> Result<f64, DataError> {
        self.field_value(name)?.get_f64()
    }

    /// `bool` value of a field.
    pub fn get_bool(&self, name: &str) -> Result<bool, DataError> {
        self.field_value(name)?.get_bool()
    }

    /// Array value of a field.
    pub fn get_array(&self, name: &str) -> Result<&TypedArray, DataError> {
        self.field_value(name)?.get_array()
    }

    /// Map value of a field.
    pub fn get_map(&self, name: &str) -> Result<&TypedMap, DataError> {
        self.field_value(name)?.get_map()
    }

    /// Struct value of a field.
    pub fn get_struct(&self, name: &str) -> Result<&TypedStruct, DataError> {
        self.field_value(name)?.get_struct()
    }

    /// The schema shaping this struct.
    pub fn schema(&self) -> &StructSchema {
        &self.schema
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when the struct has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(field, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (TypedField, &TypedValue)> {
        self.schema.fields().into_iter().zip(self.values.iter())
    }

    fn field_value(&self, name: &str) -> Result<&TypedValue, DataError> {
        self.get(name).ok_or_else(|| DataError::MissingField {
            name: name.to_string(),
        })
    }
}
