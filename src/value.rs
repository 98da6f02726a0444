//! Dynamically-typed values.
//!
//! A [`TypedValue`] is a tagged union: the enum tag *is* the value's
//! [`Type`], so a payload can never disagree with its declared type. Values
//! are immutable snapshots; "mutating" a struct field replaces the entry.
//!
//! Accessors never coerce — a [`DataError`] is returned on any tag mismatch.
//! Explicit conversion goes through [`TypedValue::as_type`].

use crate::coerce;
use crate::error::{ConversionError, DataError};
use crate::record::TypedStruct;
use crate::schema::Schema;
use crate::types::Type;

/// A dynamically-typed value: type tag, payload and (for containers) the
/// nested schema.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// 16-bit signed integer.
    Int16(i16),
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// 32-bit float.
    Float32(f32),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    String(String),
    /// Opaque binary data.
    Bytes(Vec<u8>),
    /// Ordered values sharing one item schema.
    Array(TypedArray),
    /// String-keyed values sharing one value schema.
    Map(TypedMap),
    /// Structured value shaped by a [`crate::schema::StructSchema`].
    Struct(TypedStruct),
}

impl TypedValue {
    /// The value's type tag.
    pub fn r#type(&self) -> Type {
        match self {
            TypedValue::Int16(_) => Type::Int16,
            TypedValue::Int32(_) => Type::Int32,
            TypedValue::Int64(_) => Type::Int64,
            TypedValue::Float32(_) => Type::Float32,
            TypedValue::Float64(_) => Type::Float64,
            TypedValue::Bool(_) => Type::Bool,
            TypedValue::String(_) => Type::String,
            TypedValue::Bytes(_) => Type::Bytes,
            TypedValue::Array(_) => Type::Array,
            TypedValue::Map(_) => Type::Map,
            TypedValue::Struct(_) => Type::Struct,
        }
    }

    /// The full (recursive) schema describing this value.
    pub fn schema(&self) -> Schema {
        match self {
            TypedValue::Int16(_) => Schema::Int16,
            TypedValue::Int32(_) => Schema::Int32,
            TypedValue::Int64(_) => Schema::Int64,
            TypedValue::Float32(_) => Schema::Float32,
            TypedValue::Float64(_) => Schema::Float64,
            TypedValue::Bool(_) => Schema::Bool,
            TypedValue::String(_) => Schema::String,
            TypedValue::Bytes(_) => Schema::Bytes,
            TypedValue::Array(array) => Schema::array_of(array.item().clone()),
            TypedValue::Map(map) => Schema::map_of(map.value_schema().clone()),
            TypedValue::Struct(s) => Schema::Struct(s.schema().clone()),
        }
    }

    /// Coerce this value to `target`, returning an equal value when the
    /// types already match. See [`crate::coerce`] for the rule matrix.
    pub fn as_type(&self, target: Type) -> Result<TypedValue, ConversionError> {
        coerce::coerce(self, target)
    }

    /// Borrow the payload as a string.
    pub fn get_string(&self) -> Result<&str, DataError> {
        match self {
            TypedValue::String(s) => Ok(s),
            other => Err(other.mismatch(Type::String)),
        }
    }

    /// Payload as `i16`.
    pub fn get_i16(&self) -> Result<i16, DataError> {
        match self {
            TypedValue::Int16(v) => Ok(*v),
            other => Err(other.mismatch(Type::Int16)),
        }
    }

    /// Payload as `i32`.
    pub fn get_i32(&self) -> Result<i32, DataError> {
        match self {
            TypedValue::Int32(v) => Ok(*v),
            other => Err(other.mismatch(Type::Int32)),
        }
    }

    /// Payload as `i64`.
    pub fn get_i64(&self) -> Result<i64, DataError> {
        match self {
            TypedValue::Int64(v) => Ok(*v),
            other => Err(other.mismatch(Type::Int64)),
        }
    }

    /// Payload as `f32`.
    pub fn get_f32(&self) -> Result<f32, DataError> {
        match self {
            TypedValue::Float32(v) => Ok(*v),
            other => Err(other.mismatch(Type::Float32)),
        }
    }

    /// Payload as `f64`.
    pub fn get_f64(&self) -> Result<f64, DataError> {
        match self {
            TypedValue::Float64(v) => Ok(*v),
            other => Err(other.mismatch(Type::Float64)),
        }
    }

    /// Payload as `bool`.
    pub fn get_bool(&self) -> Result<bool, DataError> {
        match self {
            TypedValue::Bool(v) => Ok(*v),
            other => Err(other.mismatch(Type::Bool)),
        }
    }

    /// Borrow the payload as bytes.
    pub fn get_bytes(&self) -> Result<&[u8], DataError> {
        match self {
            TypedValue::Bytes(b) => Ok(b),
            other => Err(other.mismatch(Type::Bytes)),
        }
    }

    /// Borrow the payload as an array.
    pub fn get_array(&self) -> Result<&TypedArray, DataError> {
        match self {
            TypedValue::Array(a) => Ok(a),
            other => Err(other.mismatch(Type::Array)),
        }
    }

    /// Borrow the payload as a map.
    pub fn get_map(&self) -> Result<&TypedMap, DataError> {
        match self {
            TypedValue::Map(m) => Ok(m),
            other => Err(other.mismatch(Type::Map)),
        }
    }

    /// Borrow the payload as a struct.
    pub fn get_struct(&self) -> Result<&TypedStruct, DataError> {
        match self {
            TypedValue::Struct(s) => Ok(s),
            other => Err(other.mismatch(Type::Struct)),
        }
    }

    /// Take the payload as an owned struct.
    pub fn into_struct(self) -> Result<TypedStruct, DataError> {
        match self {
            TypedValue::Struct(s) => Ok(s),
            other => Err(other.mismatch(Type::Struct)),
        }
    }

    fn mismatch(&self, expected: Type) -> DataError {
        DataError::TypeMismatch {
            expected,
            actual: self.r#type(),
        }
    }
}

impl From<i16> for TypedValue {
    fn from(v: i16) -> Self {
        TypedValue::Int16(v)
    }
}

impl From<i32> for TypedValue {
    fn from(v: i32) -> Self {
        TypedValue::Int32(v)
    }
}

impl From<i64> for TypedValue {
    fn from(v: i64) -> Self {
        TypedValue::Int64(v)
    }
}

impl From<f32> for TypedValue {
    fn from(v: f32) -> Self {
        TypedValue::Float32(v)
    }
}

impl From<f64> for TypedValue {
    fn from(v: f64) -> Self {
        TypedValue::Float64(v)
    }
}

impl From<bool> for TypedValue {
    fn from(v: bool) -> Self {
        TypedValue::Bool(v)
    }
}

impl From<String> for TypedValue {
    fn from(v: String) -> Self {
        TypedValue::String(v)
    }
}

impl From<&str> for TypedValue {
    fn from(v: &str) -> Self {
        TypedValue::String(v.to_string())
    }
}

impl From<Vec<u8>> for TypedValue {
    fn from(v: Vec<u8>) -> Self {
        TypedValue::Bytes(v)
    }
}

impl From<TypedArray> for TypedValue {
    fn from(v: TypedArray) -> Self {
        TypedValue::Array(v)
    }
}

impl From<TypedMap> for TypedValue {
    fn from(v: TypedMap) -> Self {
        TypedValue::Map(v)
    }
}

impl From<TypedStruct> for TypedValue {
    fn from(v: TypedStruct) -> Self {
        TypedValue::Struct(v)
    }
}

impl From<Vec<&str>> for TypedValue {
    fn from(items: Vec<&str>) -> Self {
        TypedValue::Array(TypedArray::of_strings(items))
    }
}

impl From<Vec<String>> for TypedValue {
    fn from(items: Vec<String>) -> Self {
        TypedValue::Array(TypedArray::of_strings(items))
    }
}

/// An ordered collection of values sharing one item schema.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedArray {
    item: Schema,
    items: Vec<TypedValue>,
}

impl TypedArray {
    /// Create an empty array with the given item schema.
    pub fn new(item: Schema) -> Self {
        Self {
            item,
            items: Vec::new(),
        }
    }

    /// Create an array from pre-built values, checking every element against
    /// the item schema's type.
    pub fn from_values(item: Schema, values: Vec<TypedValue>) -> Result<Self, DataError> {
        let mut array = Self::new(item);
        for value in values {
            array.push(value)?;
        }
        Ok(array)
    }

    /// An array holding a single value, typed after that value.
    pub fn of_single(value: TypedValue) -> Self {
        Self {
            item: value.schema(),
            items: vec![value],
        }
    }

    /// A string array from anything string-like.
    pub fn of_strings<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        Self {
            item: Schema::String,
            items: items
                .into_iter()
                .map(|s| TypedValue::String(s.into()))
                .collect(),
        }
    }

    /// Append a value whose type matches the item schema.
    pub fn push(&mut self, value: TypedValue) -> Result<(), DataError> {
        if value.r#type() != self.item.r#type() {
            return Err(DataError::ItemTypeMismatch {
                expected: self.item.r#type(),
                actual: value.r#type(),
            });
        }
        self.items.push(value);
        Ok(())
    }

    /// Item schema shared by every element.
    pub fn item(&self) -> &Schema {
        &self.item
    }

    /// Elements in order.
    pub fn items(&self) -> &[TypedValue] {
        &self.items
    }

    /// Take ownership of the elements.
    pub fn into_items(self) -> Vec<TypedValue> {
        self.items
    }

    /// Element at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&TypedValue> {
        self.items.get(index)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &TypedValue> {
        self.items.iter()
    }
}

/// A string-keyed, insertion-ordered collection of values sharing one value
/// schema.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedMap {
    value: Schema,
    entries: Vec<(String, TypedValue)>,
}

impl TypedMap {
    /// Create an empty map with the given value schema.
    pub fn new(value: Schema) -> Self {
        Self {
            value,
            entries: Vec::new(),
        }
    }

    /// Insert or replace an entry, checking the value against the value
    /// schema's type.
    pub fn insert(&mut self, key: impl Into<String>, value: TypedValue) -> Result<(), DataError> {
        if value.r#type() != self.value.r#type() {
            return Err(DataError::ItemTypeMismatch {
                expected: self.value.r#type(),
                actual: value.r#type(),
            });
        }
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        Ok(())
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Value schema shared by every entry.
    pub fn value_schema(&self) -> &Schema {
        &self.value
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[(String, TypedValue)] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
