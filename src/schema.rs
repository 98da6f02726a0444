//! Structural schemas: the shape description of a typed value.
//!
//! A [`Schema`] describes a value recursively; the interesting case is
//! [`StructSchema`], an insertion-ordered, name-indexed collection of typed
//! fields supporting add/set/rename/remove while keeping field indices a
//! dense, gap-free `0..len` sequence.
//!
//! Fields are stored as a positional sequence, so an index is always derived
//! from a field's current position and can never drift out of sync with it.
//! All mutators take `&mut self`: once a schema is shared behind `&`, it is
//! frozen by construction and safe to use as a hash-map key.

use std::hash::{Hash, Hasher};

use crate::error::SchemaError;
use crate::types::Type;

/// Recursive shape description of a [`crate::value::TypedValue`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    String,
    /// Opaque binary data.
    Bytes,
    /// Array with a uniform item schema.
    Array(Box<Schema>),
    /// String-keyed map with a uniform value schema.
    Map(Box<Schema>),
    /// Named, ordered fields.
    Struct(StructSchema),
}

impl Schema {
    /// The [`Type`] tag this schema describes.
    pub fn r#type(&self) -> Type {
        match self {
            Schema::Int16 => Type::Int16,
            Schema::Int32 => Type::Int32,
            Schema::Int64 => Type::Int64,
            Schema::Float32 => Type::Float32,
            Schema::Float64 => Type::Float64,
            Schema::Bool => Type::Bool,
            Schema::String => Type::String,
            Schema::Bytes => Type::Bytes,
            Schema::Array(_) => Type::Array,
            Schema::Map(_) => Type::Map,
            Schema::Struct(_) => Type::Struct,
        }
    }

    /// The schema for a primitive type, or `None` for array/map/struct
    /// (which need nested shape information a bare [`Type`] cannot supply).
    pub fn for_primitive(t: Type) -> Option<Schema> {
        match t {
            Type::Int16 => Some(Schema::Int16),
            Type::Int32 => Some(Schema::Int32),
            Type::Int64 => Some(Schema::Int64),
            Type::Float32 => Some(Schema::Float32),
            Type::Float64 => Some(Schema::Float64),
            Type::Bool => Some(Schema::Bool),
            Type::String => Some(Schema::String),
            Type::Bytes => Some(Schema::Bytes),
            Type::Array | Type::Map | Type::Struct => None,
        }
    }

    /// An array schema with the given item schema.
    pub fn array_of(item: Schema) -> Schema {
        Schema::Array(Box::new(item))
    }

    /// A map schema with the given value schema.
    pub fn map_of(value: Schema) -> Schema {
        Schema::Map(Box::new(value))
    }
}

/// A snapshot of a single field: its current index, name and schema.
///
/// The index reflects the field's position within the owning
/// [`StructSchema`] at the moment the snapshot was taken; removals compact
/// the indices of all later fields by one.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TypedField {
    index: usize,
    name: String,
    schema: Schema,
}

impl TypedField {
    /// Position of the field within its schema.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Field name, unique within its schema.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// Insertion-ordered, name-indexed collection of typed fields, plus optional
/// name/namespace/doc metadata.
///
/// Field names are unique; indices are dense `0..len` and always derived
/// from position. Equality and [`Hash`] are structural over the field
/// sequence only, independent of the metadata.
#[derive(Debug, Clone, Default, Eq, serde::Serialize)]
pub struct StructSchema {
    fields: Vec<(String, Schema)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    doc: Option<String>,
}

impl StructSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, consuming and returning `self` for chained construction.
    ///
    /// Fails with [`SchemaError::EmptyFieldName`] for an empty name and
    /// [`SchemaError::DuplicateField`] for a name that already exists.
    pub fn with(mut self, name: impl Into<String>, schema: Schema) -> Result<Self, SchemaError> {
        self.add(name, schema)?;
        Ok(self)
    }

    /// Add a field at the next index.
    ///
    /// Same failure modes as [`StructSchema::with`].
    pub fn add(&mut self, name: impl Into<String>, schema: Schema) -> Result<(), SchemaError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        if self.position(&name).is_some() {
            return Err(SchemaError::DuplicateField { name });
        }
        self.fields.push((name, schema));
        Ok(())
    }

    /// Position of a field by name, or `None` if absent.
    ///
    /// Fails with [`SchemaError::EmptyFieldName`] on an empty name.
    pub fn index_of(&self, name: &str) -> Result<Option<usize>, SchemaError> {
        if name.is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        Ok(self.position(name))
    }

    /// Snapshot of a field by name, or `None` if absent.
    pub fn get(&self, name: &str) -> Option<TypedField> {
        self.position(name).map(|index| self.field_at(index))
    }

    /// Replace an existing field's schema, preserving its index.
    ///
    /// Fails with [`SchemaError::UnknownField`] if the field does not exist.
    pub fn set(&mut self, name: &str, schema: Schema) -> Result<(), SchemaError> {
        if name.is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        match self.position(name) {
            Some(index) => {
                self.fields[index].1 = schema;
                Ok(())
            }
            None => Err(SchemaError::UnknownField {
                name: name.to_string(),
            }),
        }
    }

    /// Rename an existing field, preserving its index.
    ///
    /// Fails with [`SchemaError::UnknownField`] if `old` is absent and with
    /// [`SchemaError::RenameCollision`] if `new` already names another field.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> Result<(), SchemaError> {
        let new = new.into();
        if old.is_empty() || new.is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        let index = self
            .position(old)
            .ok_or_else(|| SchemaError::UnknownField {
                name: old.to_string(),
            })?;
        if new != old && self.position(&new).is_some() {
            return Err(SchemaError::RenameCollision {
                from: old.to_string(),
                to: new,
            });
        }
        self.fields[index].0 = new;
        Ok(())
    }

    /// Remove a field by name, returning its former index.
    ///
    /// A no-op returning `None` when the field is absent. Indices of all
    /// later fields shift down by one, staying dense and order-preserving.
    pub fn remove(&mut self, name: &str) -> Option<usize> {
        let index = self.position(name)?;
        self.fields.remove(index);
        Some(index)
    }

    /// Ordered snapshot of all fields, safe to iterate while the source is
    /// later mutated.
    pub fn fields(&self) -> Vec<TypedField> {
        (0..self.fields.len()).map(|i| self.field_at(i)).collect()
    }

    /// Iterate field snapshots in order.
    pub fn iter(&self) -> impl Iterator<Item = TypedField> + '_ {
        (0..self.fields.len()).map(|i| self.field_at(i))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` when the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Set the schema name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the schema namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the schema doc.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Schema name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Schema namespace, if set.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Schema doc, if set.
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(n, _)| n == name)
    }

    fn field_at(&self, index: usize) -> TypedField {
        let (name, schema) = &self.fields[index];
        TypedField {
            index,
            name: name.clone(),
            schema: schema.clone(),
        }
    }
}

impl PartialEq for StructSchema {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Hash for StructSchema {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fields.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::{Schema, StructSchema};
    use crate::error::SchemaError;

    fn hash_of(schema: &StructSchema) -> u64 {
        let mut hasher = DefaultHasher::new();
        schema.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn add_assigns_dense_insertion_order_indices() {
        let schema = StructSchema::new()
            .with("a", Schema::String)
            .unwrap()
            .with("b", Schema::Int64)
            .unwrap()
            .with("c", Schema::Bool)
            .unwrap();

        assert_eq!(schema.index_of("a").unwrap(), Some(0));
        assert_eq!(schema.index_of("b").unwrap(), Some(1));
        assert_eq!(schema.index_of("c").unwrap(), Some(2));
        assert_eq!(schema.index_of("missing").unwrap(), None);

        let indices: Vec<usize> = schema.fields().iter().map(|f| f.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn add_rejects_empty_and_duplicate_names() {
        let mut schema = StructSchema::new();
        assert_eq!(
            schema.add("", Schema::String),
            Err(SchemaError::EmptyFieldName)
        );
        schema.add("a", Schema::String).unwrap();
        assert_eq!(
            schema.add("a", Schema::Int64),
            Err(SchemaError::DuplicateField {
                name: "a".to_string()
            })
        );
    }

    #[test]
    fn index_of_rejects_empty_name() {
        let schema = StructSchema::new();
        assert_eq!(schema.index_of(""), Err(SchemaError::EmptyFieldName));
    }

    #[test]
    fn remove_compacts_indices_preserving_order() {
        let mut schema = StructSchema::new()
            .with("a", Schema::String)
            .unwrap()
            .with("b", Schema::Int64)
            .unwrap()
            .with("c", Schema::Bool)
            .unwrap();

        assert_eq!(schema.remove("b"), Some(1));
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.index_of("a").unwrap(), Some(0));
        assert_eq!(schema.index_of("c").unwrap(), Some(1));

        // Removing an absent field is a no-op.
        assert_eq!(schema.remove("b"), None);
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn set_replaces_schema_preserving_index() {
        let mut schema = StructSchema::new()
            .with("a", Schema::String)
            .unwrap()
            .with("b", Schema::Int64)
            .unwrap();

        schema.set("a", Schema::Int32).unwrap();
        let field = schema.get("a").unwrap();
        assert_eq!(field.index(), 0);
        assert_eq!(*field.schema(), Schema::Int32);

        assert_eq!(
            schema.set("missing", Schema::Bool),
            Err(SchemaError::UnknownField {
                name: "missing".to_string()
            })
        );
    }

    #[test]
    fn rename_preserves_index_and_fails_closed_on_collision() {
        let mut schema = StructSchema::new()
            .with("a", Schema::String)
            .unwrap()
            .with("b", Schema::Int64)
            .unwrap();

        schema.rename("a", "renamed").unwrap();
        assert_eq!(schema.index_of("renamed").unwrap(), Some(0));
        assert_eq!(schema.index_of("a").unwrap(), None);

        assert_eq!(
            schema.rename("renamed", "b"),
            Err(SchemaError::RenameCollision {
                from: "renamed".to_string(),
                to: "b".to_string()
            })
        );
        // Index sequence untouched by the failed rename.
        assert_eq!(schema.index_of("renamed").unwrap(), Some(0));
        assert_eq!(schema.index_of("b").unwrap(), Some(1));

        assert_eq!(
            schema.rename("missing", "other"),
            Err(SchemaError::UnknownField {
                name: "missing".to_string()
            })
        );
    }

    #[test]
    fn equality_and_hash_ignore_metadata() {
        let plain = StructSchema::new().with("a", Schema::String).unwrap();
        let documented = StructSchema::new()
            .with("a", Schema::String)
            .unwrap()
            .with_name("record")
            .with_namespace("example")
            .with_doc("documented");

        assert_eq!(plain, documented);
        assert_eq!(hash_of(&plain), hash_of(&documented));

        let different = StructSchema::new().with("a", Schema::Int64).unwrap();
        assert_ne!(plain, different);
    }

    #[test]
    fn fields_snapshot_survives_later_mutation() {
        let mut schema = StructSchema::new()
            .with("a", Schema::String)
            .unwrap()
            .with("b", Schema::Int64)
            .unwrap();

        let snapshot = schema.fields();
        schema.remove("a");

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].name(), "a");
        assert_eq!(snapshot[1].name(), "b");
    }
}
