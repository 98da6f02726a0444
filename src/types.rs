//! The closed enumeration of value kinds.
//!
//! Every [`crate::value::TypedValue`] carries exactly one [`Type`] tag, which
//! determines the legal coercions (see [`crate::coerce`]) and whether the
//! value carries a nested schema (arrays, maps and structs do).

use std::fmt;

/// Logical type of a [`crate::value::TypedValue`].
///
/// Serialized (and displayed) as its stable lowercase name, e.g. `"int64"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit floating point number.
    Float32,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    String,
    /// Opaque binary data.
    Bytes,
    /// Ordered collection of values sharing one item schema.
    Array,
    /// String-keyed collection of values sharing one value schema.
    Map,
    /// Named, ordered collection of typed fields.
    Struct,
}

impl Type {
    /// `true` for scalar kinds (everything except array, map and struct).
    pub fn is_primitive(self) -> bool {
        !matches!(self, Type::Array | Type::Map | Type::Struct)
    }

    /// `true` for integer and floating point kinds.
    pub fn is_number(self) -> bool {
        matches!(
            self,
            Type::Int16 | Type::Int32 | Type::Int64 | Type::Float32 | Type::Float64
        )
    }

    /// Stable lowercase name, used in error messages and serialization.
    pub fn name(self) -> &'static str {
        match self {
            Type::Int16 => "int16",
            Type::Int32 => "int32",
            Type::Int64 => "int64",
            Type::Float32 => "float32",
            Type::Float64 => "float64",
            Type::Bool => "bool",
            Type::String => "string",
            Type::Bytes => "bytes",
            Type::Array => "array",
            Type::Map => "map",
            Type::Struct => "struct",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Type;

    #[test]
    fn primitive_and_number_predicates() {
        assert!(Type::Int64.is_primitive());
        assert!(Type::Bytes.is_primitive());
        assert!(!Type::Array.is_primitive());
        assert!(!Type::Struct.is_primitive());

        assert!(Type::Int16.is_number());
        assert!(Type::Float64.is_number());
        assert!(!Type::Bool.is_number());
        assert!(!Type::String.is_number());
    }

    #[test]
    fn display_matches_serde_name() {
        let rendered = serde_json::to_string(&Type::Float32).unwrap();
        assert_eq!(rendered, "\"float32\"");
        assert_eq!(Type::Float32.to_string(), "float32");

        let parsed: Type = serde_json::from_str("\"struct\"").unwrap();
        assert_eq!(parsed, Type::Struct);
    }
}
