//! Property accessors: how path expressions resolve names on a target.

use super::EvaluationContext;
use crate::error::AccessError;
use crate::record::TypedStruct;
use crate::value::TypedValue;

/// Resolves property names on a struct target for path expressions.
///
/// `can_read`/`can_write` report capability only; actual resolution failures
/// surface from `read`/`write` as [`AccessError`].
pub trait PropertyAccessor {
    /// Whether `name` may be readable on `target`.
    fn can_read(&self, context: &EvaluationContext, target: &TypedStruct, name: &str) -> bool;

    /// Read `name` from `target`.
    fn read(
        &self,
        context: &EvaluationContext,
        target: &TypedStruct,
        name: &str,
    ) -> Result<TypedValue, AccessError>;

    /// Whether `name` may be writable on `target`.
    fn can_write(&self, context: &EvaluationContext, target: &TypedStruct, name: &str) -> bool;

    /// Write `value` under `name` into `target`.
    fn write(
        &self,
        context: &EvaluationContext,
        target: &mut TypedStruct,
        name: &str,
        value: TypedValue,
    ) -> Result<(), AccessError>;
}

/// The accessor for [`TypedStruct`] targets.
///
/// A name containing `.` is split at the first separator and resolved
/// recursively, one nesting level per step: a direct field always wins over
/// a dotted interpretation, so a field literally named `"a.b"` shadows the
/// path `a` → `b`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypedStructAccessor;

impl PropertyAccessor for TypedStructAccessor {
    fn can_read(&self, _context: &EvaluationContext, _target: &TypedStruct, _name: &str) -> bool {
        true
    }

    fn read(
        &self,
        context: &EvaluationContext,
        target: &TypedStruct,
        name: &str,
    ) -> Result<TypedValue, AccessError> {
        if let Some(value) = target.get(name) {
            return Ok(value.clone());
        }
        if let Some((head, tail)) = name.split_once('.') {
            let intermediate = self.read(context, target, head)?;
            if let TypedValue::Struct(child) = &intermediate {
                return self.read(context, child, tail);
            }
        }
        Err(AccessError::CannotAccess {
            path: name.to_string(),
        })
    }

    fn can_write(&self, _context: &EvaluationContext, _target: &TypedStruct, _name: &str) -> bool {
        true
    }

    fn write(
        &self,
        context: &EvaluationContext,
        target: &mut TypedStruct,
        name: &str,
        value: TypedValue,
    ) -> Result<(), AccessError> {
        if let Some((head, tail)) = name.split_once('.') {
            let mut child = match target.get(head) {
                Some(TypedValue::Struct(existing)) => existing.clone(),
                Some(other) => {
                    return Err(AccessError::CannotWrite {
                        path: name.to_string(),
                        message: format!("field '{head}' is a {}, not a struct", other.r#type()),
                    });
                }
                None => TypedStruct::new(),
            };
            self.write(context, &mut child, tail, value)?;
            // Install the child back so the write is observable even when
            // every intermediate level was freshly created.
            target.put(head, child).map_err(|e| AccessError::CannotWrite {
                path: name.to_string(),
                message: e.to_string(),
            })
        } else {
            target.put(name, value).map_err(|e| AccessError::CannotWrite {
                path: name.to_string(),
                message: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PropertyAccessor, TypedStructAccessor};
    use crate::error::AccessError;
    use crate::expression::EvaluationContext;
    use crate::record::TypedStruct;

    fn nested_record() -> TypedStruct {
        let user = TypedStruct::new().with("name", "al").unwrap();
        TypedStruct::new().with("user", user).unwrap()
    }

    #[test]
    fn reads_nested_fields_through_dotted_paths() {
        let context = EvaluationContext::new();
        let record = nested_record();
        let accessor = TypedStructAccessor;

        let value = accessor.read(&context, &record, "user.name").unwrap();
        assert_eq!(value.get_string().unwrap(), "al");
    }

    #[test]
    fn missing_leaf_fails_with_access_error() {
        let context = EvaluationContext::new();
        let record = nested_record();
        let accessor = TypedStructAccessor;

        assert_eq!(
            accessor.read(&context, &record, "user.age"),
            Err(AccessError::CannotAccess {
                path: "age".to_string()
            })
        );
    }

    #[test]
    fn direct_field_shadows_dotted_interpretation() {
        let context = EvaluationContext::new();
        let record = TypedStruct::new().with("a.b", "flat").unwrap();
        let accessor = TypedStructAccessor;

        let value = accessor.read(&context, &record, "a.b").unwrap();
        assert_eq!(value.get_string().unwrap(), "flat");
    }

    #[test]
    fn deep_write_installs_every_intermediate_struct() {
        let context = EvaluationContext::new();
        let mut record = TypedStruct::new();
        let accessor = TypedStructAccessor;

        accessor
            .write(&context, &mut record, "a.b.c", "deep".into())
            .unwrap();

        let value = accessor.read(&context, &record, "a.b.c").unwrap();
        assert_eq!(value.get_string().unwrap(), "deep");
    }

    #[test]
    fn write_through_non_struct_intermediate_fails() {
        let context = EvaluationContext::new();
        let mut record = TypedStruct::new().with("a", 1_i64).unwrap();
        let accessor = TypedStructAccessor;

        let result = accessor.write(&context, &mut record, "a.b", "x".into());
        assert!(matches!(result, Err(AccessError::CannotWrite { .. })));
        // Operand untouched by the failed write.
        assert_eq!(record.get_i64("a").unwrap(), 1);
    }

    #[test]
    fn capability_checks_are_unconditional_for_structs() {
        let context = EvaluationContext::new();
        let record = TypedStruct::new();
        let accessor = TypedStructAccessor;
        assert!(accessor.can_read(&context, &record, "anything"));
        assert!(accessor.can_write(&context, &record, "anything"));
    }
}
