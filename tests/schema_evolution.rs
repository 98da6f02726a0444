use typed_records::{Schema, SchemaError, StructSchema, Type, TypedStruct};

fn abc_schema() -> StructSchema {
    StructSchema::new()
        .with("a", Schema::String)
        .unwrap()
        .with("b", Schema::Int64)
        .unwrap()
        .with("c", Schema::Bool)
        .unwrap()
}

#[test]
fn n_distinct_fields_yield_dense_indices_in_insertion_order() {
    let names = ["one", "two", "three", "four", "five"];
    let mut schema = StructSchema::new();
    for name in names {
        schema.add(name, Schema::String).unwrap();
    }

    let indices: Vec<usize> = names
        .iter()
        .map(|n| schema.index_of(n).unwrap().unwrap())
        .collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);

    let ordered: Vec<String> = schema.fields().iter().map(|f| f.name().to_string()).collect();
    assert_eq!(ordered, names.map(String::from).to_vec());
}

#[test]
fn removal_reindexes_to_a_dense_range_preserving_order() {
    let mut schema = abc_schema();

    assert_eq!(schema.remove("a"), Some(0));

    assert_eq!(schema.len(), 2);
    assert_eq!(schema.index_of("b").unwrap(), Some(0));
    assert_eq!(schema.index_of("c").unwrap(), Some(1));
    let indices: Vec<usize> = schema.fields().iter().map(|f| f.index()).collect();
    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn removing_a_nonexistent_field_is_a_no_op() {
    let mut schema = abc_schema();
    assert_eq!(schema.remove("missing"), None);
    assert_eq!(schema.len(), 3);
    assert_eq!(schema.index_of("c").unwrap(), Some(2));
}

#[test]
fn rename_into_existing_field_name_is_rejected() {
    let mut schema = abc_schema();

    let result = schema.rename("a", "b");

    assert_eq!(
        result,
        Err(SchemaError::RenameCollision {
            from: "a".to_string(),
            to: "b".to_string()
        })
    );
    // The index sequence is not corrupted by the failed rename.
    assert_eq!(schema.index_of("a").unwrap(), Some(0));
    assert_eq!(schema.index_of("b").unwrap(), Some(1));
    assert_eq!(schema.index_of("c").unwrap(), Some(2));
}

#[test]
fn structural_equality_is_independent_of_metadata() {
    let bare = abc_schema();
    let annotated = abc_schema()
        .with_name("record")
        .with_namespace("tests")
        .with_doc("three fields");

    assert_eq!(bare, annotated);
    assert_eq!(annotated.name(), Some("record"));
    assert_eq!(annotated.namespace(), Some("tests"));
    assert_eq!(annotated.doc(), Some("three fields"));
}

#[test]
fn struct_mutations_keep_schema_and_payload_consistent() {
    let mut record = TypedStruct::new()
        .with("a", "x")
        .unwrap()
        .with("b", 2_i64)
        .unwrap()
        .with("c", false)
        .unwrap();

    record.remove("a");
    record.put("d", 1.5_f64).unwrap();
    record.rename("b", "renamed").unwrap();

    let fields: Vec<(usize, String, Type)> = record
        .iter()
        .map(|(field, value)| (field.index(), field.name().to_string(), value.r#type()))
        .collect();
    assert_eq!(
        fields,
        vec![
            (0, "renamed".to_string(), Type::Int64),
            (1, "c".to_string(), Type::Bool),
            (2, "d".to_string(), Type::Float64),
        ]
    );
    assert_eq!(record.get_i64("renamed").unwrap(), 2);
}
