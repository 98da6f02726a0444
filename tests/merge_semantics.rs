use std::collections::HashSet;

use typed_records::{TypedStruct, TypedValue, merge};

const VALUE_A: &str = "value-a";
const VALUE_B: &str = "value-b";

fn single(name: &str, value: impl Into<TypedValue>) -> TypedStruct {
    TypedStruct::new().with(name, value).unwrap()
}

fn string_items(record: &TypedStruct, name: &str) -> Vec<String> {
    record
        .get_array(name)
        .unwrap()
        .iter()
        .map(|v| v.get_string().unwrap().to_string())
        .collect()
}

#[test]
fn disjoint_fields_are_copied_as_is() {
    let left = single("a", VALUE_A);
    let right = single("b", VALUE_B);

    let merged = merge(&left, &right, &HashSet::new()).unwrap();

    assert_eq!(merged.get_string("a").unwrap(), VALUE_A);
    assert_eq!(merged.get_string("b").unwrap(), VALUE_B);
}

#[test]
fn shared_field_with_override_takes_right_value() {
    let left = single("a", VALUE_A);
    let right = single("a", VALUE_B);
    let overrides: HashSet<String> = ["a".to_string()].into_iter().collect();

    let merged = merge(&left, &right, &overrides).unwrap();

    assert_eq!(merged.get_string("a").unwrap(), VALUE_B);
}

#[test]
fn shared_scalar_field_folds_into_two_element_array() {
    let left = single("a", VALUE_A);
    let right = single("a", VALUE_B);

    let merged = merge(&left, &right, &HashSet::new()).unwrap();

    assert_eq!(string_items(&merged, "a"), vec![VALUE_A, VALUE_B]);
}

#[test]
fn ordering_is_left_first_so_merge_is_not_commutative() {
    let left = single("a", VALUE_A);
    let right = single("a", VALUE_B);

    let forward = merge(&left, &right, &HashSet::new()).unwrap();
    let backward = merge(&right, &left, &HashSet::new()).unwrap();

    assert_eq!(string_items(&forward, "a"), vec![VALUE_A, VALUE_B]);
    assert_eq!(string_items(&backward, "a"), vec![VALUE_B, VALUE_A]);
    assert_ne!(forward, backward);
}

#[test]
fn left_array_absorbs_right_scalar_at_the_end() {
    let left = single("a", TypedValue::from(vec![VALUE_A]));
    let right = single("a", VALUE_B);

    let merged = merge(&left, &right, &HashSet::new()).unwrap();

    assert_eq!(string_items(&merged, "a"), vec![VALUE_A, VALUE_B]);
}

#[test]
fn left_scalar_is_prepended_before_right_array() {
    let left = single("a", VALUE_A);
    let right = single("a", TypedValue::from(vec![VALUE_B]));

    let merged = merge(&left, &right, &HashSet::new()).unwrap();

    assert_eq!(string_items(&merged, "a"), vec![VALUE_A, VALUE_B]);
}

#[test]
fn two_arrays_concatenate_left_elements_first() {
    let left = single("a", TypedValue::from(vec![VALUE_A]));
    let right = single("a", TypedValue::from(vec![VALUE_B]));

    let merged = merge(&left, &right, &HashSet::new()).unwrap();

    assert_eq!(string_items(&merged, "a"), vec![VALUE_A, VALUE_B]);
}

#[test]
fn merge_preserves_all_unrelated_fields() {
    let left = TypedStruct::new()
        .with("shared", VALUE_A)
        .unwrap()
        .with("only_left", 1_i64)
        .unwrap();
    let right = TypedStruct::new()
        .with("shared", VALUE_B)
        .unwrap()
        .with("only_right", true)
        .unwrap();

    let merged = merge(&left, &right, &HashSet::new()).unwrap();

    assert_eq!(merged.len(), 3);
    assert_eq!(merged.get_i64("only_left").unwrap(), 1);
    assert!(merged.get_bool("only_right").unwrap());
    assert_eq!(merged.get_array("shared").unwrap().len(), 2);
}
