#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{FixedOffset, TimeZone, Utc};
use common::{customer, ring, Address, Handle, Location, Status};
use refcmp_core::compare::{
    CompareContext, ComparatorChain, DifferenceKind, Leniency, LeniencyMode, ReflectionComparator,
};
use refcmp_core::errors::ExErrorKind;
use serde_json::json;

fn strict() -> ReflectionComparator {
    ReflectionComparator::strict()
}

fn with(mode: LeniencyMode) -> ReflectionComparator {
    ReflectionComparator::new(Leniency::strict().with(mode))
}

#[test]
fn test_equal_objects_have_no_difference() {
    // GIVEN two independently built but equal customers
    let left = customer();
    let right = customer();

    // WHEN compared strictly
    let diff = strict().compare(&left, &right).unwrap();

    // THEN there is no difference
    assert!(diff.is_none());
}

#[test]
fn test_same_reference_is_equal_even_when_opaque() {
    let handle = Handle(7);

    let diff = strict().compare(&handle, &handle).unwrap();

    assert!(diff.is_none());
}

#[test]
fn test_prefixes_of_one_buffer_are_not_the_same_reference() {
    // GIVEN slices that start at the same address but differ in length
    let text = String::from("abcdef");
    let numbers = vec![1, 2, 3];
    let (short, long): (&str, &str) = (&text[..1], &text[..4]);
    let (head, all): (&[i32], &[i32]) = (&numbers[..1], &numbers[..3]);

    // WHEN compared strictly
    let text_diff = strict().compare(&short, &long).unwrap().expect("difference");
    let slice_diff = strict().compare(&head, &all).unwrap().expect("difference");

    // THEN the contents are compared instead of short-circuiting on the address
    assert_eq!(text_diff.kind, DifferenceKind::DifferentValues);
    assert_eq!(slice_diff.kind, DifferenceKind::CollectionSizesDiffer);
    assert!(strict().is_equal(&long, &&text[..4]).unwrap());
}

#[test]
fn test_nested_field_difference_is_path_qualified() {
    // GIVEN customers living in different cities
    let left = customer();
    let mut right = customer();
    right.address.city = "Bruges".to_string();

    // WHEN compared
    let diff = strict().compare(&left, &right).unwrap().expect("difference");

    // THEN the root reports field differences and the leaf is the city
    assert_eq!(diff.kind, DifferenceKind::DifferentFieldValues);
    assert_eq!(diff.path_string(), "");
    let leaves = diff.leaves();
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0].path_string(), "address.city");
    assert_eq!(leaves[0].kind, DifferenceKind::DifferentValues);
    assert_eq!(leaves[0].message, "different object values");

    let report = leaves[0].to_report();
    assert_eq!(report.left.as_deref(), Some("\"Ghent\""));
    assert_eq!(report.right.as_deref(), Some("\"Bruges\""));
}

#[test]
fn test_every_differing_field_is_reported() {
    let left = customer();
    let mut right = customer();
    right.name = "Bob".to_string();
    right.status = Status::Suspended;

    let diff = strict().compare(&left, &right).unwrap().expect("difference");

    let paths: Vec<String> = diff.leaves().iter().map(|d| d.path_string()).collect();
    assert_eq!(paths, vec!["name".to_string(), "status".to_string()]);
}

#[test]
fn test_null_sides_are_asymmetric() {
    let mut left = customer();
    left.email = None;
    let right = customer();

    let diff = strict().compare(&left, &right).unwrap().expect("difference");
    let leaf = diff.leaves()[0];
    assert_eq!(leaf.path_string(), "email");
    assert_eq!(leaf.kind, DifferenceKind::LeftNull);
    assert_eq!(leaf.message, "left value null");
    assert_eq!(leaf.to_report().right.as_deref(), Some("\"ann@example.org\""));

    let diff = strict().compare(&right, &left).unwrap().expect("difference");
    let leaf = diff.leaves()[0];
    assert_eq!(leaf.kind, DifferenceKind::RightNull);
    assert_eq!(leaf.message, "right value null");
}

#[test]
fn test_both_null_is_equal() {
    let left: Option<String> = None;
    let right: Option<String> = None;

    assert!(strict().is_equal(&left, &right).unwrap());
}

#[test]
fn test_objects_of_different_types_differ() {
    // GIVEN an address and a location with identical field values
    let address = Address {
        street: "Main Street".to_string(),
        number: 7,
        city: "Ghent".to_string(),
    };
    let location = Location {
        street: "Main Street".to_string(),
        number: 7,
        city: "Ghent".to_string(),
    };

    // WHEN compared
    let diff = strict().compare(&address, &location).unwrap().expect("difference");

    // THEN the type mismatch is reported at the root
    assert_eq!(diff.kind, DifferenceKind::DifferentTypes);
    assert!(diff.message.starts_with("different types: "));
    assert!(diff.message.contains("Address"));
    assert!(diff.message.contains("Location"));
}

#[test]
fn test_incompatible_shapes_differ() {
    let seq = vec![1, 2];
    let address = customer().address;
    let diff = strict().compare(&seq, &address).unwrap().expect("difference");
    assert_eq!(diff.kind, DifferenceKind::DifferentTypes);

    let single = vec![1];
    let diff = strict().compare(&1, &single).unwrap().expect("difference");
    assert_eq!(diff.kind, DifferenceKind::DifferentValues);
}

#[test]
fn test_opaque_values_are_uncomparable() {
    let err = strict().compare(&Handle(1), &Handle(1)).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Uncomparable);
    assert_eq!(err.code(), "ERR_UNCOMPARABLE");
    assert_eq!(err.op(), Some("compare"));
    assert!(err.message().contains("Handle"));
}

#[test]
fn test_uncomparable_error_carries_path() {
    let left = vec![Handle(1)];
    let right = vec![Handle(2)];

    let err = strict().compare(&left, &right).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Uncomparable);
    assert_eq!(err.path(), Some("[0]"));
}

#[test]
fn test_cyclic_graphs_terminate() {
    // GIVEN two structurally equal rings a -> b -> a
    let left = ring("a", "b");
    let right = ring("a", "b");

    // WHEN compared
    let diff = strict().compare(&left, &right).unwrap();

    // THEN the comparison terminates and reports equality
    assert!(diff.is_none());
}

#[test]
fn test_cyclic_graphs_report_real_differences() {
    let left = ring("a", "b");
    let right = ring("a", "c");

    let diff = strict().compare(&left, &right).unwrap().expect("difference");

    let leaves = diff.leaves();
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0].path_string(), "next.name");
}

#[test]
fn test_context_is_unwound_after_each_call() {
    let chain = ComparatorChain::for_leniency(&Leniency::lenient());
    let left = ring("a", "b");
    let right = ring("a", "c");
    let mut ctx = CompareContext::new();

    let diff = chain.compare(&left, &right, &mut ctx).unwrap();

    assert!(diff.is_some());
    assert!(ctx.is_unwound());
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn test_strict_order_reports_first_mismatch() {
    let (left, right) = (vec![1, 2, 3], vec![1, 5, 3]);

    let diff = strict().compare(&left, &right).unwrap().expect("difference");

    assert_eq!(diff.kind, DifferenceKind::DifferentElements);
    assert_eq!(diff.children.len(), 1);
    assert_eq!(diff.children[0].path_string(), "[1]");
}

#[test]
fn test_collection_sizes_differ() {
    let (left, right) = (vec![1, 2], vec![1, 2, 3]);

    let diff = strict().compare(&left, &right).unwrap().expect("difference");

    assert_eq!(diff.kind, DifferenceKind::CollectionSizesDiffer);
    assert_eq!(diff.message, "collection sizes differ (2 vs 3)");
}

#[test]
fn test_lenient_order_ignores_permutation() {
    let comparator = with(LeniencyMode::LenientOrder);

    assert!(comparator.is_equal(&vec![1, 2, 3], &vec![3, 1, 2]).unwrap());
    assert!(!strict().is_equal(&vec![1, 2, 3], &vec![3, 1, 2]).unwrap());
}

#[test]
fn test_lenient_order_respects_multiplicity() {
    // GIVEN a right side holding a duplicate
    let comparator = with(LeniencyMode::LenientOrder);
    let (left, right) = (vec![1, 2, 3], vec![1, 2, 3, 3]);

    // WHEN compared in any order
    let diff = comparator.compare(&left, &right).unwrap().expect("difference");

    // THEN the extra element is unexpected
    assert_eq!(diff.kind, DifferenceKind::CollectionSizesDiffer);
    assert_eq!(diff.children.len(), 1);
    assert_eq!(diff.children[0].kind, DifferenceKind::UnexpectedElement);
    assert_eq!(diff.children[0].path_string(), "[3]");
}

#[test]
fn test_lenient_order_reports_unmatched_left_elements() {
    let comparator = with(LeniencyMode::LenientOrder);

    let (left, right) = (vec![1, 2, 9], vec![2, 1, 3]);

    let diff = comparator.compare(&left, &right).unwrap().expect("difference");

    assert_eq!(diff.kind, DifferenceKind::DifferentElements);
    let kinds: Vec<DifferenceKind> = diff.children.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DifferenceKind::NoMatchForElement,
            DifferenceKind::UnexpectedElement
        ]
    );
    assert_eq!(diff.children[0].path_string(), "[2]");
    assert_eq!(diff.children[1].path_string(), "[2]");
}

#[test]
fn test_allow_superset_accepts_extra_right_elements() {
    let comparator = ReflectionComparator::new(
        Leniency::strict()
            .with(LeniencyMode::LenientOrder)
            .with(LeniencyMode::AllowSuperset),
    );

    assert!(comparator.is_equal(&vec![3, 1], &vec![1, 2, 3]).unwrap());
    assert!(!comparator.is_equal(&vec![3, 4], &vec![1, 2, 3]).unwrap());
}

#[test]
fn test_lenient_order_over_nested_objects() {
    let mut left = customer();
    left.tags = vec!["early".to_string(), "gold".to_string()];
    let right = customer();

    assert!(!strict().is_equal(&left, &right).unwrap());
    assert!(ReflectionComparator::lenient().is_equal(&left, &right).unwrap());
}

#[test]
fn test_ignore_defaults_skips_default_expected_fields() {
    // GIVEN an expected address that only fills in the city
    let expected = Address {
        city: "Ghent".to_string(),
        ..Address::default()
    };
    let actual = customer().address;

    // WHEN compared with and without ignored defaults
    let lenient = with(LeniencyMode::IgnoreDefaults).compare(&expected, &actual).unwrap();
    let strict = strict().compare(&expected, &actual).unwrap();

    // THEN only the strict comparison reports the street and number
    assert!(lenient.is_none());
    let strict = strict.expect("difference");
    let paths: Vec<String> = strict.leaves().iter().map(|d| d.path_string()).collect();
    assert_eq!(paths, vec!["street".to_string(), "number".to_string()]);
}

#[test]
fn test_ignore_defaults_does_not_apply_to_actual_side() {
    let expected = customer().address;
    let actual = Address {
        city: "Ghent".to_string(),
        ..Address::default()
    };

    let diff = with(LeniencyMode::IgnoreDefaults)
        .compare(&expected, &actual)
        .unwrap();

    assert!(diff.is_some());
}

#[test]
fn test_ignore_defaults_skips_null_expected_option() {
    let mut expected = customer();
    expected.email = None;
    let actual = customer();

    assert!(with(LeniencyMode::IgnoreDefaults)
        .is_equal(&expected, &actual)
        .unwrap());
}

#[test]
fn test_map_entries_are_matched_by_key() {
    let left = BTreeMap::from([("a".to_string(), 1), ("b".to_string(), 2)]);
    let right = BTreeMap::from([("a".to_string(), 1), ("b".to_string(), 3)]);

    let diff = strict().compare(&left, &right).unwrap().expect("difference");

    assert_eq!(diff.kind, DifferenceKind::DifferentMapEntries);
    assert_eq!(diff.children.len(), 1);
    assert_eq!(diff.children[0].path_string(), "[\"b\"]");
}

#[test]
fn test_map_missing_and_unexpected_keys() {
    let left = BTreeMap::from([("a", 1), ("b", 2)]);
    let right = BTreeMap::from([("a", 1), ("c", 2)]);

    let diff = strict().compare(&left, &right).unwrap().expect("difference");

    let kinds: Vec<DifferenceKind> = diff.children.iter().map(|c| c.kind).collect();
    assert!(kinds.contains(&DifferenceKind::MissingMapKey));
    assert!(kinds.contains(&DifferenceKind::UnexpectedMapKey));
}

#[test]
fn test_hash_collections_compare_independently_of_iteration_order() {
    let left: HashMap<String, i32> = (0..20).map(|i| (format!("k{}", i), i)).collect();
    let right: HashMap<String, i32> = (0..20).rev().map(|i| (format!("k{}", i), i)).collect();
    assert!(strict().is_equal(&left, &right).unwrap());

    let left: HashSet<i32> = (0..20).collect();
    let right: HashSet<i32> = (0..20).rev().collect();
    assert!(strict().is_equal(&left, &right).unwrap());
}

#[test]
fn test_lenient_numbers_compare_magnitudes() {
    let left: i32 = 10;
    let right: i64 = 10;
    let float: f64 = 10.0;

    assert!(!strict().is_equal(&left, &right).unwrap());
    assert!(with(LeniencyMode::LenientNumbers).is_equal(&left, &right).unwrap());
    assert!(with(LeniencyMode::LenientNumbers).is_equal(&left, &float).unwrap());
    assert!(!with(LeniencyMode::LenientNumbers)
        .is_equal(&left, &10.5_f64)
        .unwrap());
}

#[test]
fn test_lenient_dates_compare_instants() {
    // GIVEN the same instant in UTC and at +02:00
    let utc = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    let offset = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .unwrap();

    // THEN only lenient dates treat them as equal
    assert!(!strict().is_equal(&utc, &offset).unwrap());
    assert!(with(LeniencyMode::LenientDates).is_equal(&utc, &offset).unwrap());

    let later = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 1).unwrap();
    assert!(!with(LeniencyMode::LenientDates).is_equal(&utc, &later).unwrap());
}

#[test]
fn test_json_values_compare_structurally() {
    let left = json!({"name": "ann", "tags": ["a", "b"], "age": 31});
    let right = json!({"name": "ann", "tags": ["b", "a"], "age": 31});

    assert!(!strict().is_equal(&left, &right).unwrap());
    assert!(ReflectionComparator::lenient().is_equal(&left, &right).unwrap());
}

#[test]
fn test_comparison_is_deterministic() {
    let left = customer();
    let mut right = customer();
    right.tags.push("late".to_string());
    right.attributes.insert("visits".to_string(), 9);

    let first = strict().compare(&left, &right).unwrap().map(|d| d.to_report());
    let second = strict().compare(&left, &right).unwrap().map(|d| d.to_report());

    assert_eq!(first, second);
}

#[test]
fn test_display_renders_tree() {
    let left = customer();
    let mut right = customer();
    right.address.number = 8;

    let diff = strict().compare(&left, &right).unwrap().expect("difference");
    let text = diff.to_string();

    assert!(text.contains("address.number: different object values"));
    assert!(text.contains("expected: 7"));
    assert!(text.contains("actual:   8"));
}
