#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{customer, Address, Customer};
use refcmp_core::compare::{DifferenceKind, Leniency, LeniencyMode};
use refcmp_core::errors::ExErrorKind;
use refcmp_core::reflect::{property_value, render_value};
use refcmp_core::reflection_assert::{
    assert_lenient_eq, assert_property_eq, assert_property_lenient_eq, assert_reflection_eq,
    assert_reflection_eq_with, check_property_eq, check_reflection_eq, AssertionFailure,
};
use refcmp_core::{assert_len_eq, assert_ref_eq};

#[test]
fn test_equal_customers_pass() {
    assert_reflection_eq(&customer(), &customer());
    assert_ref_eq!(customer(), customer());
}

#[test]
#[should_panic(expected = "expected and actual values differ (strict)")]
fn test_different_customers_fail() {
    let mut actual = customer();
    actual.name = "Bob".to_string();

    assert_reflection_eq(&customer(), &actual);
}

#[test]
fn test_failure_message_names_the_path() {
    let mut actual = customer();
    actual.address.number = 9;

    let failure = check_reflection_eq(&customer(), &actual, &Leniency::strict()).unwrap_err();

    let text = failure.to_string();
    assert!(text.contains("address.number: different object values"));
    assert!(text.contains("expected: 7"));
    assert!(text.contains("actual:   9"));
    let report = failure.report().expect("mismatch report");
    assert_eq!(report.kind, DifferenceKind::DifferentFieldValues);
    assert_eq!(report.leaf_count(), 1);
}

#[test]
fn test_lenient_assertion_ignores_order_and_defaults() {
    // GIVEN an expected customer that leaves the address and email unset
    let expected = Customer {
        email: None,
        address: Address::default(),
        tags: vec!["early".to_string(), "gold".to_string()],
        ..customer()
    };

    // THEN it is leniently but not strictly equal to the full customer
    assert_lenient_eq(&expected, &customer());
    assert_len_eq!(expected, customer());
    assert!(check_reflection_eq(&expected, &customer(), &Leniency::strict()).is_err());
}

#[test]
#[should_panic(expected = "tags of customer 42")]
fn test_macro_accepts_custom_message() {
    let expected = vec!["a".to_string()];
    let actual = vec!["b".to_string()];

    assert_len_eq!(expected, actual, "tags of customer {}", 42);
}

#[test]
fn test_assert_with_explicit_leniency() {
    let leniency = Leniency::strict().with(LeniencyMode::LenientNumbers);

    assert_reflection_eq_with(&3_u8, &3_i64, &leniency);
}

#[test]
fn test_engine_failure_is_distinct_from_mismatch() {
    let left = vec![common::Handle(1)];
    let right = vec![common::Handle(2)];

    let failure = check_reflection_eq(&left, &right, &Leniency::strict()).unwrap_err();

    match failure {
        AssertionFailure::Engine(err) => assert_eq!(err.kind(), ExErrorKind::Uncomparable),
        other => panic!("unexpected failure: {}", other),
    }
}

#[test]
fn test_property_lookup_walks_fields_indexes_and_keys() {
    let customer = customer();

    let city = property_value(&customer, "address.city").unwrap();
    let tag = property_value(&customer, "tags.1").unwrap();
    let age = property_value(&customer, "attributes.age").unwrap();

    assert_eq!(render_value(city), "\"Ghent\"");
    assert_eq!(render_value(tag), "\"early\"");
    assert_eq!(render_value(age), "31");
}

#[test]
fn test_property_assertions() {
    let customer = customer();

    assert_property_eq("address.city", &"Ghent", &customer, &Leniency::strict());
    assert_property_eq("email", &"ann@example.org", &customer, &Leniency::strict());
    assert_property_lenient_eq("tags", &vec!["early", "gold"], &customer);
}

#[test]
fn test_missing_property_is_an_engine_failure() {
    let failure =
        check_property_eq("address.zip", &"9000", &customer(), &Leniency::strict()).unwrap_err();

    match failure {
        AssertionFailure::Engine(err) => {
            assert_eq!(err.kind(), ExErrorKind::PropertyNotFound);
            assert_eq!(err.code(), "ERR_PROPERTY_NOT_FOUND");
        }
        other => panic!("unexpected failure: {}", other),
    }
}

#[test]
fn test_property_over_collection_compares_in_any_order() {
    // GIVEN customers in two cities
    let mut second = customer();
    second.address.city = "Bruges".to_string();
    let customers = vec![customer(), second];

    // THEN the collected cities match in any order
    assert_property_lenient_eq("address.city", &vec!["Bruges", "Ghent"], &customers);
}

#[test]
#[should_panic(expected = "property 'address.city'")]
fn test_property_over_collection_reports_mismatch() {
    let customers = vec![customer(), customer()];

    assert_property_lenient_eq("address.city", &vec!["Bruges", "Ghent"], &customers);
}
