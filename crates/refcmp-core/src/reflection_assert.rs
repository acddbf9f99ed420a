//! Assertions for tests comparing expected and actual values structurally.
//!
//! ```
//! use refcmp_core::reflection_assert::{assert_lenient_eq, check_reflection_eq};
//! use refcmp_core::compare::Leniency;
//!
//! assert_lenient_eq(&vec![3, 1, 2], &vec![1, 2, 3]);
//! assert!(check_reflection_eq(&vec![3, 1, 2], &vec![1, 2, 3], &Leniency::strict()).is_err());
//! ```

use thiserror::Error;

use crate::compare::{DifferenceReport, Leniency, ReflectionComparator};
use crate::errors::ExError;
use crate::reflect::{property_value, property_values, resolve, Reflect, Shape};
use crate::report::render_difference;

/// Why an assertion did not hold.
#[derive(Debug, Error)]
pub enum AssertionFailure {
    /// The values differ under the requested leniency
    #[error("expected and actual values differ ({leniency}):\n{}", render_difference(.report))]
    Mismatch {
        leniency: String,
        report: DifferenceReport,
    },

    /// The comparison itself could not be carried out
    #[error(transparent)]
    Engine(#[from] ExError),
}

impl AssertionFailure {
    pub fn report(&self) -> Option<&DifferenceReport> {
        match self {
            AssertionFailure::Mismatch { report, .. } => Some(report),
            AssertionFailure::Engine(_) => None,
        }
    }
}

/// Compare without panicking.
///
/// # Errors
///
/// `Mismatch` carrying the rendered difference, or `Engine` when the
/// values cannot be compared at all.
pub fn check_reflection_eq(
    expected: &dyn Reflect,
    actual: &dyn Reflect,
    leniency: &Leniency,
) -> Result<(), AssertionFailure> {
    let comparator = ReflectionComparator::new(leniency.clone());
    match comparator.compare(expected, actual)? {
        None => Ok(()),
        Some(difference) => Err(AssertionFailure::Mismatch {
            leniency: leniency.to_string(),
            report: difference.to_report(),
        }),
    }
}

/// Assert strict structural equality.
///
/// # Panics
///
/// When the values differ or cannot be compared.
#[track_caller]
pub fn assert_reflection_eq(expected: &dyn Reflect, actual: &dyn Reflect) {
    assert_reflection_eq_with(expected, actual, &Leniency::strict());
}

/// Assert equality ignoring collection order and default-valued expected
/// fields.
///
/// # Panics
///
/// When the values differ or cannot be compared.
#[track_caller]
pub fn assert_lenient_eq(expected: &dyn Reflect, actual: &dyn Reflect) {
    assert_reflection_eq_with(expected, actual, &Leniency::lenient());
}

/// # Panics
///
/// When the values differ or cannot be compared.
#[track_caller]
pub fn assert_reflection_eq_with(expected: &dyn Reflect, actual: &dyn Reflect, leniency: &Leniency) {
    if let Err(failure) = check_reflection_eq(expected, actual, leniency) {
        panic!("{}", failure);
    }
}

/// Compare `expected` with the property at `path` of `actual`.
///
/// # Errors
///
/// As [`check_reflection_eq`]; a path that does not resolve is an
/// `Engine` failure with kind `PropertyNotFound`.
pub fn check_property_eq(
    path: &str,
    expected: &dyn Reflect,
    actual: &dyn Reflect,
    leniency: &Leniency,
) -> Result<(), AssertionFailure> {
    let value = property_value(actual, path).map_err(ExError::from)?;
    check_reflection_eq(expected, value, leniency)
}

/// # Panics
///
/// When the property differs, is missing, or cannot be compared.
#[track_caller]
pub fn assert_property_eq(path: &str, expected: &dyn Reflect, actual: &dyn Reflect, leniency: &Leniency) {
    if let Err(failure) = check_property_eq(path, expected, actual, leniency) {
        panic!("property '{}': {}", path, failure);
    }
}

/// Lenient property assertion that also works over collections.
///
/// When `actual` is a sequence, the property is collected from every
/// element and the collected values are compared with `expected` (itself a
/// collection) in any order.
///
/// # Panics
///
/// When the property differs, is missing, or cannot be compared.
#[track_caller]
pub fn assert_property_lenient_eq(path: &str, expected: &dyn Reflect, actual: &dyn Reflect) {
    let result = match resolve(actual).1 {
        Shape::Seq(_) => property_values(actual, path)
            .map_err(|e| AssertionFailure::Engine(e.into()))
            .and_then(|values| check_reflection_eq(expected, &values, &Leniency::lenient())),
        _ => check_property_eq(path, expected, actual, &Leniency::lenient()),
    };
    if let Err(failure) = result {
        panic!("property '{}': {}", path, failure);
    }
}

/// Assert strict structural equality of two expressions.
///
/// ```
/// refcmp_core::assert_ref_eq!(vec![1, 2], vec![1, 2]);
/// refcmp_core::assert_ref_eq!("a".to_string(), "a".to_string(), "names for {}", 42);
/// ```
#[macro_export]
macro_rules! assert_ref_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::reflection_assert::assert_reflection_eq(&$expected, &$actual)
    };
    ($expected:expr, $actual:expr, $($arg:tt)+) => {
        if let Err(failure) = $crate::reflection_assert::check_reflection_eq(
            &$expected,
            &$actual,
            &$crate::compare::Leniency::strict(),
        ) {
            panic!("{}: {}", format_args!($($arg)+), failure);
        }
    };
}

/// Assert lenient (any order, ignored defaults) equality of two expressions.
///
/// ```
/// refcmp_core::assert_len_eq!(vec![2, 1], vec![1, 2]);
/// ```
#[macro_export]
macro_rules! assert_len_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::reflection_assert::assert_lenient_eq(&$expected, &$actual)
    };
    ($expected:expr, $actual:expr, $($arg:tt)+) => {
        if let Err(failure) = $crate::reflection_assert::check_reflection_eq(
            &$expected,
            &$actual,
            &$crate::compare::Leniency::lenient(),
        ) {
            panic!("{}: {}", format_args!($($arg)+), failure);
        }
    };
}
