//! Macros for registering user types with the engine.

/// Implement [`Reflect`](crate::reflect::Reflect) for a struct by listing
/// the fields the engine may see.
///
/// Fields not listed are invisible to comparisons, property lookups and
/// rendering. Every listed field's type must itself implement `Reflect`.
///
/// ```
/// use refcmp_core::reflect_object;
///
/// struct Address {
///     street: String,
///     number: u32,
/// }
///
/// reflect_object!(Address { street, number });
/// ```
#[macro_export]
macro_rules! reflect_object {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::reflect::Reflect for $ty {
            fn shape(&self) -> $crate::reflect::Shape<'_> {
                $crate::reflect::Shape::Object(vec![
                    $($crate::reflect::Field::new(stringify!($field), &self.$field)),*
                ])
            }
        }
    };
}

/// Implement [`Reflect`](crate::reflect::Reflect) for a unit-only enum.
///
/// Values compare as enum constants: equal iff they are the same variant.
///
/// ```
/// use refcmp_core::reflect_enum;
///
/// #[derive(Clone, Copy)]
/// enum Status {
///     Active,
///     Closed,
/// }
///
/// reflect_enum!(Status { Active, Closed });
/// ```
#[macro_export]
macro_rules! reflect_enum {
    ($ty:ty { $($variant:ident),+ $(,)? }) => {
        impl $crate::reflect::Reflect for $ty {
            fn shape(&self) -> $crate::reflect::Shape<'_> {
                let variant = match self {
                    $(Self::$variant => stringify!($variant)),+
                };
                $crate::reflect::Shape::Enum($crate::reflect::EnumConstant {
                    type_name: ::std::any::type_name::<$ty>(),
                    variant,
                })
            }
        }
    };
}
