//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity: two instances holding the same attribute
/// values are interchangeable. They are immutable; "changing" one means
/// constructing a new value, which re-runs its validation.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Discount(f64);
///
/// impl ValueObject for Discount {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
