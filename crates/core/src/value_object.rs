//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Every record and result the engine exchanges with its callers is a value
/// object: immutable once built, compared by its fields, and free of identity.
/// A `VarianceResult` for "Fertilizer" computed twice from the same inputs is
/// the same value, and callers may cache or compare it accordingly.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
