//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are only constructed through a
/// validating constructor, so holding one means the value is already known to
/// be well formed. "Editing" one means replacing it with a new value.
///
/// ```ignore
/// let a: JalaliDate = "1402/5/16".parse()?;
/// let b = JalaliDate::new(1402, 5, 16)?;
/// assert_eq!(a, b); // equal by value
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
