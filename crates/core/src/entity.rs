//! Entity trait: a record whose identity outlives edits to its fields.

/// Entity marker + minimal interface.
///
/// A `FoodItem` keeps its store-assigned id while its name and expiry date
/// are edited in place.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
