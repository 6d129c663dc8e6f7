//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are domain objects that are **immutable** and **compared by value**.
/// They represent concepts where identity doesn't matter - only the values matter.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (two value objects with same values are equal)
/// - **Entity**: Has identity (two entities with same ID are the same entity)
///
/// Example:
/// - `OrderLine { order_id: "o-1", sku: "CLOCK", quantity: 10 }` is a value object
/// - `Batch { reference: "batch-001", .. }` is an entity
///
/// ## Immutability
///
/// Value objects expose no setters. To "modify" one, build a new one: an order
/// line for 11 clocks is a different order line than one for 10.
///
/// ## Usage Pattern
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// struct Quantity(u32);
///
/// impl ValueObject for Quantity {}
///
/// assert_eq!(Quantity(3), Quantity(3));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
