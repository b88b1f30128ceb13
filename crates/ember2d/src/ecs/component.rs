//! Component trait
//!
//! Components are plain data with optional lifecycle hooks. At most one
//! component of a given type may be attached to an entity; the world
//! enforces that at attach time.

use std::any::Any;

use crate::ecs::Entity;

/// A unit of data attached to exactly one entity per type
///
/// `on_added` runs synchronously right after attachment and `on_removed`
/// right before the component is dropped (including during entity
/// destruction). Components that want a back-reference to their owner store
/// the `Entity` handle they receive in `on_added`; handles stay valid to
/// hold even after the entity dies, they just stop resolving.
pub trait Component: Any {
    /// Upcast for downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete type
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Called synchronously after the component is attached
    fn on_added(&mut self, _entity: Entity) {}

    /// Called before the component is detached or its entity destroyed
    fn on_removed(&mut self, _entity: Entity) {}
}
