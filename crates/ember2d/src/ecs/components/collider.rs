//! Collider component: shape template, layer filter, and event observers
//!
//! The component stores configuration; authoritative collision state (the
//! contact side tables, the grid) belongs to the physics system. The
//! `touching` mirror kept here exists for cheap read access from game code
//! and draw systems and is overwritten every physics update.

use std::any::Any;
use std::collections::HashSet;

use crate::ecs::component::Component;
use crate::ecs::entity::Entity;
use crate::ecs::world::World;
use crate::physics::collision_system::CollisionEvent;
use crate::physics::layers::CollisionLayer;
use crate::physics::shape::CollisionShape;

/// Callback invoked for every collision event addressed to the owner
///
/// Handlers may mutate the world freely, including destroying either entity
/// of the pair; the physics system dispatches them outside its own borrows.
pub type CollisionHandler = Box<dyn FnMut(&mut World, &CollisionEvent)>;

/// Identifies a registered handler for later removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Attaches collision detection to an entity
pub struct ColliderComponent {
    /// Shape template; its position is overwritten from the transform each
    /// frame, the other parameters are authored here
    pub shape: CollisionShape,
    /// Layer this collider sits on
    pub layer: CollisionLayer,
    /// Layers this collider observes (directional; see `physics::layers`)
    pub mask: CollisionLayer,
    /// Triggers report overlap without physical response
    pub is_trigger: bool,
    /// Disabled colliders are unregistered from detection entirely
    pub enabled: bool,

    touching: HashSet<Entity>,
    handlers: Vec<(HandlerId, CollisionHandler)>,
    // While the handler list is moved out for dispatch, these track the ids
    // of the moved-out generation and removals requested against it.
    taken_ids: Vec<HandlerId>,
    pending_remove: Vec<HandlerId>,
    next_handler: u64,
    owner: Option<Entity>,
}

impl ColliderComponent {
    /// Collider with the given shape, on all layers, observing all layers
    pub fn new(shape: CollisionShape) -> Self {
        Self {
            shape,
            layer: CollisionLayer::ALL,
            mask: CollisionLayer::ALL,
            is_trigger: false,
            enabled: true,
            touching: HashSet::new(),
            handlers: Vec::new(),
            taken_ids: Vec::new(),
            pending_remove: Vec::new(),
            next_handler: 0,
            owner: None,
        }
    }

    /// Builder: restrict layer and mask
    pub fn with_layers(mut self, layer: CollisionLayer, mask: CollisionLayer) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Builder: mark as a trigger volume
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Subscribe to collision events addressed to this entity
    ///
    /// Handlers run in registration order. The returned id stays valid
    /// until `remove_handler`.
    pub fn on_collision(&mut self, handler: CollisionHandler) -> HandlerId {
        let id = HandlerId(self.next_handler);
        self.next_handler += 1;
        self.handlers.push((id, handler));
        id
    }

    /// Unsubscribe a handler; returns whether it was registered
    ///
    /// Safe to call from inside a dispatched handler: a handler unsubscribing
    /// itself (or a sibling) mid-dispatch is honored once dispatch finishes.
    pub fn remove_handler(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        if self.handlers.len() != before {
            return true;
        }
        // The list may be moved out for dispatch right now; removals against
        // that generation are applied when it is restored.
        if self.taken_ids.contains(&id) && !self.pending_remove.contains(&id) {
            self.pending_remove.push(id);
            return true;
        }
        false
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// The entity this component is attached to
    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    /// Is anything currently overlapping this collider?
    pub fn is_touching(&self) -> bool {
        !self.touching.is_empty()
    }

    /// Entities currently overlapping this collider, as of the last physics
    /// update
    pub fn touching(&self) -> &HashSet<Entity> {
        &self.touching
    }

    pub(crate) fn set_touching(&mut self, touching: HashSet<Entity>) {
        self.touching = touching;
    }

    pub(crate) fn take_handlers(&mut self) -> Vec<(HandlerId, CollisionHandler)> {
        let taken = std::mem::take(&mut self.handlers);
        self.taken_ids = taken.iter().map(|(id, _)| *id).collect();
        taken
    }

    /// Put taken handlers back, keeping any registered during dispatch after
    /// the originals and applying removals requested while the list was out
    pub(crate) fn restore_handlers(&mut self, mut taken: Vec<(HandlerId, CollisionHandler)>) {
        self.taken_ids.clear();
        let pending = std::mem::take(&mut self.pending_remove);
        std::mem::swap(&mut self.handlers, &mut taken);
        self.handlers.extend(taken);
        if !pending.is_empty() {
            self.handlers.retain(|(h, _)| !pending.contains(h));
        }
    }
}

impl Component for ColliderComponent {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
    fn on_added(&mut self, entity: Entity) {
        self.owner = Some(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handlers_are_removable_by_id() {
        let mut collider = ColliderComponent::new(CollisionShape::new_circle(1.0));
        let a = collider.on_collision(Box::new(|_, _| {}));
        let b = collider.on_collision(Box::new(|_, _| {}));
        assert_eq!(collider.handler_count(), 2);
        assert_ne!(a, b);

        assert!(collider.remove_handler(a));
        assert!(!collider.remove_handler(a));
        assert_eq!(collider.handler_count(), 1);
    }

    #[test]
    fn owner_is_captured_on_attach() {
        let mut world = World::new();
        let e = world.spawn("body");
        world.add_component(e, ColliderComponent::new(CollisionShape::new_box(1.0, 1.0)));
        assert_eq!(
            world.get_component::<ColliderComponent>(e).unwrap().owner(),
            Some(e)
        );
    }

    #[test]
    fn removal_while_taken_is_applied_on_restore() {
        let mut collider = ColliderComponent::new(CollisionShape::new_circle(1.0));
        let keep = collider.on_collision(Box::new(|_, _| {}));
        let drop = collider.on_collision(Box::new(|_, _| {}));

        let taken = collider.take_handlers();
        // Removing a taken handler reports success and sticks after restore.
        assert!(collider.remove_handler(drop));
        assert!(!collider.remove_handler(drop));
        collider.restore_handlers(taken);

        assert_eq!(collider.handler_count(), 1);
        assert_eq!(collider.handlers[0].0, keep);
        // The taken generation is gone; a stale id is now a miss.
        assert!(!collider.remove_handler(drop));
    }

    #[test]
    fn restore_keeps_dispatch_registrations_after_originals() {
        let mut collider = ColliderComponent::new(CollisionShape::new_circle(1.0));
        let original = collider.on_collision(Box::new(|_, _| {}));
        let taken = collider.take_handlers();
        assert_eq!(collider.handler_count(), 0);

        // Simulates a handler subscribing during dispatch.
        let during = collider.on_collision(Box::new(|_, _| {}));
        collider.restore_handlers(taken);
        assert_eq!(collider.handler_count(), 2);
        assert_eq!(collider.handlers[0].0, original);
        assert_eq!(collider.handlers[1].0, during);
    }
}
