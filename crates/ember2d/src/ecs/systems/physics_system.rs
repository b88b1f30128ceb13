//! ECS wrapper around the collision detection core
//!
//! Runs in three strictly ordered stages each frame: sync collider state
//! from the world into the detector, run broad+narrow phase detection, then
//! dispatch the resulting enter/exit events to the subscribed handlers.
//! Handlers receive `&mut World` and may spawn, destroy, or reconfigure
//! entities freely; the detector's own borrows are released before dispatch.

use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

use crate::config::EngineConfig;
use crate::ecs::components::{world_transform, ColliderComponent};
use crate::ecs::pipeline::UpdateCommands;
use crate::ecs::system::UpdateSystem;
use crate::ecs::world::World;
use crate::foundation::time::GameTime;
use crate::physics::collision_system::CollisionSystem;

/// Drives collision detection and event dispatch for the whole world
pub struct PhysicsSystem {
    collision: CollisionSystem,
    order: i32,
}

impl PhysicsSystem {
    /// Build from engine configuration (grid cell size, broad-phase choice,
    /// order slot)
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            collision: CollisionSystem::new(config.grid_cell_size, config.use_spatial_grid),
            order: config.orders.physics,
        }
    }

    /// Physics system with defaults and an explicit order slot
    pub fn with_order(order: i32) -> Self {
        let mut system = Self::new(&EngineConfig::default());
        system.order = order;
        system
    }

    /// Read access to the underlying detector, mainly for queries and tests
    pub fn collision(&self) -> &CollisionSystem {
        &self.collision
    }

    /// Mirror world collider state into the detector
    ///
    /// Colliders that went away (entity destroyed or deactivated, component
    /// removed or disabled) are unregistered; live ones get their shape
    /// position refreshed from the world transform. Entities whose transform
    /// cannot be resolved are skipped for the frame, not unregistered, so a
    /// transient detach does not fabricate exit events.
    fn sync(&mut self, world: &World) {
        for entity in self.collision.entities() {
            let gone = !world.is_active(entity)
                || world
                    .get_component::<ColliderComponent>(entity)
                    .map_or(true, |c| !c.enabled);
            if gone {
                self.collision.remove(entity);
            }
        }

        for entity in world.entities_with::<ColliderComponent>() {
            let Some(collider) = world.get_component::<ColliderComponent>(entity) else {
                continue;
            };
            if !collider.enabled {
                continue;
            }
            let Some(transform) = world_transform(world, entity) else {
                log::trace!(
                    "collider on {:?} has no transform, skipping this frame",
                    entity
                );
                continue;
            };
            let mut shape = collider.shape.clone();
            shape.set_position(transform.position);
            self.collision.upsert(
                entity,
                shape,
                collider.layer,
                collider.mask,
                collider.is_trigger,
            );
        }
    }

    fn dispatch(&mut self, world: &mut World, events: Vec<crate::physics::CollisionEvent>) {
        for event in &events {
            let Some(collider) = world.get_component_mut::<ColliderComponent>(event.entity) else {
                continue;
            };
            let mut handlers = collider.take_handlers();
            if handlers.is_empty() {
                continue;
            }
            // A panicking handler must not take its siblings with it: restore
            // the list first, then let the pipeline's isolation see the panic.
            let result = catch_unwind(AssertUnwindSafe(|| {
                for (_, handler) in handlers.iter_mut() {
                    handler(world, event);
                }
            }));
            // The handler may have removed the component or destroyed the
            // entity; in that case the handlers die with it.
            if let Some(collider) = world.get_component_mut::<ColliderComponent>(event.entity) {
                collider.restore_handlers(handlers);
            }
            if let Err(payload) = result {
                resume_unwind(payload);
            }
        }
    }
}

impl UpdateSystem for PhysicsSystem {
    fn name(&self) -> &str {
        "physics"
    }

    fn update_order(&self) -> i32 {
        self.order
    }

    fn is_sequential(&self) -> bool {
        true
    }

    fn update(&mut self, _time: &GameTime, world: &mut World, _: &mut UpdateCommands) {
        self.sync(world);

        let events = self.collision.detect();

        // Refresh each collider's touching mirror before handlers run so
        // they observe a consistent picture.
        for entity in world.entities_with::<ColliderComponent>() {
            let contacts = self.collision.contacts(entity).cloned().unwrap_or_default();
            if let Some(collider) = world.get_component_mut::<ColliderComponent>(entity) {
                collider.set_touching(contacts);
            }
        }

        if !events.is_empty() {
            log::debug!("{} collision edge(s) this frame", events.len());
        }
        self.dispatch(world, events);
    }
}
