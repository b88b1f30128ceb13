//! Bounded-lifespan entities

use crate::ecs::components::LifetimeComponent;
use crate::ecs::pipeline::UpdateCommands;
use crate::ecs::system::UpdateSystem;
use crate::ecs::world::World;
use crate::foundation::time::GameTime;

/// Counts down `LifetimeComponent`s and destroys expired entities
///
/// Destruction is deferred: the entity is deactivated immediately and
/// reclaimed at the end-of-frame maintenance pass, like any other
/// `World::destroy`.
pub struct LifetimeSystem {
    order: i32,
}

impl Default for LifetimeSystem {
    fn default() -> Self {
        // After physics so a dying entity still gets its final contacts.
        Self { order: 500 }
    }
}

impl LifetimeSystem {
    /// Lifetime system in an explicit order slot
    pub fn with_order(order: i32) -> Self {
        Self { order }
    }
}

impl UpdateSystem for LifetimeSystem {
    fn name(&self) -> &str {
        "lifetime"
    }

    fn update_order(&self) -> i32 {
        self.order
    }

    fn update(&mut self, time: &GameTime, world: &mut World, _: &mut UpdateCommands) {
        let dt = time.delta_seconds();
        for entity in world.entities_with::<LifetimeComponent>() {
            let expired = match world.get_component_mut::<LifetimeComponent>(entity) {
                Some(lifetime) => {
                    lifetime.remaining -= dt;
                    lifetime.expired()
                }
                None => false,
            };
            if expired {
                log::debug!("lifetime expired for {:?}", entity);
                world.destroy(entity);
            }
        }
    }
}
