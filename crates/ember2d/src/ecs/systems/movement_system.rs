//! Velocity integration
//!
//! Runs in the `movement` order slot, after decision systems and before
//! collision detection. Integration of one entity never reads another, so
//! with the `parallel` feature the math fans out across rayon workers on a
//! plain-data snapshot; writes always happen serially on the frame thread.

use crate::config::EngineConfig;
use crate::ecs::components::{TransformComponent, VelocityComponent};
use crate::ecs::pipeline::UpdateCommands;
use crate::ecs::system::{order, UpdateSystem};
use crate::ecs::world::World;
use crate::foundation::time::GameTime;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Integrates `VelocityComponent` into `TransformComponent` every frame
pub struct MovementSystem {
    order: i32,
}

impl Default for MovementSystem {
    fn default() -> Self {
        Self {
            order: order::MOVEMENT,
        }
    }
}

impl MovementSystem {
    /// Movement system in the configured order slot
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            order: config.orders.movement,
        }
    }

    /// Override the order slot
    pub fn with_order(order: i32) -> Self {
        Self { order }
    }
}

impl UpdateSystem for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn update_order(&self) -> i32 {
        self.order
    }

    #[cfg(feature = "parallel")]
    fn update(&mut self, time: &GameTime, world: &mut World, _: &mut UpdateCommands) {
        let dt = time.delta_seconds();
        let snapshot: Vec<_> = world
            .entities_with2::<TransformComponent, VelocityComponent>()
            .into_iter()
            .filter_map(|entity| {
                let velocity = *world.get_component::<VelocityComponent>(entity)?;
                let transform = world.get_component::<TransformComponent>(entity)?;
                Some((entity, transform.position, transform.rotation, velocity))
            })
            .collect();

        let integrated: Vec<_> = snapshot
            .into_par_iter()
            .map(|(entity, position, rotation, velocity)| {
                (
                    entity,
                    position + velocity.linear * dt,
                    rotation + velocity.angular * dt,
                )
            })
            .collect();

        for (entity, position, rotation) in integrated {
            if let Some(transform) = world.get_component_mut::<TransformComponent>(entity) {
                transform.position = position;
                transform.rotation = rotation;
            }
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn update(&mut self, time: &GameTime, world: &mut World, _: &mut UpdateCommands) {
        let dt = time.delta_seconds();
        for entity in world.entities_with2::<TransformComponent, VelocityComponent>() {
            let Some(velocity) = world.get_component::<VelocityComponent>(entity).copied() else {
                continue;
            };
            if let Some(transform) = world.get_component_mut::<TransformComponent>(entity) {
                transform.position += velocity.linear * dt;
                transform.rotation += velocity.angular * dt;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    #[test]
    fn integrates_position_and_rotation() {
        let mut world = World::new();
        let e = world.spawn("mover");
        world.add_component(e, TransformComponent::identity());
        world.add_component(e, VelocityComponent::linear(10.0, -4.0).with_angular(2.0));

        let mut system = MovementSystem::default();
        let time = GameTime::from_seconds(0.5, 0.5);
        let mut commands = UpdateCommands::default();
        system.update(&time, &mut world, &mut commands);

        let transform = world.get_component::<TransformComponent>(e).unwrap();
        assert_eq!(transform.position, Vec2::new(5.0, -2.0));
        assert_eq!(transform.rotation, 1.0);
    }

    #[test]
    fn entities_without_velocity_stay_put() {
        let mut world = World::new();
        let e = world.spawn("static");
        world.add_component(e, TransformComponent::from_position(Vec2::new(1.0, 1.0)));

        let mut system = MovementSystem::default();
        let time = GameTime::from_seconds(1.0, 1.0);
        let mut commands = UpdateCommands::default();
        system.update(&time, &mut world, &mut commands);

        let transform = world.get_component::<TransformComponent>(e).unwrap();
        assert_eq!(transform.position, Vec2::new(1.0, 1.0));
    }
}
