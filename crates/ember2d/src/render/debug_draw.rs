//! Collider outline visualization
//!
//! Draws every active collider as an outline, switching color when the
//! entity is currently in contact with something. Useful while tuning
//! shapes and layers; disable it by name in shipping builds.

use crate::ecs::components::{world_transform, ColliderComponent};
use crate::ecs::pipeline::RenderCommands;
use crate::ecs::system::RenderSystem;
use crate::ecs::world::World;
use crate::physics::shape::CollisionShape;
use crate::render::{Color, Renderer};

/// Render system that outlines collision shapes
pub struct CollisionDebugRenderSystem {
    order: i32,
    idle_color: Color,
    contact_color: Color,
}

impl Default for CollisionDebugRenderSystem {
    fn default() -> Self {
        Self {
            order: 1000, // on top of everything
            idle_color: Color::GREEN,
            contact_color: Color::RED,
        }
    }
}

impl CollisionDebugRenderSystem {
    /// Create with the default draw order and colors
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the draw order
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }
}

impl RenderSystem for CollisionDebugRenderSystem {
    fn name(&self) -> &str {
        "collision_debug"
    }

    fn draw_order(&self) -> i32 {
        self.order
    }

    fn render(&mut self, world: &World, renderer: &mut dyn Renderer, _: &mut RenderCommands) {
        for entity in world.entities_with::<ColliderComponent>() {
            let Some(collider) = world.get_component::<ColliderComponent>(entity) else {
                continue;
            };
            let Some(transform) = world_transform(world, entity) else {
                continue;
            };
            let color = if collider.is_touching() {
                self.contact_color
            } else {
                self.idle_color
            };
            let mut shape = collider.shape.clone();
            shape.set_position(transform.position);
            let center = shape.center();
            match &shape {
                CollisionShape::Box(b) => renderer.stroke_rect(center, b.width, b.height, color),
                CollisionShape::Circle(c) => renderer.stroke_circle(center, c.radius, color),
            }
        }
    }
}
