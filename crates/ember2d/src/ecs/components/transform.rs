//! Transform component and world-space resolution
//!
//! A `TransformComponent` stores values local to the entity's parent (or to
//! the world origin for root entities). World values are resolved on demand
//! by walking the parent chain; they are a pure function of the locals, so
//! nothing caches them. Cycles cannot form: `World::set_parent` rejects
//! them at construction time.

use std::any::Any;

use crate::ecs::component::Component;
use crate::ecs::entity::Entity;
use crate::ecs::world::World;
use crate::foundation::math::{rotate_vec, Vec2};

/// Resolved world-space transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// World position
    pub position: Vec2,
    /// World rotation in radians, counter-clockwise
    pub rotation: f32,
    /// World scale factors
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// The identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Apply this transform to a child-local transform (TRS compose)
    pub fn compose(&self, local: &Transform2D) -> Transform2D {
        Transform2D {
            position: self.position
                + rotate_vec(local.position.component_mul(&self.scale), self.rotation),
            rotation: self.rotation + local.rotation,
            scale: self.scale.component_mul(&local.scale),
        }
    }
}

/// Position, rotation, and scale local to the entity's parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    /// Local position
    pub position: Vec2,
    /// Local rotation in radians
    pub rotation: f32,
    /// Local scale factors
    pub scale: Vec2,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Transform at a position with no rotation or scaling
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder: set rotation
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set scale
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// The local values as a `Transform2D`
    pub fn local(&self) -> Transform2D {
        Transform2D {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Move by a delta in local space
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

impl Component for TransformComponent {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Resolve an entity's world-space transform through its parent chain
///
/// Returns `None` when the entity has no `TransformComponent`. Ancestors
/// without a transform contribute identity, so a bare grouping parent does
/// not offset its children.
pub fn world_transform(world: &World, entity: Entity) -> Option<Transform2D> {
    let local = world.get_component::<TransformComponent>(entity)?.local();
    let parent_world = world
        .parent(entity)
        .and_then(|parent| world_transform_or_identity(world, parent));
    Some(match parent_world {
        Some(parent) => parent.compose(&local),
        None => local,
    })
}

fn world_transform_or_identity(world: &World, entity: Entity) -> Option<Transform2D> {
    match world_transform(world, entity) {
        Some(t) => Some(t),
        // No transform on this ancestor: keep walking upward.
        None => world
            .parent(entity)
            .and_then(|parent| world_transform_or_identity(world, parent)),
    }
}
