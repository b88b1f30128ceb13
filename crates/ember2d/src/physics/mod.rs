//! Collision detection: shapes, broad-phase grid, and the pure collision core
//!
//! This module is ECS-free on purpose; the pipeline-facing wrapper lives in
//! `ecs::systems::PhysicsSystem`. Splitting the two keeps the geometric core
//! testable without a world.

pub mod collision_system;
pub mod grid;
pub mod layers;
pub mod shape;

pub use collision_system::{CollisionEvent, CollisionEventKind, CollisionSystem};
pub use grid::SpatialGrid;
pub use layers::CollisionLayer;
pub use shape::{Aabb, BoxShape, CircleShape, CollisionShape};
