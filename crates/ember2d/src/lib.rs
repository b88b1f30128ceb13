//! ember2d: a 2D game engine core
//!
//! The crate provides the frame skeleton of a 2D game: an entity-component
//! world, deterministic update and render pipelines, and a layered collision
//! subsystem with optional spatial-grid broad phase. It deliberately owns no
//! window, graphics API, or audio backend; hosts supply a [`render::Renderer`]
//! and drive the loop themselves.
//!
//! A minimal frame looks like:
//!
//! ```no_run
//! use ember2d::prelude::*;
//!
//! let config = EngineConfig::default();
//! let mut world = World::new();
//! let mut update = UpdatePipeline::new();
//! update.add_system(Box::new(MovementSystem::new(&config)));
//! update.add_system(Box::new(PhysicsSystem::new(&config)));
//!
//! let mut timer = Timer::new();
//! loop {
//!     let time = timer.tick();
//!     update.execute(&time, &mut world);
//! #   break;
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod physics;
pub mod profiling;
pub mod render;

/// Common imports for engine hosts
pub mod prelude {
    pub use crate::config::{Config, EngineConfig, SystemOrders};
    pub use crate::ecs::components::{
        world_transform, ColliderComponent, LifetimeComponent, TransformComponent,
        VelocityComponent,
    };
    pub use crate::ecs::systems::{LifetimeSystem, MovementSystem, PhysicsSystem};
    pub use crate::ecs::{
        Component, Entity, RenderCommands, RenderPipeline, RenderSystem, UpdateCommands,
        UpdatePipeline, UpdateSystem, World,
    };
    pub use crate::foundation::{GameTime, Timer, Vec2};
    pub use crate::physics::{
        CollisionEvent, CollisionEventKind, CollisionLayer, CollisionShape,
    };
    pub use crate::render::{Camera2D, Color, Renderer};
}
