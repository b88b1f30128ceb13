//! System traits for the update and render pipelines

use crate::ecs::pipeline::{RenderCommands, UpdateCommands};
use crate::ecs::world::World;
use crate::foundation::time::GameTime;
use crate::render::Renderer;

/// Default update-order slots; see `config::SystemOrders` for the
/// configurable version
pub mod order {
    /// AI / decision systems
    pub const AI: i32 = 50;
    /// Velocity integration
    pub const MOVEMENT: i32 = 100;
    /// Collision detection and response
    pub const PHYSICS: i32 = 200;
    /// Audio reaction systems
    pub const AUDIO: i32 = 400;
}

/// Per-frame logic unit executed by the update pipeline
///
/// Systems run sequentially in ascending `update_order`; ties keep
/// registration order. A system may parallelize its own per-entity work
/// internally, in which case it alone guarantees that work is free of
/// cross-entity mutation hazards.
pub trait UpdateSystem {
    /// Unique name; used for removal, disabling, logging, and profiling
    fn name(&self) -> &str;

    /// Position in the frame; lower runs earlier
    fn update_order(&self) -> i32 {
        order::MOVEMENT
    }

    /// Advisory flag: this system must not be dispatched concurrently with
    /// itself (e.g. it keeps shared iteration state between entities).
    /// Consumed by optional threading layers, ignored by the sequential
    /// pipeline.
    fn is_sequential(&self) -> bool {
        false
    }

    /// Run one frame of work against the shared world
    ///
    /// Structural pipeline changes (adding or removing systems) go through
    /// `commands` and take effect starting next frame.
    fn update(&mut self, time: &GameTime, world: &mut World, commands: &mut UpdateCommands);
}

/// Draw-only logic unit executed by the render pipeline
///
/// Render systems read the already-updated world and issue primitive draw
/// calls; they never mutate entity state.
pub trait RenderSystem {
    /// Unique name; used for removal, disabling, logging, and profiling
    fn name(&self) -> &str;

    /// Position in the draw order; lower draws earlier (further back)
    fn draw_order(&self) -> i32 {
        0
    }

    /// Issue draw calls for the current world state
    fn render(
        &mut self,
        world: &World,
        renderer: &mut dyn Renderer,
        commands: &mut RenderCommands,
    );
}
