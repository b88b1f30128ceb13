//! Ordered system execution
//!
//! Both pipelines share one correctness argument: systems run sequentially
//! on the frame thread, and structural mutation requested while a frame is
//! in flight lands in a command buffer that is flushed at well-defined
//! points (start and end of `execute`), never applied mid-iteration. This is
//! a single-threaded reentrancy guard, not a lock.

mod render;
mod update;

pub use render::RenderPipeline;
pub use update::UpdatePipeline;

use crate::ecs::system::{RenderSystem, UpdateSystem};

/// Deferred structural operations against a pipeline
///
/// Systems receive one of these during execution; everything queued here is
/// applied after the current frame's iteration finishes and is first
/// observable on the next `execute` call.
pub struct CommandBuffer<S: ?Sized> {
    pub(crate) add: Vec<Box<S>>,
    pub(crate) remove: Vec<String>,
    pub(crate) disable: Vec<String>,
    pub(crate) enable_all: bool,
}

/// Command buffer for the update pipeline
pub type UpdateCommands = CommandBuffer<dyn UpdateSystem>;

/// Command buffer for the render pipeline
pub type RenderCommands = CommandBuffer<dyn RenderSystem>;

impl<S: ?Sized> Default for CommandBuffer<S> {
    fn default() -> Self {
        Self {
            add: Vec::new(),
            remove: Vec::new(),
            disable: Vec::new(),
            enable_all: false,
        }
    }
}

impl<S: ?Sized> CommandBuffer<S> {
    /// Queue a system for registration next frame
    pub fn add_system(&mut self, system: Box<S>) {
        self.add.push(system);
    }

    /// Queue a system for removal next frame
    pub fn remove_system(&mut self, name: impl Into<String>) {
        self.remove.push(name.into());
    }

    /// Queue systems to be skipped starting next frame
    pub fn disable_systems(&mut self, names: &[&str]) {
        self.disable.extend(names.iter().map(|s| (*s).to_string()));
    }

    /// Queue clearing of the skip list
    pub fn enable_all_systems(&mut self) {
        self.enable_all = true;
    }

    /// True when nothing was queued
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty() && self.disable.is_empty() && !self.enable_all
    }

    pub(crate) fn merge_into(self, other: &mut CommandBuffer<S>) {
        other.add.extend(self.add);
        other.remove.extend(self.remove);
        other.disable.extend(self.disable);
        other.enable_all |= self.enable_all;
    }
}

/// Render a panic payload for the per-system fault log
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
