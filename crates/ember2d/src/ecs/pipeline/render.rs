//! Render pipeline: ordered execution of draw-only systems

use std::collections::HashSet;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::time::Instant;

use crate::ecs::pipeline::{panic_message, RenderCommands};
use crate::ecs::system::RenderSystem;
use crate::ecs::world::World;
use crate::profiling::Profiler;
use crate::render::Renderer;

/// Executes registered render systems in ascending `draw_order`
///
/// Mirrors the update pipeline's guarantees: stable ordering, deferred
/// structural mutation, disable/enable by name, and per-system panic
/// isolation. The world is read-only here; draw systems only talk to the
/// renderer.
pub struct RenderPipeline {
    systems: Vec<Box<dyn RenderSystem>>,
    disabled: HashSet<String>,
    pending: RenderCommands,
    executing: bool,
    sorted: bool,
    profiler: Option<Box<dyn Profiler>>,
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            disabled: HashSet::new(),
            pending: RenderCommands::default(),
            executing: false,
            sorted: true,
            profiler: None,
        }
    }

    /// Attach a profiler; every system invocation is wrapped in a scope
    pub fn set_profiler(&mut self, profiler: Option<Box<dyn Profiler>>) {
        self.profiler = profiler;
    }

    /// Register a draw system (deferred to the frame boundary while executing)
    pub fn add_system(&mut self, system: Box<dyn RenderSystem>) {
        if self.executing {
            self.pending.add.push(system);
        } else {
            self.systems.push(system);
            self.sorted = false;
        }
    }

    /// Remove a draw system by name; returns whether it was found
    pub fn remove_system(&mut self, name: &str) -> bool {
        if self.executing {
            if let Some(i) = self.pending.add.iter().position(|s| s.name() == name) {
                self.pending.add.remove(i);
                return true;
            }
            if self.systems.iter().any(|s| s.name() == name) {
                self.pending.remove.push(name.to_owned());
                return true;
            }
            false
        } else {
            match self.systems.iter().position(|s| s.name() == name) {
                Some(i) => {
                    self.systems.remove(i);
                    true
                }
                None => false,
            }
        }
    }

    /// Skip the named systems; they stay registered and keep their order
    pub fn disable_systems(&mut self, names: &[&str]) {
        self.disabled.extend(names.iter().map(|s| (*s).to_string()));
    }

    /// Clear the skip list
    pub fn enable_all_systems(&mut self) {
        self.disabled.clear();
    }

    /// Is the named system currently skipped?
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.contains(name)
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// True when no systems are registered
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Run every enabled draw system against the renderer, in order
    pub fn execute(&mut self, world: &World, renderer: &mut dyn Renderer) {
        self.flush_pending();
        if !self.sorted {
            self.systems.sort_by_key(|s| s.draw_order());
            self.sorted = true;
        }

        self.executing = true;
        let mut commands = RenderCommands::default();
        let result = {
            let systems = &mut self.systems;
            let disabled = &self.disabled;
            let profiler = &mut self.profiler;
            catch_unwind(AssertUnwindSafe(|| {
                for system in systems.iter_mut() {
                    if disabled.contains(system.name()) {
                        continue;
                    }
                    if let Some(profiler) = profiler.as_deref_mut() {
                        profiler.begin_scope(system.name());
                    }
                    let start = Instant::now();
                    let outcome = catch_unwind(AssertUnwindSafe(|| {
                        system.render(world, renderer, &mut commands)
                    }));
                    if let Some(profiler) = profiler.as_deref_mut() {
                        profiler.end_scope(system.name(), start.elapsed());
                    }
                    if let Err(payload) = outcome {
                        log::error!(
                            "render system '{}' panicked; skipping it for the rest of the frame: {}",
                            system.name(),
                            panic_message(payload.as_ref())
                        );
                    }
                }
            }))
        };
        self.executing = false;
        commands.merge_into(&mut self.pending);
        self.flush_pending();
        if let Err(payload) = result {
            resume_unwind(payload);
        }
    }

    fn flush_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for name in pending.remove {
            if let Some(i) = self.systems.iter().position(|s| s.name() == name) {
                self.systems.remove(i);
            } else {
                log::debug!("deferred removal of unknown render system '{name}'");
            }
        }
        if !pending.add.is_empty() {
            self.systems.extend(pending.add);
            self.sorted = false;
        }
        if pending.enable_all {
            self.disabled.clear();
        }
        self.disabled.extend(pending.disable);
    }
}
