//! Update pipeline: ordered, fault-isolated execution of per-frame systems

use std::collections::HashSet;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::time::Instant;

use crate::ecs::pipeline::{panic_message, UpdateCommands};
use crate::ecs::system::UpdateSystem;
use crate::ecs::world::World;
use crate::foundation::time::GameTime;
use crate::profiling::Profiler;

/// Executes registered update systems once per frame, in ascending
/// `update_order`
///
/// Structural mutation is phase-guarded: while a frame is executing, adds
/// and removes are deferred into pending buffers and flushed at the frame
/// boundary, so the system list never changes under the iteration. The
/// flush runs even when the frame unwinds.
pub struct UpdatePipeline {
    systems: Vec<Box<dyn UpdateSystem>>,
    disabled: HashSet<String>,
    pending: UpdateCommands,
    executing: bool,
    sorted: bool,
    profiler: Option<Box<dyn Profiler>>,
}

impl Default for UpdatePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdatePipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            disabled: HashSet::new(),
            pending: UpdateCommands::default(),
            executing: false,
            sorted: true,
            profiler: None,
        }
    }

    /// Attach a profiler; every system invocation is wrapped in a scope
    pub fn set_profiler(&mut self, profiler: Option<Box<dyn Profiler>>) {
        self.profiler = profiler;
    }

    /// Register a system (deferred to the frame boundary while executing)
    pub fn add_system(&mut self, system: Box<dyn UpdateSystem>) {
        if self.executing {
            self.pending.add.push(system);
        } else {
            self.systems.push(system);
            self.sorted = false;
        }
    }

    /// Remove a system by name; returns whether it was found
    ///
    /// While a frame is executing the removal is deferred, but the return
    /// value still reports presence (registered or pending-add).
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

    /// Number of registered systems (pending ops excluded)
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// True when no systems are registered
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Registered system names in current execution order
    pub fn system_names(&self) -> Vec<String> {
        self.systems.iter().map(|s| s.name().to_owned()).collect()
    }

    /// Run one frame
    ///
    /// 1. Flush ops deferred by the previous frame.
    /// 2. Stable-sort by `update_order` if the list changed (ties keep
    ///    registration order).
    /// 3. Run each enabled system; a panicking system is logged with its
    ///    name and the frame continues with the rest.
    /// 4. Flush ops requested during this frame, then apply the world's
    ///    deferred destructions.
    pub fn execute(&mut self, time: &GameTime, world: &mut World) {
        self.flush_pending();
        if !self.sorted {
            self.systems.sort_by_key(|s| s.update_order());
            self.sorted = true;
        }

        self.executing = true;
        let mut commands = UpdateCommands::default();
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
                        system.update(time, world, &mut commands)
                    }));
                    if let Some(profiler) = profiler.as_deref_mut() {
                        profiler.end_scope(system.name(), start.elapsed());
                    }
                    if let Err(payload) = outcome {
                        log::error!(
                            "update system '{}' panicked; skipping it for the rest of the frame: {}",
                            system.name(),
                            panic_message(payload.as_ref())
                        );
                    }
                }
            }))
        };
        // Cleanup runs even if the loop itself unwound (e.g. a panicking
        // profiler): the phase flag resets and deferred ops still land.
        self.executing = false;
        commands.merge_into(&mut self.pending);
        self.flush_pending();
        world.maintain();
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
                log::debug!("deferred removal of unknown update system '{name}'");
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
