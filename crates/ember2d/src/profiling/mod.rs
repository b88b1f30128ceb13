//! Scoped timing hooks for the pipelines
//!
//! Both pipelines wrap each system invocation in a profiler scope when a
//! profiler has been attached. Absence of a profiler is the normal case and
//! costs nothing beyond an `Option` check.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// Receives timing scopes from the pipelines
///
/// `begin_scope` fires just before a system runs and `end_scope` just after,
/// with the measured wall time. Implementations must not panic; a panicking
/// profiler aborts the frame it is observing.
pub trait Profiler {
    /// A named scope is about to start
    fn begin_scope(&mut self, name: &str);

    /// The named scope finished after `elapsed`
    fn end_scope(&mut self, name: &str, elapsed: Duration);
}

/// Accumulated timings for one scope name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeStats {
    /// How many times the scope was entered
    pub calls: u64,
    /// Total wall time across all calls
    pub total: Duration,
}

impl ScopeStats {
    /// Mean duration per call
    pub fn average(&self) -> Duration {
        if self.calls == 0 {
            Duration::ZERO
        } else {
            self.total / self.calls as u32
        }
    }
}

/// Per-scope accumulator suitable for the single-threaded frame loop
///
/// Cloning is cheap and shares the underlying stats, so a host can keep one
/// clone for reporting while handing another to a pipeline.
#[derive(Clone, Default)]
pub struct FrameProfiler {
    scopes: Rc<RefCell<HashMap<String, ScopeStats>>>,
}

impl FrameProfiler {
    /// Create an empty profiler
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats recorded so far for `name`, if the scope ever ran
    pub fn stats(&self, name: &str) -> Option<ScopeStats> {
        self.scopes.borrow().get(name).copied()
    }

    /// Names of every scope seen so far, sorted for stable reporting
    pub fn scope_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.scopes.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Discard all accumulated stats
    pub fn reset(&self) {
        self.scopes.borrow_mut().clear();
    }
}

impl Profiler for FrameProfiler {
    fn begin_scope(&mut self, _name: &str) {}

    fn end_scope(&mut self, name: &str, elapsed: Duration) {
        let mut scopes = self.scopes.borrow_mut();
        let entry = scopes.entry(name.to_owned()).or_default();
        entry.calls += 1;
        entry.total += elapsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_calls_per_scope() {
        let mut profiler = FrameProfiler::new();
        profiler.begin_scope("physics");
        profiler.end_scope("physics", Duration::from_millis(2));
        profiler.begin_scope("physics");
        profiler.end_scope("physics", Duration::from_millis(3));

        let stats = profiler.stats("physics").unwrap();
        assert_eq!(stats.calls, 2);
        assert_eq!(stats.total, Duration::from_millis(5));
        assert!(profiler.stats("render").is_none());
    }

    #[test]
    fn clones_share_state() {
        let mut writer = FrameProfiler::new();
        let reader = writer.clone();
        writer.end_scope("ai", Duration::from_micros(10));
        assert_eq!(reader.stats("ai").unwrap().calls, 1);
        reader.reset();
        assert!(writer.stats("ai").is_none());
    }
}
