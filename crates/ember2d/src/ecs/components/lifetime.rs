//! Lifetime component for entities with a bounded lifespan

use std::any::Any;

use crate::ecs::component::Component;

/// Remaining lifespan in seconds; the lifetime system destroys the entity
/// when it reaches zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifetimeComponent {
    /// Seconds left to live
    pub remaining: f32,
}

impl LifetimeComponent {
    /// Entity lives for `seconds` from now
    pub fn seconds(seconds: f32) -> Self {
        Self { remaining: seconds }
    }

    /// Has the lifespan run out?
    pub fn expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

impl Component for LifetimeComponent {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
