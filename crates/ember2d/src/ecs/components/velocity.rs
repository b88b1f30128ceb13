//! Velocity component consumed by the movement system

use std::any::Any;

use crate::ecs::component::Component;
use crate::foundation::math::Vec2;

/// Linear and angular velocity in world units per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityComponent {
    /// Linear velocity
    pub linear: Vec2,
    /// Angular velocity in radians per second
    pub angular: f32,
}

impl VelocityComponent {
    /// Purely linear velocity
    pub fn linear(x: f32, y: f32) -> Self {
        Self {
            linear: Vec2::new(x, y),
            angular: 0.0,
        }
    }

    /// Builder: set angular velocity
    pub fn with_angular(mut self, angular: f32) -> Self {
        self.angular = angular;
        self
    }

    /// Current speed in units per second
    pub fn speed(&self) -> f32 {
        self.linear.norm()
    }
}

impl Component for VelocityComponent {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
