//! Foundation utilities: math types and frame timing

pub mod math;
pub mod time;

pub use math::Vec2;
pub use time::{GameTime, Timer};
