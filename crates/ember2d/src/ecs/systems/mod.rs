//! Built-in update systems

pub mod lifetime_system;
pub mod movement_system;
pub mod physics_system;

pub use lifetime_system::LifetimeSystem;
pub use movement_system::MovementSystem;
pub use physics_system::PhysicsSystem;
