//! Built-in components

pub mod collider;
pub mod lifetime;
pub mod transform;
pub mod velocity;

pub use collider::{ColliderComponent, CollisionHandler, HandlerId};
pub use lifetime::LifetimeComponent;
pub use transform::{world_transform, Transform2D, TransformComponent};
pub use velocity::VelocityComponent;
