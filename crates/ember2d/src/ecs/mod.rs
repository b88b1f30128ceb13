//! Entity-component-system core
//!
//! `World` stores entities and components; `UpdatePipeline` and
//! `RenderPipeline` run systems over it in deterministic order. Built-in
//! components and systems live in the `components` and `systems`
//! submodules, and everything here is renderer-agnostic.

pub mod component;
pub mod components;
pub mod entity;
pub mod pipeline;
pub mod system;
pub mod systems;
pub mod world;

pub use component::Component;
pub use entity::Entity;
pub use pipeline::{RenderCommands, RenderPipeline, UpdateCommands, UpdatePipeline};
pub use system::{order, RenderSystem, UpdateSystem};
pub use world::World;
