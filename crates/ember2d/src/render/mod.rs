//! Renderer contract consumed by draw systems
//!
//! The engine core never owns a graphics backend; hosts implement `Renderer`
//! over whatever API they use and hand it to `RenderPipeline::execute` each
//! frame. Draw systems may branch on the presence of a camera but the
//! pipeline itself never manages one.

pub mod debug_draw;

pub use debug_draw::CollisionDebugRenderSystem;

use crate::foundation::math::Vec2;

/// RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha component
    pub a: f32,
}

impl Color {
    /// Opaque color from RGB components
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque white
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// Opaque black
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    /// Opaque red
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    /// Opaque green
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    /// Opaque blue
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
}

/// Optional 2D camera a renderer may expose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    /// World-space center of the view
    pub position: Vec2,
    /// Scale factor; 1.0 maps one world unit to one screen unit
    pub zoom: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            zoom: 1.0,
        }
    }
}

/// Primitive draw surface implemented by the host
///
/// Rectangles are addressed by center and full extents, matching the
/// collision shapes they most often visualize.
pub trait Renderer {
    /// Filled axis-aligned rectangle
    fn fill_rect(&mut self, center: Vec2, width: f32, height: f32, color: Color);

    /// Rectangle outline
    fn stroke_rect(&mut self, center: Vec2, width: f32, height: f32, color: Color);

    /// Filled circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Circle outline
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Line segment
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);

    /// Text anchored at a world position
    fn draw_text(&mut self, position: Vec2, text: &str, color: Color);

    /// Active camera, when the backend has one
    fn camera(&self) -> Option<&Camera2D> {
        None
    }

    /// Install or clear the active camera
    fn set_camera(&mut self, _camera: Option<Camera2D>) {}
}
