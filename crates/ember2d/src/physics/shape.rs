//! Collision shapes and narrow-phase intersection tests
//!
//! Shapes live in world space; the physics system copies each entity's
//! resolved transform position into its shape every frame before any tests
//! run. Narrow-phase dispatch is a fixed matrix over the two variants rather
//! than an open-ended type switch.

use crate::foundation::math::Vec2;

/// Axis-aligned box shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    /// World-space center, synced from the owning transform each frame
    pub position: Vec2,
    /// Local offset applied on top of the synced position
    pub offset: Vec2,
    /// Full width in world units
    pub width: f32,
    /// Full height in world units
    pub height: f32,
}

/// Circle shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    /// World-space center, synced from the owning transform each frame
    pub position: Vec2,
    /// Local offset applied on top of the synced position
    pub offset: Vec2,
    /// Radius in world units
    pub radius: f32,
}

/// Axis-aligned bounding box used by the broad-phase grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

/// Tagged union of the supported collision shapes
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionShape {
    /// Axis-aligned box
    Box(BoxShape),
    /// Circle
    Circle(CircleShape),
}

impl CollisionShape {
    /// Create a box shape of the given size, centered at the origin
    pub fn new_box(width: f32, height: f32) -> Self {
        Self::Box(BoxShape {
            position: Vec2::zeros(),
            offset: Vec2::zeros(),
            width,
            height,
        })
    }

    /// Create a circle shape of the given radius, centered at the origin
    pub fn new_circle(radius: f32) -> Self {
        Self::Circle(CircleShape {
            position: Vec2::zeros(),
            offset: Vec2::zeros(),
            radius,
        })
    }

    /// Shape with an additional local offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        match &mut self {
            Self::Box(b) => b.offset = offset,
            Self::Circle(c) => c.offset = offset,
        }
        self
    }

    /// Effective center: synced position plus local offset
    pub fn center(&self) -> Vec2 {
        match self {
            Self::Box(b) => b.position + b.offset,
            Self::Circle(c) => c.position + c.offset,
        }
    }

    /// Overwrite the synced world position
    pub fn set_position(&mut self, position: Vec2) {
        match self {
            Self::Box(b) => b.position = position,
            Self::Circle(c) => c.position = position,
        }
    }

    /// A shape with non-positive size never intersects anything
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Box(b) => b.width <= 0.0 || b.height <= 0.0,
            Self::Circle(c) => c.radius <= 0.0,
        }
    }

    /// World-space bounds; degenerate shapes collapse to their center point
    pub fn bounds(&self) -> Aabb {
        let center = self.center();
        let half = match self {
            Self::Box(b) => Vec2::new(b.width.max(0.0) / 2.0, b.height.max(0.0) / 2.0),
            Self::Circle(c) => {
                let r = c.radius.max(0.0);
                Vec2::new(r, r)
            }
        };
        Aabb {
            min: center - half,
            max: center + half,
        }
    }

    /// Narrow-phase intersection test
    ///
    /// Touching edges count as intersecting. Degenerate shapes never
    /// intersect, regardless of position.
    pub fn intersects(&self, other: &CollisionShape) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        match (self, other) {
            (Self::Box(a), Self::Box(b)) => box_box(a, b),
            (Self::Box(a), Self::Circle(b)) => box_circle(a, b),
            (Self::Circle(a), Self::Box(b)) => box_circle(b, a),
            (Self::Circle(a), Self::Circle(b)) => circle_circle(a, b),
        }
    }
}

fn box_box(a: &BoxShape, b: &BoxShape) -> bool {
    let ac = a.position + a.offset;
    let bc = b.position + b.offset;
    let (ahw, ahh) = (a.width / 2.0, a.height / 2.0);
    let (bhw, bhh) = (b.width / 2.0, b.height / 2.0);

    ac.x - ahw <= bc.x + bhw
        && ac.x + ahw >= bc.x - bhw
        && ac.y - ahh <= bc.y + bhh
        && ac.y + ahh >= bc.y - bhh
}

fn box_circle(b: &BoxShape, c: &CircleShape) -> bool {
    let bc = b.position + b.offset;
    let cc = c.position + c.offset;
    let (hw, hh) = (b.width / 2.0, b.height / 2.0);

    // Closest point on the rectangle to the circle center
    let closest = Vec2::new(
        cc.x.clamp(bc.x - hw, bc.x + hw),
        cc.y.clamp(bc.y - hh, bc.y + hh),
    );

    (cc - closest).norm_squared() <= c.radius * c.radius
}

fn circle_circle(a: &CircleShape, b: &CircleShape) -> bool {
    let delta = (b.position + b.offset) - (a.position + a.offset);
    let radius_sum = a.radius + b.radius;
    delta.norm_squared() <= radius_sum * radius_sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_at(x: f32, y: f32, w: f32, h: f32) -> CollisionShape {
        let mut shape = CollisionShape::new_box(w, h);
        shape.set_position(Vec2::new(x, y));
        shape
    }

    fn circle_at(x: f32, y: f32, r: f32) -> CollisionShape {
        let mut shape = CollisionShape::new_circle(r);
        shape.set_position(Vec2::new(x, y));
        shape
    }

    #[test]
    fn overlapping_boxes_intersect() {
        let a = box_at(0.0, 0.0, 10.0, 10.0);
        let b = box_at(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn touching_box_edges_intersect() {
        let a = box_at(0.0, 0.0, 10.0, 10.0);
        let b = box_at(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn separated_boxes_do_not_intersect() {
        let a = box_at(0.0, 0.0, 10.0, 10.0);
        let b = box_at(100.0, 100.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn box_circle_by_closest_point() {
        let b = box_at(0.0, 0.0, 10.0, 10.0);
        // Circle just inside the corner reach
        let near = circle_at(7.0, 7.0, 3.0);
        assert!(b.intersects(&near));
        assert!(near.intersects(&b));
        // Corner is at (5,5); diagonal distance to (9,9) exceeds the radius
        let far = circle_at(9.0, 9.0, 3.0);
        assert!(!b.intersects(&far));
    }

    #[test]
    fn circle_circle_by_radius_sum() {
        let a = circle_at(0.0, 0.0, 5.0);
        let b = circle_at(9.0, 0.0, 5.0);
        let c = circle_at(11.0, 0.0, 5.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn degenerate_shapes_never_intersect() {
        let flat = box_at(0.0, 0.0, 0.0, 10.0);
        let point = circle_at(0.0, 0.0, 0.0);
        let negative = box_at(0.0, 0.0, -5.0, -5.0);
        let solid = box_at(0.0, 0.0, 10.0, 10.0);

        assert!(!flat.intersects(&solid));
        assert!(!solid.intersects(&flat));
        assert!(!point.intersects(&solid));
        assert!(!point.intersects(&point));
        assert!(!negative.intersects(&solid));
    }

    #[test]
    fn offset_shifts_the_effective_center() {
        let mut a = CollisionShape::new_box(10.0, 10.0).with_offset(Vec2::new(100.0, 0.0));
        a.set_position(Vec2::new(0.0, 0.0));
        let b = box_at(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        let c = box_at(100.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn bounds_cover_the_shape() {
        let shape = circle_at(10.0, 10.0, 5.0);
        let bounds = shape.bounds();
        assert_eq!(bounds.min, Vec2::new(5.0, 5.0));
        assert_eq!(bounds.max, Vec2::new(15.0, 15.0));
    }
}
