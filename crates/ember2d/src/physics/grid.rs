//! Sparse broad-phase grid
//!
//! Buckets are keyed by floor-divided world coordinates. The grid is rebuilt
//! every frame before queries run; it accelerates candidate lookup and is
//! never authoritative about collision state.

use std::collections::{HashMap, HashSet};

use crate::ecs::Entity;
use crate::physics::shape::CollisionShape;

/// Sparse cell grid over world space
pub struct SpatialGrid {
    cell_size: f32,
    buckets: HashMap<(i32, i32), Vec<Entity>>,
}

impl SpatialGrid {
    /// Create a grid with the given cell side length
    ///
    /// Panics if `cell_size` is not strictly positive; a zero-sized cell
    /// cannot partition anything.
    pub fn new(cell_size: f32) -> Self {
        assert!(
            cell_size > 0.0,
            "spatial grid cell size must be positive, got {cell_size}"
        );
        Self {
            cell_size,
            buckets: HashMap::new(),
        }
    }

    /// Cell side length in world units
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of non-empty buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Empty every bucket; called once per frame before re-insertion
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Insert an entity's shape into every cell its bounds overlap
    pub fn insert(&mut self, entity: Entity, shape: &CollisionShape) {
        let ((min_x, min_y), (max_x, max_y)) = self.cell_range(shape);
        for cx in min_x..=max_x {
            for cy in min_y..=max_y {
                self.buckets.entry((cx, cy)).or_default().push(entity);
            }
        }
    }

    /// Candidate entities whose cells overlap the query shape's cells
    ///
    /// The querying entity is excluded and the result is deduplicated; a
    /// shape straddling several cells appears in multiple buckets but at
    /// most once here.
    pub fn query(&self, entity: Entity, shape: &CollisionShape) -> Vec<Entity> {
        let ((min_x, min_y), (max_x, max_y)) = self.cell_range(shape);
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for cx in min_x..=max_x {
            for cy in min_y..=max_y {
                let Some(bucket) = self.buckets.get(&(cx, cy)) else {
                    continue;
                };
                for &other in bucket {
                    if other != entity && seen.insert(other) {
                        candidates.push(other);
                    }
                }
            }
        }
        candidates
    }

    fn cell_range(&self, shape: &CollisionShape) -> ((i32, i32), (i32, i32)) {
        let bounds = shape.bounds();
        (
            self.cell_of(bounds.min.x, bounds.min.y),
            self.cell_of(bounds.max.x, bounds.max.y),
        )
    }

    fn cell_of(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;
    use crate::foundation::math::Vec2;

    fn shape_at(x: f32, y: f32, w: f32, h: f32) -> CollisionShape {
        let mut shape = CollisionShape::new_box(w, h);
        shape.set_position(Vec2::new(x, y));
        shape
    }

    #[test]
    fn straddling_shape_is_returned_once() {
        let mut world = World::new();
        let a = world.spawn("a");
        let b = world.spawn("b");

        let mut grid = SpatialGrid::new(10.0);
        // Centered on a cell corner: overlaps 4 cells.
        let straddler = shape_at(10.0, 10.0, 8.0, 8.0);
        grid.insert(a, &straddler);

        let query_shape = shape_at(12.0, 12.0, 8.0, 8.0);
        let candidates = grid.query(b, &query_shape);
        assert_eq!(candidates, vec![a]);
    }

    #[test]
    fn query_excludes_self() {
        let mut world = World::new();
        let a = world.spawn("a");

        let mut grid = SpatialGrid::new(10.0);
        let shape = shape_at(0.0, 0.0, 4.0, 4.0);
        grid.insert(a, &shape);
        assert!(grid.query(a, &shape).is_empty());
    }

    #[test]
    fn distant_shapes_are_not_candidates() {
        let mut world = World::new();
        let a = world.spawn("a");
        let b = world.spawn("b");

        let mut grid = SpatialGrid::new(10.0);
        grid.insert(a, &shape_at(0.0, 0.0, 4.0, 4.0));
        grid.insert(b, &shape_at(500.0, 500.0, 4.0, 4.0));

        let candidates = grid.query(b, &shape_at(500.0, 500.0, 4.0, 4.0));
        assert!(!candidates.contains(&a));
        assert!(candidates.is_empty());
    }

    #[test]
    fn negative_coordinates_map_to_cells() {
        let mut world = World::new();
        let a = world.spawn("a");
        let b = world.spawn("b");

        let mut grid = SpatialGrid::new(10.0);
        grid.insert(a, &shape_at(-15.0, -15.0, 4.0, 4.0));
        let candidates = grid.query(b, &shape_at(-14.0, -14.0, 4.0, 4.0));
        assert_eq!(candidates, vec![a]);
    }

    #[test]
    fn clear_empties_all_buckets() {
        let mut world = World::new();
        let a = world.spawn("a");

        let mut grid = SpatialGrid::new(10.0);
        grid.insert(a, &shape_at(0.0, 0.0, 40.0, 40.0));
        assert!(grid.bucket_count() > 1);
        grid.clear();
        assert_eq!(grid.bucket_count(), 0);
    }
}
