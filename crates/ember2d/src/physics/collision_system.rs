//! Pure collision detection core
//!
//! Owns the side tables the rest of the engine must never touch: the shape
//! registry, the broad-phase grid, and the per-entity contact sets used for
//! enter/exit edge detection. The ECS wrapper in
//! `ecs::systems::PhysicsSystem` feeds it positions and consumes its events.

use std::collections::{HashMap, HashSet};

use crate::ecs::Entity;
use crate::physics::grid::SpatialGrid;
use crate::physics::layers::CollisionLayer;
use crate::physics::shape::CollisionShape;

/// What happened between a pair of colliders this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionEventKind {
    /// The pair started overlapping
    Enter,
    /// The pair stopped overlapping
    Exit,
    /// Overlap started and at least one side is a trigger
    TriggerEnter,
    /// Overlap ended and at least one side is a trigger
    TriggerExit,
}

/// A one-sided collision notification
///
/// Events are per-entity: when two mutually-observing colliders touch, two
/// events are produced, one addressed to each side. A one-directional layer
/// mask yields exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionEvent {
    /// The entity being notified
    pub entity: Entity,
    /// The entity it collided with
    pub other: Entity,
    /// Enter or exit, trigger or solid
    pub kind: CollisionEventKind,
}

struct ColliderData {
    shape: CollisionShape,
    layer: CollisionLayer,
    mask: CollisionLayer,
    is_trigger: bool,
}

/// Broad-phase + narrow-phase collision detector with edge tracking
pub struct CollisionSystem {
    grid: Option<SpatialGrid>,
    colliders: HashMap<Entity, ColliderData>,
    current: HashMap<Entity, HashSet<Entity>>,
    previous: HashMap<Entity, HashSet<Entity>>,
}

impl CollisionSystem {
    /// Create a collision system
    ///
    /// With `use_grid` off every collider is tested against every other
    /// (brute force), which is simpler to reason about in small scenes.
    pub fn new(cell_size: f32, use_grid: bool) -> Self {
        Self {
            grid: use_grid.then(|| SpatialGrid::new(cell_size)),
            colliders: HashMap::new(),
            current: HashMap::new(),
            previous: HashMap::new(),
        }
    }

    /// Register or refresh an entity's collider
    ///
    /// Replaces any previously stored shape and filter data; contact history
    /// is preserved so a refresh never fabricates enter/exit edges.
    pub fn upsert(
        &mut self,
        entity: Entity,
        shape: CollisionShape,
        layer: CollisionLayer,
        mask: CollisionLayer,
        is_trigger: bool,
    ) {
        self.colliders.insert(
            entity,
            ColliderData {
                shape,
                layer,
                mask,
                is_trigger,
            },
        );
    }

    /// Drop an entity's collider and its own contact history
    ///
    /// Partners that were touching it keep their previous-frame entry and so
    /// still observe an exit edge on their side next frame.
    pub fn remove(&mut self, entity: Entity) -> bool {
        self.current.remove(&entity);
        self.previous.remove(&entity);
        self.colliders.remove(&entity).is_some()
    }

    /// Is this entity registered?
    pub fn contains(&self, entity: Entity) -> bool {
        self.colliders.contains_key(&entity)
    }

    /// Registered entities, in no particular order
    pub fn entities(&self) -> Vec<Entity> {
        self.colliders.keys().copied().collect()
    }

    /// Number of registered colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// The registered shape for an entity
    pub fn shape(&self, entity: Entity) -> Option<&CollisionShape> {
        self.colliders.get(&entity).map(|c| &c.shape)
    }

    /// Move an entity's shape to a new world position
    pub fn set_position(&mut self, entity: Entity, position: crate::foundation::math::Vec2) {
        if let Some(data) = self.colliders.get_mut(&entity) {
            data.shape.set_position(position);
        }
    }

    /// Entities currently in contact with `entity`, as of the last detect pass
    pub fn contacts(&self, entity: Entity) -> Option<&HashSet<Entity>> {
        self.current.get(&entity)
    }

    /// Run one broad+narrow phase pass and return this frame's edge events
    ///
    /// Each entity's current contact set is diffed against its previous one;
    /// appearing partners produce enter events, vanished partners exit
    /// events. The layer mask check is applied from the notified side only,
    /// so the two directions are independent.
    pub fn detect(&mut self) -> Vec<CollisionEvent> {
        std::mem::swap(&mut self.current, &mut self.previous);
        self.current.clear();

        if let Some(grid) = &mut self.grid {
            grid.clear();
            for (&entity, data) in &self.colliders {
                if !data.shape.is_degenerate() {
                    grid.insert(entity, &data.shape);
                }
            }
        }

        for (&entity, data) in &self.colliders {
            let contacts = self.current.entry(entity).or_default();
            let candidates: Vec<Entity> = match &self.grid {
                Some(grid) => grid.query(entity, &data.shape),
                None => self
                    .colliders
                    .keys()
                    .copied()
                    .filter(|&other| other != entity)
                    .collect(),
            };

            for other in candidates {
                let Some(other_data) = self.colliders.get(&other) else {
                    continue;
                };
                // Directional filter: only this side's mask is consulted.
                if !data.mask.observes(other_data.layer) {
                    continue;
                }
                if data.shape.intersects(&other_data.shape) {
                    contacts.insert(other);
                }
            }
        }

        self.collect_edges()
    }

    fn collect_edges(&self) -> Vec<CollisionEvent> {
        let empty = HashSet::new();
        let mut events = Vec::new();

        // Every registered collider has a current entry (detect inserts one
        // per collider) and removal purges both maps, so iterating current
        // covers every entity with history.
        for (&entity, now) in &self.current {
            let before = self.previous.get(&entity).unwrap_or(&empty);
            for &other in now.difference(before) {
                events.push(self.edge_event(entity, other, true));
            }
            for &other in before.difference(now) {
                events.push(self.edge_event(entity, other, false));
            }
        }
        events
    }

    fn edge_event(&self, entity: Entity, other: Entity, entered: bool) -> CollisionEvent {
        let trigger = self.is_trigger(entity) || self.is_trigger(other);
        let kind = match (entered, trigger) {
            (true, false) => CollisionEventKind::Enter,
            (false, false) => CollisionEventKind::Exit,
            (true, true) => CollisionEventKind::TriggerEnter,
            (false, true) => CollisionEventKind::TriggerExit,
        };
        CollisionEvent {
            entity,
            other,
            kind,
        }
    }

    fn is_trigger(&self, entity: Entity) -> bool {
        self.colliders
            .get(&entity)
            .map(|c| c.is_trigger)
            .unwrap_or(false)
    }

    /// Drop every collider and all contact history
    pub fn clear(&mut self) {
        if let Some(grid) = &mut self.grid {
            grid.clear();
        }
        self.colliders.clear();
        self.current.clear();
        self.previous.clear();
    }
}
