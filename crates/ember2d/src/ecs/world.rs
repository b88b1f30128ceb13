//! ECS World: entity identity, component attachment, tags, and hierarchy
//!
//! The world is exclusively owned by the thread driving the frame loop.
//! Queries hand out snapshot `Vec<Entity>` lists, so callbacks running
//! during an enumeration may freely request structural changes; destruction
//! is deferred to `maintain`, which the update pipeline calls at the end of
//! every frame.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};

use slotmap::SlotMap;

use crate::ecs::component::Component;
use crate::ecs::entity::{Entity, EntityKey};

struct EntityRecord {
    name: String,
    tags: HashSet<String>,
    active: bool,
    parent: Option<Entity>,
    children: Vec<Entity>,
    components: HashMap<TypeId, Box<dyn Component>>,
}

impl EntityRecord {
    fn new(name: String) -> Self {
        Self {
            name,
            tags: HashSet::new(),
            active: true,
            parent: None,
            children: Vec::new(),
            components: HashMap::new(),
        }
    }
}

/// Container for all entities and their components
#[derive(Default)]
pub struct World {
    entities: SlotMap<EntityKey, EntityRecord>,
    by_type: HashMap<TypeId, HashSet<Entity>>,
    pending_destroy: Vec<Entity>,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new active entity; the handle is usable immediately
    pub fn spawn(&mut self, name: impl Into<String>) -> Entity {
        let key = self.entities.insert(EntityRecord::new(name.into()));
        Entity::from_key(key)
    }

    /// Does this handle still refer to a live entity?
    ///
    /// Entities queued for destruction remain alive (but inactive) until
    /// `maintain` runs.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity.key())
    }

    /// Is the entity alive and active?
    pub fn is_active(&self, entity: Entity) -> bool {
        self.record(entity).map(|r| r.active).unwrap_or(false)
    }

    /// Toggle the active flag; inactive entities drop out of queries
    pub fn set_active(&mut self, entity: Entity, active: bool) {
        if let Some(record) = self.record_mut(entity) {
            record.active = active;
        }
    }

    /// Entity name, if the entity is alive
    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.record(entity).map(|r| r.name.as_str())
    }

    /// Number of live entities (including inactive ones)
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // --- tags ---

    /// Attach a tag; tags are not unique across entities
    pub fn add_tag(&mut self, entity: Entity, tag: impl Into<String>) {
        if let Some(record) = self.record_mut(entity) {
            record.tags.insert(tag.into());
        }
    }

    /// Detach a tag; returns whether it was present
    pub fn remove_tag(&mut self, entity: Entity, tag: &str) -> bool {
        self.record_mut(entity)
            .map(|r| r.tags.remove(tag))
            .unwrap_or(false)
    }

    /// Does the entity carry the tag?
    pub fn has_tag(&self, entity: Entity, tag: &str) -> bool {
        self.record(entity)
            .map(|r| r.tags.contains(tag))
            .unwrap_or(false)
    }

    /// All active entities carrying the tag
    pub fn entities_by_tag(&self, tag: &str) -> Vec<Entity> {
        self.entities
            .iter()
            .filter(|(_, record)| record.active && record.tags.contains(tag))
            .map(|(key, _)| Entity::from_key(key))
            .collect()
    }

    // --- hierarchy ---

    /// Parent of the entity, if any
    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.record(entity).and_then(|r| r.parent)
    }

    /// Children of the entity, in attachment order
    pub fn children(&self, entity: Entity) -> Vec<Entity> {
        self.record(entity)
            .map(|r| r.children.clone())
            .unwrap_or_default()
    }

    /// Re-parent an entity (or detach it with `None`)
    ///
    /// Panics if the change would create a cycle in the parent chain, or if
    /// either handle is dead. Both are programmer errors.
    pub fn set_parent(&mut self, child: Entity, parent: Option<Entity>) {
        assert!(self.is_alive(child), "set_parent: child entity is dead");
        if let Some(parent) = parent {
            assert!(self.is_alive(parent), "set_parent: parent entity is dead");
            // Walk the proposed ancestor chain; finding the child means the
            // new edge would close a loop.
            let mut cursor = Some(parent);
            while let Some(ancestor) = cursor {
                assert!(
                    ancestor != child,
                    "set_parent: cycle through entity '{}'",
                    self.name(child).unwrap_or("?")
                );
                cursor = self.parent(ancestor);
            }
        }

        if let Some(old_parent) = self.parent(child) {
            if let Some(record) = self.record_mut(old_parent) {
                record.children.retain(|&c| c != child);
            }
        }
        if let Some(record) = self.record_mut(child) {
            record.parent = parent;
        }
        if let Some(parent) = parent {
            if let Some(record) = self.record_mut(parent) {
                record.children.push(child);
            }
        }
    }

    // --- components ---

    /// Attach a component and run its `on_added` hook synchronously
    ///
    /// Panics if a component of the same type is already attached or if the
    /// entity is dead; both are invariant violations, not recoverable
    /// conditions.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> &mut T {
        let type_id = TypeId::of::<T>();
        let record = self
            .entities
            .get_mut(entity.key())
            .unwrap_or_else(|| panic!("add_component on dead entity {:?}", entity));
        assert!(
            !record.components.contains_key(&type_id),
            "duplicate component {} on entity '{}'",
            std::any::type_name::<T>(),
            record.name
        );
        record.components.insert(type_id, Box::new(component));
        self.by_type.entry(type_id).or_default().insert(entity);

        let boxed = self
            .entities
            .get_mut(entity.key())
            .expect("record vanished during add_component")
            .components
            .get_mut(&type_id)
            .expect("component vanished during add_component");
        boxed.on_added(entity);
        boxed
            .as_any_mut()
            .downcast_mut::<T>()
            .expect("component type confusion")
    }

    /// Detach a component, running its `on_removed` hook; returns whether it
    /// was present. Missing components are a normal no-op.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> bool {
        let type_id = TypeId::of::<T>();
        let Some(record) = self.entities.get_mut(entity.key()) else {
            return false;
        };
        let Some(mut component) = record.components.remove(&type_id) else {
            return false;
        };
        component.on_removed(entity);
        if let Some(index) = self.by_type.get_mut(&type_id) {
            index.remove(&entity);
        }
        true
    }

    /// Look up a component; `None` for missing components or dead entities
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.record(entity)?
            .components
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Mutable component lookup; `None` is the expected-absence case
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.entities
            .get_mut(entity.key())?
            .components
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Does the entity carry a component of this type?
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    // --- queries ---

    /// Snapshot of active entities carrying `T`, ordered by entity id
    ///
    /// The snapshot tolerates any structural mutation performed while it is
    /// being walked, including destroying the listed entities.
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        let mut result: Vec<Entity> = self
            .by_type
            .get(&TypeId::of::<T>())
            .map(|set| {
                set.iter()
                    .copied()
                    .filter(|&e| self.is_active(e))
                    .collect()
            })
            .unwrap_or_default();
        result.sort_unstable();
        result
    }

    /// Snapshot of active entities carrying both `A` and `B`
    pub fn entities_with2<A: Component, B: Component>(&self) -> Vec<Entity> {
        let mut result: Vec<Entity> = match (
            self.by_type.get(&TypeId::of::<A>()),
            self.by_type.get(&TypeId::of::<B>()),
        ) {
            (Some(a), Some(b)) => a
                .intersection(b)
                .copied()
                .filter(|&e| self.is_active(e))
                .collect(),
            _ => Vec::new(),
        };
        result.sort_unstable();
        result
    }

    // --- destruction ---

    /// Queue an entity and all its descendants for destruction
    ///
    /// The subtree goes inactive immediately (and so disappears from
    /// queries), but records and components survive until `maintain` so
    /// that callbacks iterating a snapshot never observe half-destroyed
    /// state.
    pub fn destroy(&mut self, entity: Entity) {
        if !self.is_alive(entity) {
            return;
        }
        self.deactivate_subtree(entity);
        self.pending_destroy.push(entity);
    }

    fn deactivate_subtree(&mut self, entity: Entity) {
        for child in self.children(entity) {
            self.deactivate_subtree(child);
        }
        if let Some(record) = self.record_mut(entity) {
            record.active = false;
        }
    }

    /// Apply queued destructions: children first, `on_removed` per component
    pub fn maintain(&mut self) {
        let pending = std::mem::take(&mut self.pending_destroy);
        for entity in pending {
            self.destroy_now(entity);
        }
    }

    fn destroy_now(&mut self, entity: Entity) {
        if !self.is_alive(entity) {
            return; // already taken down as someone's descendant
        }
        for child in self.children(entity) {
            self.destroy_now(child);
        }
        if let Some(parent) = self.parent(entity) {
            if let Some(record) = self.record_mut(parent) {
                record.children.retain(|&c| c != entity);
            }
        }
        let Some(record) = self.entities.remove(entity.key()) else {
            return;
        };
        for (type_id, mut component) in record.components {
            component.on_removed(entity);
            if let Some(index) = self.by_type.get_mut(&type_id) {
                index.remove(&entity);
            }
        }
    }

    /// Destroy every entity immediately; used on scene teardown
    pub fn clear(&mut self) {
        let roots: Vec<Entity> = self
            .entities
            .iter()
            .filter(|(_, record)| record.parent.is_none())
            .map(|(key, _)| Entity::from_key(key))
            .collect();
        for root in roots {
            self.destroy(root);
        }
        self.maintain();
        debug_assert!(self.entities.is_empty(), "orphaned entities after clear");
        self.pending_destroy.clear();
    }

    fn record(&self, entity: Entity) -> Option<&EntityRecord> {
        self.entities.get(entity.key())
    }

    fn record_mut(&mut self, entity: Entity) -> Option<&mut EntityRecord> {
        self.entities.get_mut(entity.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Health(i32);
    impl Component for Health {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    struct Armor(i32);
    impl Component for Armor {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    /// Records its own lifecycle transitions for assertions
    struct Probe {
        log: Rc<RefCell<Vec<&'static str>>>,
        owner: Option<Entity>,
    }
    impl Component for Probe {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
        fn on_added(&mut self, entity: Entity) {
            self.owner = Some(entity);
            self.log.borrow_mut().push("added");
        }
        fn on_removed(&mut self, _entity: Entity) {
            self.log.borrow_mut().push("removed");
        }
    }

    #[test]
    fn components_of_different_types_coexist() {
        let mut world = World::new();
        let e = world.spawn("knight");
        world.add_component(e, Health(100));
        world.add_component(e, Armor(50));

        assert_eq!(world.get_component::<Health>(e).unwrap().0, 100);
        assert_eq!(world.get_component::<Armor>(e).unwrap().0, 50);
    }

    #[test]
    #[should_panic(expected = "duplicate component")]
    fn duplicate_component_panics() {
        let mut world = World::new();
        let e = world.spawn("knight");
        world.add_component(e, Health(100));
        world.add_component(e, Health(50));
    }

    #[test]
    fn missing_component_is_none_not_panic() {
        let mut world = World::new();
        let e = world.spawn("empty");
        assert!(world.get_component::<Health>(e).is_none());
        assert!(!world.has_component::<Health>(e));
    }

    #[test]
    fn lifecycle_hooks_fire_and_capture_owner() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut world = World::new();
        let e = world.spawn("probe");
        world.add_component(
            e,
            Probe {
                log: log.clone(),
                owner: None,
            },
        );
        assert_eq!(world.get_component::<Probe>(e).unwrap().owner, Some(e));
        assert_eq!(*log.borrow(), vec!["added"]);

        world.destroy(e);
        assert_eq!(*log.borrow(), vec!["added"]);
        world.maintain();
        assert_eq!(*log.borrow(), vec!["added", "removed"]);
    }

    #[test]
    fn destroy_is_deferred_but_hides_immediately() {
        let mut world = World::new();
        let e = world.spawn("doomed");
        world.add_component(e, Health(1));

        world.destroy(e);
        assert!(world.is_alive(e));
        assert!(!world.is_active(e));
        assert!(world.entities_with::<Health>().is_empty());

        world.maintain();
        assert!(!world.is_alive(e));
        assert!(world.get_component::<Health>(e).is_none());
    }

    #[test]
    fn destroyed_handle_does_not_alias_new_entity() {
        let mut world = World::new();
        let old = world.spawn("old");
        world.destroy(old);
        world.maintain();
        let new = world.spawn("new");
        assert_ne!(old, new);
        assert!(!world.is_alive(old));
        assert!(world.is_alive(new));
    }

    #[test]
    fn destroy_cascades_to_descendants() {
        let mut world = World::new();
        let root = world.spawn("root");
        let child = world.spawn("child");
        let grandchild = world.spawn("grandchild");
        world.set_parent(child, Some(root));
        world.set_parent(grandchild, Some(child));

        world.destroy(root);
        world.maintain();
        assert!(!world.is_alive(root));
        assert!(!world.is_alive(child));
        assert!(!world.is_alive(grandchild));
    }

    #[test]
    #[should_panic(expected = "cycle")]
    fn parent_cycle_is_rejected() {
        let mut world = World::new();
        let a = world.spawn("a");
        let b = world.spawn("b");
        world.set_parent(b, Some(a));
        world.set_parent(a, Some(b));
    }

    #[test]
    fn tag_queries_find_all_matches() {
        let mut world = World::new();
        let a = world.spawn("a");
        let b = world.spawn("b");
        let c = world.spawn("c");
        world.add_tag(a, "enemy");
        world.add_tag(b, "enemy");
        world.add_tag(c, "pickup");

        let mut enemies = world.entities_by_tag("enemy");
        enemies.sort_unstable();
        let mut expected = vec![a, b];
        expected.sort_unstable();
        assert_eq!(enemies, expected);
        assert!(world.entities_by_tag("boss").is_empty());
    }

    #[test]
    fn two_component_query_intersects() {
        let mut world = World::new();
        let both = world.spawn("both");
        let only_health = world.spawn("health");
        world.add_component(both, Health(1));
        world.add_component(both, Armor(1));
        world.add_component(only_health, Health(1));

        assert_eq!(world.entities_with2::<Health, Armor>(), vec![both]);
    }

    #[test]
    fn inactive_entities_drop_out_of_queries() {
        let mut world = World::new();
        let e = world.spawn("sleeper");
        world.add_component(e, Health(1));
        world.set_active(e, false);
        assert!(world.entities_with::<Health>().is_empty());
        world.set_active(e, true);
        assert_eq!(world.entities_with::<Health>(), vec![e]);
    }

    #[test]
    fn clear_removes_everything() {
        let mut world = World::new();
        let root = world.spawn("root");
        let child = world.spawn("child");
        world.set_parent(child, Some(root));
        world.spawn("loner");

        world.clear();
        assert_eq!(world.entity_count(), 0);
    }
}
