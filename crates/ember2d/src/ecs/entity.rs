//! Entity handles
//!
//! Entities are generation-checked slotmap keys: a handle to a destroyed
//! entity never aliases a later one, so stale back-references fail lookups
//! instead of dangling.

use slotmap::Key;

slotmap::new_key_type! {
    /// Internal arena key for entity records
    pub(crate) struct EntityKey;
}

/// Stable, copyable entity identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Entity {
    key: EntityKey,
}

impl Entity {
    pub(crate) fn from_key(key: EntityKey) -> Self {
        Self { key }
    }

    pub(crate) fn key(self) -> EntityKey {
        self.key
    }

    /// Opaque numeric id, unique among live and destroyed entities
    pub fn id(self) -> u64 {
        self.key.data().as_ffi()
    }
}
