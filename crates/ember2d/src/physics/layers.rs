//! Collision layer filtering
//!
//! Each collider sits on a layer and carries a mask naming the layers it
//! observes. The check is directional: A notices B only when A's mask
//! contains B's layer, and B's view of A is evaluated independently. The
//! collision system therefore checks both directions separately, which can
//! legitimately produce one-sided notifications.

use bitflags::bitflags;

bitflags! {
    /// Collision layer bitmask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayer: u32 {
        /// Player characters
        const PLAYER = 1 << 0;
        /// Enemy characters
        const ENEMY = 1 << 1;
        /// Bullets, missiles, and other projectiles
        const PROJECTILE = 1 << 2;
        /// Static environment geometry
        const ENVIRONMENT = 1 << 3;
        /// Trigger volumes
        const TRIGGER = 1 << 4;
        /// Debris and small physics objects
        const DEBRIS = 1 << 5;
        /// Pickups and collectibles
        const PICKUP = 1 << 6;

        /// Every layer, including user-defined bits
        const ALL = u32::MAX;
    }
}

impl CollisionLayer {
    /// Build a mask from several layers
    pub fn mask(layers: &[CollisionLayer]) -> CollisionLayer {
        layers
            .iter()
            .fold(CollisionLayer::empty(), |acc, &layer| acc | layer)
    }

    /// Does this mask observe the given layer?
    pub fn observes(self, other_layer: CollisionLayer) -> bool {
        self.intersects(other_layer)
    }
}

impl Default for CollisionLayer {
    fn default() -> Self {
        CollisionLayer::ALL
    }
}
