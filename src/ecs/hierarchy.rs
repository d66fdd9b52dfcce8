//! Attachment links between entities
//!
//! A weapon hangs off a socket which hangs off the player. Both ends of each
//! link are stored so the world can walk up (transforms) and down (despawn).

use hecs::Entity;
use smallvec::SmallVec;

/// Link from an attached entity to the entity it hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub Entity);

impl Parent {
    #[must_use]
    pub const fn entity(&self) -> Entity {
        self.0
    }
}

/// Entities attached below this one, in attachment order
#[derive(Debug, Clone, Default)]
pub struct Children(SmallVec<[Entity; 8]>);

impl Children {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `child`; attaching twice keeps a single entry
    pub fn add(&mut self, child: Entity) {
        if !self.contains(child) {
            self.0.push(child);
        }
    }

    /// Forget `child`, returning whether it was attached
    pub fn remove(&mut self, child: Entity) -> bool {
        let before = self.0.len();
        self.0.retain(|attached| *attached != child);
        self.0.len() != before
    }

    #[must_use]
    pub fn contains(&self, child: Entity) -> bool {
        self.0.contains(&child)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.0.iter()
    }
}
