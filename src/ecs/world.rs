//! The ECS world with attachment-aware spawning and despawning

use glam::Mat4;
use hecs::Entity;
use smallvec::SmallVec;

use super::{Children, Parent, Transform};

/// Thin layer over [`hecs::World`] that keeps [`Parent`] and [`Children`]
/// links consistent
pub struct World {
    pub inner: hecs::World,
}

impl World {
    pub fn new() -> Self {
        Self {
            inner: hecs::World::new(),
        }
    }

    /// Spawn an unattached entity
    pub fn spawn(&mut self, components: impl hecs::DynamicBundle) -> Entity {
        self.inner.spawn(components)
    }

    /// Spawn an entity attached to `parent`
    pub fn spawn_child(&mut self, parent: Entity, components: impl hecs::DynamicBundle) -> Entity {
        let child = self.inner.spawn(components);
        self.attach(child, parent);
        child
    }

    /// Attach `child` to `parent`, recording the link on both sides
    pub fn attach(&mut self, child: Entity, parent: Entity) {
        if self.inner.insert_one(child, Parent(parent)).is_err() {
            log::warn!("World: cannot attach missing entity {child:?}");
            return;
        }

        if let Ok(mut children) = self.inner.get::<&mut Children>(parent) {
            children.add(child);
            return;
        }
        let mut children = Children::new();
        children.add(child);
        if self.inner.insert_one(parent, children).is_err() {
            log::warn!("World: cannot attach to missing parent {parent:?}");
        }
    }

    /// Despawn an entity, detaching it from its parent first
    pub fn despawn(&mut self, entity: Entity) -> Result<(), hecs::NoSuchEntity> {
        let parent = self.inner.get::<&Parent>(entity).ok().map(|p| p.entity());
        if let Some(parent) = parent
            && let Ok(mut children) = self.inner.get::<&mut Children>(parent)
        {
            children.remove(entity);
        }
        self.inner.despawn(entity)
    }

    /// Despawn an entity together with everything attached below it
    pub fn despawn_recursive(&mut self, entity: Entity) -> Result<(), hecs::NoSuchEntity> {
        let children: SmallVec<[Entity; 8]> = self
            .inner
            .get::<&Children>(entity)
            .map(|children| children.iter().copied().collect())
            .unwrap_or_default();
        for child in children {
            if self.despawn_recursive(child).is_err() {
                log::debug!("World: child {child:?} was already gone");
            }
        }
        self.despawn(entity)
    }

    /// World-space matrix of an entity, following the parent chain
    pub fn world_matrix(&self, entity: Entity) -> Option<Mat4> {
        let local = self.inner.get::<&Transform>(entity).ok()?.matrix();
        let parent = self.inner.get::<&Parent>(entity).ok().map(|p| p.entity());
        match parent {
            Some(parent) => Some(self.world_matrix(parent)? * local),
            None => Some(local),
        }
    }

    /// Borrow one component of `entity`
    pub fn get<T: hecs::Component>(
        &self,
        entity: Entity,
    ) -> Result<hecs::Ref<'_, T>, hecs::ComponentError> {
        self.inner.get::<&T>(entity)
    }

    /// Mutably borrow one component of `entity`
    pub fn get_mut<T: hecs::Component>(
        &mut self,
        entity: Entity,
    ) -> Result<hecs::RefMut<'_, T>, hecs::ComponentError> {
        self.inner.get::<&mut T>(entity)
    }

    /// Whether `entity` is still alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }

    /// Number of live entities
    pub fn len(&self) -> u32 {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
