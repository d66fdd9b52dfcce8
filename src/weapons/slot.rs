//! Single-occupancy weapon slot

use hecs::Entity;

use super::{AttackReport, EquippedWeapon, WeaponDescriptor, WeaponOwner};
use crate::ecs::{Name, Transform, World};

/// The attachment point holding the owner's active weapon.
///
/// At most one weapon entity occupies the slot; equipping a new one despawns
/// the previous occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponSlot {
    owner: Entity,
    socket: Entity,
    current: Option<Entity>,
}

impl WeaponSlot {
    /// Create an empty slot. Weapons attach to `socket`, or to `owner` when
    /// the socket no longer exists.
    #[must_use]
    pub const fn new(owner: Entity, socket: Entity) -> Self {
        Self {
            owner,
            socket,
            current: None,
        }
    }

    /// Replace the current weapon with a new instance of `descriptor`.
    ///
    /// Returns the spawned weapon entity, or `None` (with a warning) when no
    /// descriptor was given.
    pub fn equip(
        &mut self,
        world: &mut World,
        descriptor: Option<&WeaponDescriptor>,
    ) -> Option<Entity> {
        let Some(descriptor) = descriptor else {
            log::warn!("WeaponSlot::equip: weapon descriptor not set");
            return None;
        };

        self.clear(world);

        let anchor = if world.contains(self.socket) {
            self.socket
        } else {
            self.owner
        };
        let weapon = world.spawn_child(
            anchor,
            (
                Name::new(descriptor.name.clone()),
                Transform::IDENTITY,
                WeaponOwner(self.owner),
                EquippedWeapon(descriptor.instantiate()),
            ),
        );

        log::info!("WeaponSlot: equipped {}", descriptor.name);
        self.current = Some(weapon);
        Some(weapon)
    }

    /// Despawn the current weapon, if any
    pub fn clear(&mut self, world: &mut World) {
        if let Some(previous) = self.current.take()
            && world.despawn(previous).is_err()
        {
            log::debug!("WeaponSlot: previous weapon {previous:?} was already gone");
        }
    }

    /// Forward an attack press to the current weapon.
    ///
    /// With an empty slot this only logs a warning.
    pub fn on_attack_edge(&mut self, world: &mut World) -> Option<AttackReport> {
        let Some(current) = self.current else {
            log::warn!("WeaponSlot: no weapon equipped, nothing to attack with");
            return None;
        };

        match world.get_mut::<EquippedWeapon>(current) {
            Ok(mut weapon) => Some(weapon.0.attack(self.owner)),
            Err(_) => {
                log::warn!("WeaponSlot: weapon {current:?} no longer exists");
                self.current = None;
                None
            }
        }
    }

    /// Entity of the weapon in the slot
    #[must_use]
    pub const fn current(&self) -> Option<Entity> {
        self.current
    }

    #[must_use]
    pub const fn owner(&self) -> Entity {
        self.owner
    }

    #[must_use]
    pub const fn socket(&self) -> Entity {
        self.socket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Children, Parent};
    use crate::weapons::WeaponKind;
    use glam::Vec3;

    fn setup() -> (World, WeaponSlot) {
        let mut world = World::new();
        let owner = world.spawn((Name::new("Player"), Transform::default()));
        let socket = world.spawn_child(
            owner,
            (Transform::from_position(Vec3::new(0.4, 1.2, 0.0)),),
        );
        (world, WeaponSlot::new(owner, socket))
    }

    fn axe() -> WeaponDescriptor {
        WeaponDescriptor {
            name: "Axe".to_owned(),
            kind: WeaponKind::Melee {
                damage: 20.0,
                reach: 1.0,
            },
        }
    }

    #[test]
    fn test_equip_attaches_to_socket() {
        let (mut world, mut slot) = setup();

        let weapon = slot
            .equip(&mut world, Some(&WeaponDescriptor::default()))
            .unwrap();

        assert_eq!(slot.current(), Some(weapon));
        assert_eq!(world.get::<Parent>(weapon).unwrap().entity(), slot.socket());
        assert_eq!(world.get::<WeaponOwner>(weapon).unwrap().0, slot.owner());
        assert_eq!(*world.get::<Transform>(weapon).unwrap(), Transform::IDENTITY);

        // Identity local offset puts the weapon exactly on the socket
        let position = world
            .world_matrix(weapon)
            .unwrap()
            .transform_point3(Vec3::ZERO);
        assert!((position - Vec3::new(0.4, 1.2, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_equip_replaces_previous_weapon() {
        let (mut world, mut slot) = setup();

        let sword = slot
            .equip(&mut world, Some(&WeaponDescriptor::default()))
            .unwrap();
        let axe = slot.equip(&mut world, Some(&axe())).unwrap();

        assert!(!world.contains(sword));
        assert!(world.contains(axe));
        let children = world.get::<Children>(slot.socket()).unwrap();
        assert_eq!(children.len(), 1);
        assert!(children.contains(axe));
    }

    #[test]
    fn test_equip_without_descriptor_keeps_current() {
        let (mut world, mut slot) = setup();
        let sword = slot.equip(&mut world, Some(&WeaponDescriptor::default()));

        assert!(slot.equip(&mut world, None).is_none());
        assert_eq!(slot.current(), sword);
    }

    #[test]
    fn test_equip_falls_back_to_owner() {
        let (mut world, mut slot) = setup();
        world.despawn(slot.socket()).unwrap();

        let weapon = slot.equip(&mut world, Some(&axe())).unwrap();

        assert_eq!(world.get::<Parent>(weapon).unwrap().entity(), slot.owner());
    }

    #[test]
    fn test_attack_forwards_to_weapon() {
        let (mut world, mut slot) = setup();
        slot.equip(&mut world, Some(&axe()));

        let report = slot.on_attack_edge(&mut world).unwrap();

        assert_eq!(report.weapon, "Axe");
        assert_eq!(report.damage, 20.0);
        assert_eq!(report.owner, slot.owner());
    }

    #[test]
    fn test_attack_with_empty_slot() {
        let (mut world, mut slot) = setup();
        assert!(slot.on_attack_edge(&mut world).is_none());
    }
}
