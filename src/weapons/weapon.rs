//! Weapon behaviour and descriptors

use std::fmt;

use hecs::Entity;
use serde::{Deserialize, Serialize};

/// Something the player can attack with.
///
/// New weapon types implement this trait; the slot never needs to know which
/// concrete weapon it holds.
pub trait Weapon: fmt::Debug + Send + Sync {
    /// Display name
    fn name(&self) -> &str;

    /// Perform one attack on behalf of `owner`
    fn attack(&mut self, owner: Entity) -> AttackReport;
}

/// What a single attack did
#[derive(Debug, Clone, PartialEq)]
pub struct AttackReport {
    pub weapon: String,
    pub owner: Entity,
    pub damage: f32,
    pub reach: f32,
}

/// Weapon behaviour selected by a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Close-range swing
    Melee { damage: f32, reach: f32 },
}

/// Template a weapon is instantiated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDescriptor {
    pub name: String,
    pub kind: WeaponKind,
}

impl WeaponDescriptor {
    /// Create a fresh weapon from this template
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn Weapon> {
        match self.kind {
            WeaponKind::Melee { damage, reach } => {
                Box::new(MeleeWeapon::new(self.name.clone(), damage, reach))
            }
        }
    }
}

impl Default for WeaponDescriptor {
    fn default() -> Self {
        Self {
            name: "Sword".to_owned(),
            kind: WeaponKind::Melee {
                damage: 10.0,
                reach: 1.5,
            },
        }
    }
}

/// A melee weapon that reports a fixed-damage swing
#[derive(Debug, Clone)]
pub struct MeleeWeapon {
    name: String,
    damage: f32,
    reach: f32,
    swings: u32,
}

impl MeleeWeapon {
    #[must_use]
    pub fn new(name: impl Into<String>, damage: f32, reach: f32) -> Self {
        Self {
            name: name.into(),
            damage,
            reach,
            swings: 0,
        }
    }

    /// Number of attacks performed
    #[must_use]
    pub fn swings(&self) -> u32 {
        self.swings
    }
}

impl Weapon for MeleeWeapon {
    fn name(&self) -> &str {
        &self.name
    }

    fn attack(&mut self, owner: Entity) -> AttackReport {
        self.swings += 1;
        log::info!("{} swings for {} damage", self.name, self.damage);
        AttackReport {
            weapon: self.name.clone(),
            owner,
            damage: self.damage,
            reach: self.reach,
        }
    }
}

/// Component holding the weapon behaviour of a spawned weapon entity
#[derive(Debug)]
pub struct EquippedWeapon(pub Box<dyn Weapon>);

/// Back-reference from a weapon entity to the entity wielding it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponOwner(pub Entity);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_melee_attack_report() {
        let mut world = hecs::World::new();
        let owner = world.spawn(());
        let mut sword = MeleeWeapon::new("Sword", 12.0, 2.0);

        let report = sword.attack(owner);

        assert_eq!(report.weapon, "Sword");
        assert_eq!(report.owner, owner);
        assert_eq!(report.damage, 12.0);
        assert_eq!(sword.swings(), 1);
    }

    #[test]
    fn test_descriptor_instantiates_named_weapon() {
        let descriptor = WeaponDescriptor {
            name: "Axe".to_owned(),
            kind: WeaponKind::Melee {
                damage: 20.0,
                reach: 1.0,
            },
        };
        assert_eq!(descriptor.instantiate().name(), "Axe");
    }

    #[test]
    fn test_descriptor_from_ron() {
        let descriptor: WeaponDescriptor =
            ron::from_str(r#"(name: "Spear", kind: Melee(damage: 8.0, reach: 3.0))"#).unwrap();
        assert_eq!(
            descriptor.kind,
            WeaponKind::Melee {
                damage: 8.0,
                reach: 3.0
            }
        );
    }
}
