//! Weapons module
//!
//! The weapon trait, data-driven descriptors and the player's weapon slot.

mod slot;
mod weapon;

pub use slot::WeaponSlot;
pub use weapon::{
    AttackReport, EquippedWeapon, MeleeWeapon, Weapon, WeaponDescriptor, WeaponKind, WeaponOwner,
};
