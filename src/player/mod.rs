//! Player module
//!
//! Health and mana, levels and experience, movement, and the [`Player`] rig
//! that ties them to an entity in the world.

mod controller;
mod progression;
mod stats;

pub use controller::CharacterMotor;
pub use progression::{ExperienceProgress, PlayerProgression};
pub use stats::{Gauge, PlayerStats};

use glam::Vec3;
use hecs::Entity;

use crate::core::{GameConfig, PlayerConfig};
use crate::ecs::{Name, Transform, World};
use crate::input::InputSnapshot;
use crate::weapons::WeaponSlot;

/// The player character: its entity plus the state attached to it
#[derive(Debug)]
pub struct Player {
    entity: Entity,
    tuning: Option<PlayerConfig>,
    pub stats: PlayerStats,
    pub progression: PlayerProgression,
    pub motor: CharacterMotor,
    pub weapons: WeaponSlot,
}

impl Player {
    /// Local offset of the weapon socket from the player's origin
    pub const SOCKET_OFFSET: Vec3 = Vec3::new(0.4, 1.2, 0.3);

    /// Spawn the player entity and its weapon socket, bring stats to life and
    /// equip the configured default weapon.
    pub fn spawn(world: &mut World, config: &GameConfig) -> Self {
        let entity = world.spawn((Name::new("Player"), Transform::default()));
        let socket = world.spawn_child(
            entity,
            (
                Name::new("WeaponSocket"),
                Transform::from_position(Self::SOCKET_OFFSET),
            ),
        );

        let mut stats = PlayerStats::new();
        stats.initialize(config.player.as_ref());

        let mut weapons = WeaponSlot::new(entity, socket);
        if config.default_weapon.is_some() {
            weapons.equip(world, config.default_weapon.as_ref());
        }

        log::info!("Player spawned as {entity:?}");
        Self {
            entity,
            tuning: config.player,
            stats,
            progression: PlayerProgression::new(&config.progression),
            motor: CharacterMotor::new(),
            weapons,
        }
    }

    #[must_use]
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Movement tuning, `None` when the player config was missing
    #[must_use]
    pub fn tuning(&self) -> Option<&PlayerConfig> {
        self.tuning.as_ref()
    }

    /// Grant experience, applying level-up bonuses to this player's stats
    pub fn add_experience(&mut self, amount: f32) {
        self.progression
            .add_experience(amount, Some(&mut self.stats));
    }

    /// Re-publish stats and progression to current subscribers
    pub fn publish(&mut self) {
        self.stats.publish();
        self.progression.publish();
    }

    /// Move the player entity for one tick
    pub fn step(
        &mut self,
        world: &mut World,
        input: &InputSnapshot,
        camera_forward: Vec3,
        dt: f32,
    ) -> Vec3 {
        match world.get_mut::<Transform>(self.entity) {
            Ok(mut transform) => {
                self.motor
                    .step(&mut transform, input, camera_forward, self.tuning.as_ref(), dt)
            }
            Err(_) => Vec3::ZERO,
        }
    }

    /// World-space position of the player entity
    #[must_use]
    pub fn position(&self, world: &World) -> Option<Vec3> {
        world
            .get::<Transform>(self.entity)
            .ok()
            .map(|transform| transform.position)
    }

    /// Remove the player, its socket and its weapon from the world
    pub fn despawn(mut self, world: &mut World) {
        self.weapons.clear(world);
        if world.despawn_recursive(self.entity).is_err() {
            log::warn!("Player {:?} was already despawned", self.entity);
        }
    }
}
