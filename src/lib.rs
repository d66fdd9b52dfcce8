//! Gameplay core for a 3D action game
//!
//! This crate provides:
//! - Player health, mana, levels and experience with change notifications
//! - Action-based input with mutually exclusive Player and UI contexts
//! - A single-occupancy weapon slot driven by input edges
//! - A Menu / Playing / Paused state machine with its own simulation clock
//! - A winit host loop and an ECS world (hecs) to run it all in

pub mod core;
pub mod ecs;
pub mod game;
pub mod input;
pub mod player;
pub mod weapons;

// Re-exports for convenience
pub use glam;
pub use hecs;
pub use winit;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::core::{
        Engine, EngineConfig, EngineContext, EventBus, Game, GameConfig, LoggingSceneLoader,
        PlayerConfig, SceneLoader, SceneNames, Signal,
    };
    pub use crate::ecs::{Name, Transform, World};
    pub use crate::game::{GameCommand, GameSession, GameState};
    pub use crate::input::{Input, InputAction, InputActionAsset, InputManager, Trigger};
    pub use crate::player::{Gauge, Player, PlayerProgression, PlayerStats};
    pub use crate::weapons::{Weapon, WeaponDescriptor, WeaponSlot};
    pub use glam::{Mat4, Quat, Vec2, Vec3};
    pub use winit::keyboard::KeyCode;
}
