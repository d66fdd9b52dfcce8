//! Core engine module
//!
//! Contains the host loop, timing, configuration, scene contract and signals

mod config;
mod engine;
mod events;
mod scene;
mod time;

pub use config::{
    ConfigError, GameConfig, LevelUpBonus, PlayerConfig, ProgressionConfig, load_document,
};
pub use engine::{Engine, EngineConfig, EngineContext, Game};
pub use events::{EventBus, GameFlow, Signal, SubscriptionId};
pub use scene::{LoggingSceneLoader, SceneLoader, SceneNames};
pub use time::{SimulationClock, Time};
