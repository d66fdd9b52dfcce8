//! Menu / Playing / Paused state machine

use crate::core::{EventBus, GameFlow, SceneLoader, SceneNames, SimulationClock};
use crate::input::InputManager;

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// In the main menu
    #[default]
    Menu,
    /// Simulation running
    Playing,
    /// Simulation frozen, UI has input
    Paused,
}

/// Collaborators a transition talks to
pub struct GameContext<'a> {
    pub scenes: &'a mut dyn SceneLoader,
    pub input: &'a mut InputManager,
    pub bus: &'a mut EventBus,
}

/// Owner of the authoritative game state and the simulation clock.
///
/// Pausing stops the clock instead of touching any global time scale; systems
/// that should freeze read their delta from [`advance`](Self::advance).
#[derive(Debug, Default)]
pub struct GameManager {
    state: GameState,
    clock: SimulationClock,
}

impl GameManager {
    /// Start in the menu with a running clock
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Advance the simulation clock, returning the gameplay delta
    pub fn advance(&mut self, real_delta: f32) -> f32 {
        self.clock.advance(real_delta)
    }

    /// Enter gameplay from any state
    pub fn start_game(&mut self, ctx: &mut GameContext<'_>) {
        self.state = GameState::Playing;
        self.clock.resume();
        ctx.scenes.load(SceneNames::GAME_SCENE);
        ctx.input.enable_player_context();
        log::info!("Game started");
    }

    /// Return to the main menu from any state
    pub fn go_to_menu(&mut self, ctx: &mut GameContext<'_>) {
        self.state = GameState::Menu;
        self.clock.resume();
        ctx.scenes.load(SceneNames::MAIN_MENU);
        ctx.input.enable_ui_context();
        log::info!("Go to Main Menu");
    }

    /// Freeze the simulation. Only valid while playing; returns whether the
    /// transition happened.
    pub fn pause(&mut self, ctx: &mut GameContext<'_>) -> bool {
        if self.state != GameState::Playing {
            return false;
        }

        self.state = GameState::Paused;
        self.clock.freeze();
        Self::broadcast(ctx, GameFlow::Paused);
        log::info!("Game paused");
        true
    }

    /// Unfreeze the simulation. Only valid while paused; returns whether the
    /// transition happened.
    pub fn resume(&mut self, ctx: &mut GameContext<'_>) -> bool {
        if self.state != GameState::Paused {
            return false;
        }

        self.state = GameState::Playing;
        self.clock.resume();
        Self::broadcast(ctx, GameFlow::Resumed);
        log::info!("Game resumed");
        true
    }

    // The input manager is a fixed listener and hears the flow change before
    // any bus subscriber.
    fn broadcast(ctx: &mut GameContext<'_>, flow: GameFlow) {
        ctx.input.handle_game_flow(flow);
        ctx.bus.raise(flow);
    }
}
