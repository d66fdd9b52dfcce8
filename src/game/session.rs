//! Composition root for one play session

use glam::Vec3;
use smallvec::SmallVec;

use super::{GameCommand, GameContext, GameManager, GameState, command_for};
use crate::core::{EventBus, GameConfig, LoggingSceneLoader, SceneLoader};
use crate::ecs::World;
use crate::input::{InputActionAsset, InputManager, InputSource, Trigger};
use crate::player::Player;
use crate::weapons::AttackReport;

/// Everything a play session needs, assembled once and passed around
/// explicitly.
///
/// Device edges go through [`handle_trigger`](Self::handle_trigger) the moment
/// they happen; [`tick`](Self::tick) runs once per frame afterwards.
pub struct GameSession<L: SceneLoader = LoggingSceneLoader> {
    config: GameConfig,
    input_asset: Option<InputActionAsset>,
    manager: GameManager,
    scenes: L,
    player: Option<Player>,
    camera_forward: Vec3,

    /// Action-level input; subscribe to press signals here
    pub input: InputManager,
    /// Pause and resume notifications
    pub bus: EventBus,
}

impl<L: SceneLoader> GameSession<L> {
    pub fn new(config: GameConfig, input_asset: Option<InputActionAsset>, scenes: L) -> Self {
        Self {
            config,
            input_asset,
            manager: GameManager::new(),
            scenes,
            player: None,
            camera_forward: Vec3::NEG_Z,
            input: InputManager::new(),
            bus: EventBus::new(),
        }
    }

    /// Resolve input bindings and open the main menu
    pub fn bootstrap(&mut self) {
        self.input.initialize(self.input_asset.as_ref());
        let mut ctx = GameContext {
            scenes: &mut self.scenes,
            input: &mut self.input,
            bus: &mut self.bus,
        };
        self.manager.go_to_menu(&mut ctx);
        log::info!("Session bootstrapped");
    }

    /// Enter gameplay with a freshly spawned player
    pub fn start_game(&mut self, world: &mut World) {
        let mut ctx = GameContext {
            scenes: &mut self.scenes,
            input: &mut self.input,
            bus: &mut self.bus,
        };
        self.manager.start_game(&mut ctx);

        if let Some(previous) = self.player.take() {
            previous.despawn(world);
        }
        self.player = Some(Player::spawn(world, &self.config));
        self.camera_forward = Vec3::NEG_Z;
    }

    /// Leave gameplay and remove the player
    pub fn go_to_menu(&mut self, world: &mut World) {
        let mut ctx = GameContext {
            scenes: &mut self.scenes,
            input: &mut self.input,
            bus: &mut self.bus,
        };
        self.manager.go_to_menu(&mut ctx);

        if let Some(player) = self.player.take() {
            player.despawn(world);
        }
    }

    pub fn pause(&mut self) -> bool {
        let mut ctx = GameContext {
            scenes: &mut self.scenes,
            input: &mut self.input,
            bus: &mut self.bus,
        };
        self.manager.pause(&mut ctx)
    }

    pub fn resume(&mut self) -> bool {
        let mut ctx = GameContext {
            scenes: &mut self.scenes,
            input: &mut self.input,
            bus: &mut self.bus,
        };
        self.manager.resume(&mut ctx)
    }

    /// Route a device edge through the active bindings and run the commands
    /// it issues. Returns the commands that ran.
    pub fn handle_trigger(
        &mut self,
        world: &mut World,
        trigger: Trigger,
    ) -> SmallVec<[GameCommand; 2]> {
        let mut executed = SmallVec::new();
        for action in self.input.handle_edge(trigger) {
            if let Some(command) = command_for(action, self.manager.state()) {
                self.execute(world, command);
                executed.push(command);
            }
        }
        executed
    }

    /// Run a single command
    pub fn execute(&mut self, world: &mut World, command: GameCommand) -> Option<AttackReport> {
        match command {
            GameCommand::Pause => {
                self.pause();
                None
            }
            GameCommand::Resume => {
                self.resume();
                None
            }
            GameCommand::Attack => match self.player.as_mut() {
                Some(player) => player.weapons.on_attack_edge(world),
                None => {
                    log::warn!("Attack without a player");
                    None
                }
            },
        }
    }

    /// Per-frame update: sample input, advance the clock, move the player and
    /// clear the edge flags. Returns the gameplay delta.
    pub fn tick<S: InputSource + ?Sized>(
        &mut self,
        world: &mut World,
        source: &S,
        real_delta: f32,
    ) -> f32 {
        self.input.update(source);
        let dt = self.manager.advance(real_delta);

        if self.manager.state() == GameState::Playing
            && let Some(player) = self.player.as_mut()
        {
            player.step(world, self.input.snapshot(), self.camera_forward, dt);
        }

        self.input.reset_edge_flags();
        dt
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.manager.state()
    }

    #[must_use]
    pub fn manager(&self) -> &GameManager {
        &self.manager
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn scenes(&self) -> &L {
        &self.scenes
    }

    #[must_use]
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    /// Direction the camera looks; movement is relative to it
    pub fn set_camera_forward(&mut self, forward: Vec3) {
        self.camera_forward = forward;
    }

    #[must_use]
    pub fn camera_forward(&self) -> Vec3 {
        self.camera_forward
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SceneNames;
    use crate::input::{Input, InputAction, InputContext};
    use std::cell::RefCell;
    use std::rc::Rc;
    use winit::event::{ElementState, MouseButton};
    use winit::keyboard::KeyCode;

    const ESCAPE: Trigger = Trigger::Key(KeyCode::Escape);

    fn session() -> GameSession {
        let mut session = GameSession::new(
            GameConfig::default(),
            Some(InputActionAsset::with_defaults()),
            LoggingSceneLoader::new(),
        );
        session.bootstrap();
        session
    }

    #[test]
    fn test_bootstrap_opens_menu() {
        let session = session();

        assert_eq!(session.state(), GameState::Menu);
        assert_eq!(session.scenes().current(), Some(SceneNames::MAIN_MENU));
        assert_eq!(session.input.active_context(), Some(InputContext::Ui));
        assert!(session.player().is_none());
    }

    #[test]
    fn test_start_game_spawns_armed_player() {
        let mut world = World::new();
        let mut session = session();

        session.start_game(&mut world);

        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(session.scenes().current(), Some(SceneNames::GAME_SCENE));
        assert_eq!(session.input.active_context(), Some(InputContext::Player));
        let player = session.player().unwrap();
        assert!(player.weapons.current().is_some());
        assert_eq!(player.stats.health(), 100.0);
    }

    #[test]
    fn test_restart_replaces_player() {
        let mut world = World::new();
        let mut session = session();
        session.start_game(&mut world);
        let first = session.player().unwrap().entity();

        session.start_game(&mut world);

        assert!(!world.contains(first));
        assert_eq!(world.len(), 3);
    }

    #[test]
    fn test_escape_toggles_pause() {
        let mut world = World::new();
        let mut session = session();
        session.start_game(&mut world);

        let commands = session.handle_trigger(&mut world, ESCAPE);
        assert_eq!(commands.as_slice(), &[GameCommand::Pause]);
        assert_eq!(session.state(), GameState::Paused);
        assert!(session.manager().clock().is_frozen());
        assert_eq!(session.input.active_context(), Some(InputContext::Ui));

        // Escape is Cancel in the UI map
        let commands = session.handle_trigger(&mut world, ESCAPE);
        assert_eq!(commands.as_slice(), &[GameCommand::Resume]);
        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(session.input.active_context(), Some(InputContext::Player));
    }

    #[test]
    fn test_escape_in_menu_does_nothing() {
        let mut world = World::new();
        let mut session = session();

        assert!(session.handle_trigger(&mut world, ESCAPE).is_empty());
        assert_eq!(session.state(), GameState::Menu);
    }

    #[test]
    fn test_attack_reaches_weapon() {
        let mut world = World::new();
        let mut session = session();
        session.start_game(&mut world);

        let commands = session.handle_trigger(&mut world, Trigger::Mouse(MouseButton::Left));

        assert_eq!(commands.as_slice(), &[GameCommand::Attack]);
    }

    #[test]
    fn test_attack_ignored_while_paused() {
        let mut world = World::new();
        let mut session = session();
        session.start_game(&mut world);
        session.pause();

        let commands = session.handle_trigger(&mut world, Trigger::Mouse(MouseButton::Left));

        assert!(commands.is_empty());
    }

    #[test]
    fn test_press_signal_fires_before_tick() {
        let mut world = World::new();
        let mut session = session();
        session.start_game(&mut world);
        let jumps = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&jumps);
        session
            .input
            .on_pressed(InputAction::Jump)
            .subscribe(move |_| *counter.borrow_mut() += 1);

        session.handle_trigger(&mut world, Trigger::Key(KeyCode::Space));

        assert_eq!(*jumps.borrow(), 1);
        assert!(session.input.snapshot().jump_pressed);
    }

    #[test]
    fn test_tick_moves_player_and_clears_edges() {
        let mut world = World::new();
        let mut session = session();
        session.start_game(&mut world);
        let mut device = Input::new();
        device.process_keyboard(KeyCode::KeyW, ElementState::Pressed);

        session.handle_trigger(&mut world, Trigger::Key(KeyCode::Space));
        let dt = session.tick(&mut world, &device, 0.1);

        assert_eq!(dt, 0.1);
        let position = session.player().unwrap().position(&world).unwrap();
        assert!(position.z < 0.0);
        assert!(position.y > 0.0);
        assert!(!session.input.snapshot().jump_pressed);
    }

    #[test]
    fn test_paused_tick_freezes_player() {
        let mut world = World::new();
        let mut session = session();
        session.start_game(&mut world);
        session.pause();
        let mut device = Input::new();
        device.process_keyboard(KeyCode::KeyW, ElementState::Pressed);

        let dt = session.tick(&mut world, &device, 0.1);

        assert_eq!(dt, 0.0);
        let position = session.player().unwrap().position(&world).unwrap();
        assert_eq!(position, Vec3::ZERO);
    }

    #[test]
    fn test_go_to_menu_removes_player() {
        let mut world = World::new();
        let mut session = session();
        session.start_game(&mut world);
        session.pause();

        session.go_to_menu(&mut world);

        assert_eq!(session.state(), GameState::Menu);
        assert!(session.player().is_none());
        assert!(world.is_empty());
        assert!(!session.manager().clock().is_frozen());
    }

    #[test]
    fn test_missing_input_asset_leaves_input_inert() {
        let mut world = World::new();
        let mut session =
            GameSession::new(GameConfig::default(), None, LoggingSceneLoader::new());
        session.bootstrap();
        session.start_game(&mut world);

        assert!(!session.input.is_initialized());
        assert!(session.handle_trigger(&mut world, ESCAPE).is_empty());
        assert_eq!(session.state(), GameState::Playing);
    }
}
