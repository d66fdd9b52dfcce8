//! Playable demo of the gameplay core
//!
//! Enter starts a game from the menu, Escape pauses and resumes. H, J and K
//! damage, heal and grant experience to the player.

use gameplay::prelude::*;

const GAME_CONFIG_PATH: &str = "assets/game.ron";
const INPUT_ACTIONS_PATH: &str = "assets/input_actions.ron";

/// Demo game hosting one gameplay session
struct DemoGame {
    session: Option<GameSession>,
}

impl DemoGame {
    fn new() -> Self {
        Self { session: None }
    }
}

fn load_game_config() -> GameConfig {
    match GameConfig::load(GAME_CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load {GAME_CONFIG_PATH}: {e}, using defaults");
            GameConfig::default()
        }
    }
}

fn load_input_actions() -> InputActionAsset {
    match InputActionAsset::load(INPUT_ACTIONS_PATH) {
        Ok(asset) => asset,
        Err(e) => {
            log::error!("Failed to load {INPUT_ACTIONS_PATH}: {e}, using built-in bindings");
            InputActionAsset::with_defaults()
        }
    }
}

/// Log what a HUD would display
fn watch_player(player: &mut Player) {
    player
        .stats
        .on_health_changed
        .subscribe(|gauge| log::info!("Health: {}/{}", gauge.current, gauge.max));
    player
        .stats
        .on_mana_changed
        .subscribe(|gauge| log::info!("Mana: {}/{}", gauge.current, gauge.max));
    player
        .stats
        .on_death
        .subscribe(|_| log::info!("Player died"));
    player
        .progression
        .on_level_up
        .subscribe(|level| log::info!("Level up! Now level {level}"));
    player
        .progression
        .on_experience_changed
        .subscribe(|p| log::info!("Experience: {}/{}", p.current, p.required));
    player.publish();
}

impl Game for DemoGame {
    fn init(&mut self, _ctx: &mut EngineContext) {
        log::info!("Initializing demo game");

        let mut session = GameSession::new(
            load_game_config(),
            Some(load_input_actions()),
            LoggingSceneLoader::new(),
        );
        session
            .bus
            .on_game_paused
            .subscribe(|_| log::info!("Pause menu shown"));
        session
            .bus
            .on_game_resumed
            .subscribe(|_| log::info!("Pause menu hidden"));
        session.bootstrap();

        self.session = Some(session);
        log::info!("Press Enter to start");
    }

    fn update(&mut self, ctx: &mut EngineContext) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let dt = ctx.time.delta_seconds();
        session.tick(&mut ctx.world, &ctx.input, dt);
    }

    fn on_input_edge(&mut self, ctx: &mut EngineContext, trigger: Trigger) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match (trigger, session.state()) {
            (Trigger::Key(KeyCode::Enter), GameState::Menu) => {
                session.start_game(&mut ctx.world);
                if let Some(player) = session.player_mut() {
                    watch_player(player);
                }
                return;
            }
            (Trigger::Key(KeyCode::KeyH), GameState::Playing) => {
                if let Some(player) = session.player_mut() {
                    player.stats.take_damage(10.0);
                }
            }
            (Trigger::Key(KeyCode::KeyJ), GameState::Playing) => {
                if let Some(player) = session.player_mut() {
                    player.stats.heal(10.0);
                }
            }
            (Trigger::Key(KeyCode::KeyK), GameState::Playing) => {
                if let Some(player) = session.player_mut() {
                    player.add_experience(50.0);
                }
            }
            (Trigger::Key(KeyCode::KeyM), GameState::Paused) => {
                session.go_to_menu(&mut ctx.world);
                return;
            }
            _ => {}
        }

        session.handle_trigger(&mut ctx.world, trigger);
    }

    fn shutdown(&mut self, _ctx: &mut EngineContext) {
        log::info!("Demo game shutting down");
    }
}

fn main() {
    let config = EngineConfig::default()
        .with_title("Gameplay Demo")
        .with_size(1280, 720);

    let game = DemoGame::new();
    let engine = Engine::new(config, game);

    if let Err(e) = engine.run() {
        eprintln!("Engine error: {}", e);
    }
}
