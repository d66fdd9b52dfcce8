//! Scene transition contract
//!
//! The gameplay core only asks for scenes by name. How a scene is actually
//! loaded belongs to the host.

/// Scene identifiers used by the game flow
pub struct SceneNames;

impl SceneNames {
    /// Entry scene that assembles the session
    pub const BOOTSTRAP: &'static str = "Bootstrap";
    /// Main menu
    pub const MAIN_MENU: &'static str = "MainMenu";
    /// Gameplay scene
    pub const GAME_SCENE: &'static str = "GameScene";
}

/// Host-side scene loading.
///
/// Fire-and-forget: the call returns nothing and cannot fail from the
/// caller's point of view.
pub trait SceneLoader {
    /// Request a switch to the named scene.
    fn load(&mut self, scene: &str);
}

/// Scene loader that only records and logs the active scene name
#[derive(Debug, Default, Clone)]
pub struct LoggingSceneLoader {
    current: Option<String>,
}

impl LoggingSceneLoader {
    /// Create a loader with no scene loaded
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the last requested scene
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

impl SceneLoader for LoggingSceneLoader {
    fn load(&mut self, scene: &str) {
        log::info!("Loading scene: {scene}");
        self.current = Some(scene.to_owned());
    }
}
