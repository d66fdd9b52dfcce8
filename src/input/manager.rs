//! Action-level input with mutually exclusive contexts
//!
//! The [`InputManager`] sits between the raw device state and gameplay. It
//! resolves the named actions it needs from an [`InputActionAsset`], keeps
//! exactly one [`InputContext`] active, samples axes once per tick and latches
//! one-shot presses as they arrive.
//!
//! # Example
//!
//! ```ignore
//! let mut input = InputManager::new();
//! input.initialize(Some(&InputActionAsset::with_defaults()));
//!
//! input.on_pressed(InputAction::Jump).subscribe(|_| log::info!("jump!"));
//!
//! // Host delivers a device edge
//! input.handle_edge(Trigger::Key(KeyCode::Space));
//!
//! // Once per tick
//! input.update(&device);
//! if input.snapshot().jump_pressed { /* ... */ }
//! input.reset_edge_flags();
//! ```

use glam::Vec2;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::{ActionDef, InputActionAsset, InputSnapshot, InputSource, Trigger};
use crate::core::{GameFlow, Signal};

// ============================================================================
// Actions and Contexts
// ============================================================================

/// Logical input actions that gameplay reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    // -------------------------------------------------------------------------
    // Player context
    // -------------------------------------------------------------------------
    /// Movement axis
    Move,
    /// Camera look axis
    Look,
    Jump,
    Attack,
    Interact,
    /// Held
    Sprint,
    /// Held
    Crouch,
    Pause,

    // -------------------------------------------------------------------------
    // UI context
    // -------------------------------------------------------------------------
    Cancel,
}

impl InputAction {
    /// Every action, in declaration order
    pub const ALL: [Self; 9] = [
        Self::Move,
        Self::Look,
        Self::Jump,
        Self::Attack,
        Self::Interact,
        Self::Sprint,
        Self::Crouch,
        Self::Pause,
        Self::Cancel,
    ];

    /// Name used to look the action up in an asset
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Move => "Move",
            Self::Look => "Look",
            Self::Jump => "Jump",
            Self::Attack => "Attack",
            Self::Interact => "Interact",
            Self::Sprint => "Sprint",
            Self::Crouch => "Crouch",
            Self::Pause => "Pause",
            Self::Cancel => "Cancel",
        }
    }

    /// Context whose map holds this action
    #[must_use]
    pub const fn context(self) -> InputContext {
        match self {
            Self::Cancel => InputContext::Ui,
            _ => InputContext::Player,
        }
    }

    /// Whether the action produces one-shot presses
    #[must_use]
    pub const fn is_edge(self) -> bool {
        matches!(
            self,
            Self::Jump | Self::Attack | Self::Interact | Self::Pause | Self::Cancel
        )
    }
}

/// Mutually exclusive sets of active bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputContext {
    /// Character control
    Player,
    /// Menus
    Ui,
}

impl InputContext {
    /// Name of the backing action map
    #[must_use]
    pub const fn map_name(self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Ui => "UI",
        }
    }
}

// ============================================================================
// Resolved Maps
// ============================================================================

/// The actions of one context that were found in the asset
#[derive(Debug, Clone)]
struct ResolvedMap {
    actions: FxHashMap<InputAction, ActionDef>,
}

impl ResolvedMap {
    /// Resolve every action belonging to `context`, warning about gaps once
    fn resolve(asset: &InputActionAsset, context: InputContext) -> Option<Self> {
        let map = match asset.find_action_map(context.map_name()) {
            Ok(map) => map,
            Err(e) => {
                log::warn!("InputManager: {e}");
                return None;
            }
        };

        let mut actions = FxHashMap::default();
        for action in InputAction::ALL.into_iter().filter(|a| a.context() == context) {
            match map.find_action(action.name()) {
                Ok(def) => {
                    actions.insert(action, def.clone());
                }
                Err(e) => log::warn!("InputManager: {e}; dependent features disabled"),
            }
        }

        Some(Self { actions })
    }

    fn axis<S: InputSource + ?Sized>(&self, action: InputAction, source: &S) -> Vec2 {
        self.actions.get(&action).map_or(Vec2::ZERO, |def| {
            def.bindings
                .iter()
                .fold(Vec2::ZERO, |acc, binding| acc + source.axis(binding))
        })
    }

    fn held<S: InputSource + ?Sized>(&self, action: InputAction, source: &S) -> bool {
        self.actions
            .get(&action)
            .is_some_and(|def| def.bindings.iter().any(|b| source.is_pressed(b)))
    }

    fn edges_for(&self, trigger: Trigger) -> SmallVec<[InputAction; 2]> {
        InputAction::ALL
            .into_iter()
            .filter(|action| action.is_edge())
            .filter(|action| {
                self.actions
                    .get(action)
                    .is_some_and(|def| def.is_triggered_by(trigger))
            })
            .collect()
    }
}

// ============================================================================
// Input Manager
// ============================================================================

/// Action-level input for one play session.
#[derive(Debug, Default)]
pub struct InputManager {
    player_map: Option<ResolvedMap>,
    ui_map: Option<ResolvedMap>,
    initialized: bool,
    active: Option<InputContext>,
    snapshot: InputSnapshot,
    pressed_signals: FxHashMap<InputAction, Signal<()>>,
}

impl InputManager {
    /// Create an uninitialized manager. It ignores all input until
    /// [`initialize`](Self::initialize) succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve bindings from the session's action asset and activate the
    /// player context.
    ///
    /// A missing asset or a missing `"Player"` map is logged and leaves the
    /// manager inert. A missing `"UI"` map or individual action only disables
    /// what depends on it.
    pub fn initialize(&mut self, asset: Option<&InputActionAsset>) {
        let Some(asset) = asset else {
            log::error!("InputManager: input action asset not assigned");
            return;
        };

        let Some(player_map) = ResolvedMap::resolve(asset, InputContext::Player) else {
            log::error!("InputManager: player bindings unavailable, input disabled");
            return;
        };

        self.player_map = Some(player_map);
        self.ui_map = ResolvedMap::resolve(asset, InputContext::Ui);
        self.initialized = true;
        log::info!("InputManager: bindings loaded from '{}'", asset.name);

        self.enable_player_context();
    }

    /// Whether bindings were resolved
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // -------------------------------------------------------------------------
    // Contexts
    // -------------------------------------------------------------------------

    /// Enable player bindings and disable UI bindings
    pub fn enable_player_context(&mut self) {
        self.switch_context(InputContext::Player);
    }

    /// Enable UI bindings and disable player bindings
    pub fn enable_ui_context(&mut self) {
        self.switch_context(InputContext::Ui);
    }

    fn switch_context(&mut self, context: InputContext) {
        if !self.initialized {
            log::warn!(
                "InputManager: cannot enable {} context before initialization",
                context.map_name()
            );
            return;
        }
        if self.active != Some(context) {
            log::debug!("InputManager: {} context enabled", context.map_name());
        }
        self.active = Some(context);
    }

    /// The context currently enabled, `None` before initialization
    #[must_use]
    pub fn active_context(&self) -> Option<InputContext> {
        self.active
    }

    /// Whether `context` is the enabled one
    #[must_use]
    pub fn is_context_enabled(&self, context: InputContext) -> bool {
        self.active == Some(context)
    }

    /// React to a game flow notification.
    ///
    /// Pausing hands input to the UI context. Resuming always returns control
    /// to the player context.
    pub fn handle_game_flow(&mut self, flow: GameFlow) {
        match flow {
            GameFlow::Paused => {
                self.enable_ui_context();
                log::info!("InputManager: player input disabled (game paused)");
            }
            GameFlow::Resumed => {
                self.enable_player_context();
                log::info!("InputManager: player input enabled (game resumed)");
            }
        }
    }

    fn active_map(&self) -> Option<&ResolvedMap> {
        match self.active? {
            InputContext::Player => self.player_map.as_ref(),
            InputContext::Ui => self.ui_map.as_ref(),
        }
    }

    // -------------------------------------------------------------------------
    // Edges
    // -------------------------------------------------------------------------

    /// Signal fired synchronously whenever `action` is pressed.
    ///
    /// Only edge actions (see [`InputAction::is_edge`]) ever fire.
    pub fn on_pressed(&mut self, action: InputAction) -> &mut Signal<()> {
        self.pressed_signals.entry(action).or_default()
    }

    /// Handle a device edge delivered by the host.
    ///
    /// Every edge action of the active context bound to `trigger` is latched
    /// into the snapshot and its press signal fires immediately. Returns the
    /// actions that fired.
    pub fn handle_edge(&mut self, trigger: Trigger) -> SmallVec<[InputAction; 2]> {
        let fired = match self.active_map() {
            Some(map) => map.edges_for(trigger),
            None => return SmallVec::new(),
        };

        for &action in &fired {
            log::debug!("InputManager: {} pressed", action.name());
            self.snapshot.latch(action);
            if let Some(signal) = self.pressed_signals.get_mut(&action) {
                signal.emit(&());
            }
        }

        fired
    }

    /// Clear one-shot flags. Call once per tick after every consumer has
    /// read them.
    pub fn reset_edge_flags(&mut self) {
        self.snapshot.clear_edges();
    }

    // -------------------------------------------------------------------------
    // Sampling
    // -------------------------------------------------------------------------

    /// Re-read axes and held buttons from the device.
    ///
    /// Reads zero/false unless the player context is active.
    pub fn update<S: InputSource + ?Sized>(&mut self, source: &S) {
        self.snapshot.clear_sampled();

        if self.active != Some(InputContext::Player) {
            return;
        }
        let Some(map) = &self.player_map else {
            return;
        };

        self.snapshot.movement = map
            .axis(InputAction::Move, source)
            .clamp_length_max(1.0);
        self.snapshot.look = map.axis(InputAction::Look, source);
        self.snapshot.sprint_held = map.held(InputAction::Sprint, source);
        self.snapshot.crouch_held = map.held(InputAction::Crouch, source);
    }

    /// Values cached by the last [`update`](Self::update) plus latched edges
    #[must_use]
    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ActionMapDef, Input};
    use std::cell::RefCell;
    use std::rc::Rc;
    use winit::event::{ElementState, MouseButton};
    use winit::keyboard::KeyCode;

    fn initialized() -> InputManager {
        let mut input = InputManager::new();
        input.initialize(Some(&InputActionAsset::with_defaults()));
        input
    }

    #[test]
    fn test_uninitialized_manager_is_inert() {
        let mut input = InputManager::new();
        input.initialize(None);

        assert!(!input.is_initialized());
        input.enable_player_context();
        assert_eq!(input.active_context(), None);
        assert!(input.handle_edge(Trigger::Key(KeyCode::Space)).is_empty());
    }

    #[test]
    fn test_initialize_enables_player_context() {
        let input = initialized();
        assert!(input.is_context_enabled(InputContext::Player));
        assert!(!input.is_context_enabled(InputContext::Ui));
    }

    #[test]
    fn test_contexts_are_exclusive() {
        let mut input = initialized();

        input.enable_ui_context();
        assert!(input.is_context_enabled(InputContext::Ui));
        assert!(!input.is_context_enabled(InputContext::Player));

        input.enable_player_context();
        assert!(input.is_context_enabled(InputContext::Player));
        assert!(!input.is_context_enabled(InputContext::Ui));
    }

    #[test]
    fn test_missing_player_map_leaves_manager_inert() {
        let asset = InputActionAsset {
            name: "UiOnly".to_owned(),
            maps: vec![ActionMapDef {
                name: "UI".to_owned(),
                actions: Vec::new(),
            }],
        };

        let mut input = InputManager::new();
        input.initialize(Some(&asset));

        assert!(!input.is_initialized());
        assert_eq!(input.active_context(), None);
    }

    #[test]
    fn test_missing_action_disables_only_that_action() {
        let mut asset = InputActionAsset::with_defaults();
        asset.maps[0].actions.retain(|a| a.name != "Jump");

        let mut input = InputManager::new();
        input.initialize(Some(&asset));

        assert!(input.is_initialized());
        assert!(input.handle_edge(Trigger::Key(KeyCode::Space)).is_empty());
        assert_eq!(
            input.handle_edge(Trigger::Mouse(MouseButton::Left)).as_slice(),
            &[InputAction::Attack]
        );
    }

    #[test]
    fn test_edge_latches_until_reset() {
        let mut input = initialized();
        let device = Input::new();

        input.handle_edge(Trigger::Key(KeyCode::Space));
        input.update(&device);
        assert!(input.snapshot().jump_pressed);

        // Sampling again does not clear the latch
        input.update(&device);
        assert!(input.snapshot().jump_pressed);

        input.reset_edge_flags();
        assert!(!input.snapshot().jump_pressed);
    }

    #[test]
    fn test_edges_coalesce_within_tick() {
        let mut input = initialized();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        input
            .on_pressed(InputAction::Attack)
            .subscribe(move |_| *counter.borrow_mut() += 1);

        input.handle_edge(Trigger::Mouse(MouseButton::Left));
        input.handle_edge(Trigger::Mouse(MouseButton::Left));

        // Notifications are per edge, the flag is a single latch
        assert_eq!(*hits.borrow(), 2);
        assert!(input.snapshot().attack_pressed);
        input.reset_edge_flags();
        assert!(!input.snapshot().attack_pressed);
    }

    #[test]
    fn test_notification_fires_without_polling() {
        let mut input = initialized();
        let log = Rc::new(RefCell::new(Vec::new()));

        for action in [InputAction::Jump, InputAction::Interact, InputAction::Pause] {
            let sink = Rc::clone(&log);
            input
                .on_pressed(action)
                .subscribe(move |_| sink.borrow_mut().push(action));
        }

        input.handle_edge(Trigger::Key(KeyCode::KeyE));
        input.handle_edge(Trigger::Key(KeyCode::Space));
        input.handle_edge(Trigger::Key(KeyCode::Escape));

        assert_eq!(
            *log.borrow(),
            vec![InputAction::Interact, InputAction::Jump, InputAction::Pause]
        );
    }

    #[test]
    fn test_edges_respect_active_context() {
        let mut input = initialized();

        // Escape means Pause in the player context
        assert_eq!(
            input.handle_edge(Trigger::Key(KeyCode::Escape)).as_slice(),
            &[InputAction::Pause]
        );

        // ...and Cancel in the UI context
        input.enable_ui_context();
        assert_eq!(
            input.handle_edge(Trigger::Key(KeyCode::Escape)).as_slice(),
            &[InputAction::Cancel]
        );
        assert!(input.handle_edge(Trigger::Key(KeyCode::Space)).is_empty());
        assert!(input.snapshot().cancel_pressed);
        assert!(!input.snapshot().jump_pressed);
    }

    #[test]
    fn test_sampling_reads_axes_and_held_buttons() {
        let mut input = initialized();
        let mut device = Input::new();
        device.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        device.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        device.process_keyboard(KeyCode::ShiftLeft, ElementState::Pressed);
        device.process_mouse_delta(Vec2::new(3.0, -1.0));

        input.update(&device);
        let snapshot = input.snapshot();

        assert!((snapshot.movement.length() - 1.0).abs() < 1e-5);
        assert!(snapshot.movement.x > 0.0 && snapshot.movement.y > 0.0);
        assert_eq!(snapshot.look, Vec2::new(3.0, -1.0));
        assert!(snapshot.sprint_held);
        assert!(!snapshot.crouch_held);
    }

    #[test]
    fn test_sampling_in_ui_context_reads_nothing() {
        let mut input = initialized();
        let mut device = Input::new();
        device.process_keyboard(KeyCode::KeyW, ElementState::Pressed);

        input.update(&device);
        assert_ne!(input.snapshot().movement, Vec2::ZERO);

        input.enable_ui_context();
        input.update(&device);
        assert_eq!(input.snapshot().movement, Vec2::ZERO);
        assert!(!input.snapshot().sprint_held);
    }

    #[test]
    fn test_game_flow_forces_contexts() {
        let mut input = initialized();

        input.handle_game_flow(GameFlow::Paused);
        assert!(input.is_context_enabled(InputContext::Ui));

        // Whatever happened in between, resuming hands control back
        input.enable_ui_context();
        input.handle_game_flow(GameFlow::Resumed);
        assert!(input.is_context_enabled(InputContext::Player));
        assert!(!input.is_context_enabled(InputContext::Ui));
    }
}
