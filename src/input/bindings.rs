//! Action Maps and Bindings
//!
//! This module describes how physical inputs map to named actions. Bindings
//! live in an [`InputActionAsset`] that is loaded once at session start, so
//! controls can be changed without touching gameplay code.
//!
//! # Design Principles
//!
//! - **Decoupling**: Physical keys map to named actions, not direct behavior
//! - **Data Driven**: The whole binding table is a RON document
//! - **Named Lookup**: Maps and actions are found by name, and a missing
//!   name is a reportable [`BindingError`] rather than a crash
//!
//! # Example
//!
//! ```ignore
//! let asset = InputActionAsset::load("assets/input_actions.ron")?;
//! let player = asset.find_action_map("Player")?;
//! let jump = player.find_action("Jump")?;
//! assert!(jump.is_triggered_by(Trigger::Key(KeyCode::Space)));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::core::{ConfigError, load_document};

// ============================================================================
// Bindings
// ============================================================================

/// A physical control bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Binding {
    /// A keyboard key
    Key(KeyCode),
    /// A mouse button
    Mouse(MouseButton),
    /// Four keys combined into a 2D axis
    Composite {
        up: KeyCode,
        down: KeyCode,
        left: KeyCode,
        right: KeyCode,
    },
    /// Raw mouse motion for this frame
    MouseDelta,
}

impl Binding {
    /// Whether a device edge on `trigger` fires this binding.
    ///
    /// Axis bindings never fire edges.
    #[must_use]
    pub fn is_triggered_by(&self, trigger: Trigger) -> bool {
        match (*self, trigger) {
            (Self::Key(key), Trigger::Key(pressed)) => key == pressed,
            (Self::Mouse(button), Trigger::Mouse(pressed)) => button == pressed,
            _ => false,
        }
    }
}

/// A physical press reported by the host, once per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Key(KeyCode),
    Mouse(MouseButton),
}

// ============================================================================
// Actions and Maps
// ============================================================================

/// How an action is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Continuous 2D value sampled every tick
    Value,
    /// Held state plus a one-shot edge on press
    Button,
}

/// A named action and everything bound to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDef {
    pub name: String,
    pub kind: ActionKind,
    pub bindings: Vec<Binding>,
}

impl ActionDef {
    /// Create an action with bindings
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ActionKind, bindings: Vec<Binding>) -> Self {
        Self {
            name: name.into(),
            kind,
            bindings,
        }
    }

    /// Whether any binding of this action fires on `trigger`
    #[must_use]
    pub fn is_triggered_by(&self, trigger: Trigger) -> bool {
        self.bindings.iter().any(|b| b.is_triggered_by(trigger))
    }
}

/// A named group of actions that is enabled or disabled as one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMapDef {
    pub name: String,
    pub actions: Vec<ActionDef>,
}

impl ActionMapDef {
    /// Look up an action by name.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::MissingAction`] if the map has no such action
    pub fn find_action(&self, name: &str) -> Result<&ActionDef, BindingError> {
        self.actions
            .iter()
            .find(|action| action.name == name)
            .ok_or_else(|| BindingError::MissingAction {
                map: self.name.clone(),
                action: name.to_owned(),
            })
    }
}

// ============================================================================
// Asset
// ============================================================================

/// The complete binding table for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputActionAsset {
    pub name: String,
    pub maps: Vec<ActionMapDef>,
}

impl InputActionAsset {
    /// Built-in keyboard and mouse layout.
    ///
    /// Player: WASD/arrows move, mouse looks, Space jumps, left mouse attacks,
    /// E interacts, Shift sprints, Ctrl crouches, Escape pauses.
    /// UI: Escape or Backspace cancels.
    #[must_use]
    pub fn with_defaults() -> Self {
        use ActionKind::{Button, Value};

        let player = ActionMapDef {
            name: "Player".to_owned(),
            actions: vec![
                ActionDef::new(
                    "Move",
                    Value,
                    vec![
                        Binding::Composite {
                            up: KeyCode::KeyW,
                            down: KeyCode::KeyS,
                            left: KeyCode::KeyA,
                            right: KeyCode::KeyD,
                        },
                        Binding::Composite {
                            up: KeyCode::ArrowUp,
                            down: KeyCode::ArrowDown,
                            left: KeyCode::ArrowLeft,
                            right: KeyCode::ArrowRight,
                        },
                    ],
                ),
                ActionDef::new("Look", Value, vec![Binding::MouseDelta]),
                ActionDef::new("Jump", Button, vec![Binding::Key(KeyCode::Space)]),
                ActionDef::new("Attack", Button, vec![Binding::Mouse(MouseButton::Left)]),
                ActionDef::new("Interact", Button, vec![Binding::Key(KeyCode::KeyE)]),
                ActionDef::new("Sprint", Button, vec![Binding::Key(KeyCode::ShiftLeft)]),
                ActionDef::new("Crouch", Button, vec![Binding::Key(KeyCode::ControlLeft)]),
                ActionDef::new("Pause", Button, vec![Binding::Key(KeyCode::Escape)]),
            ],
        };

        let ui = ActionMapDef {
            name: "UI".to_owned(),
            actions: vec![ActionDef::new(
                "Cancel",
                Button,
                vec![
                    Binding::Key(KeyCode::Escape),
                    Binding::Key(KeyCode::Backspace),
                ],
            )],
        };

        Self {
            name: "DefaultInputActions".to_owned(),
            maps: vec![player, ui],
        }
    }

    /// Look up an action map by name.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::MissingMap`] if the asset has no such map
    pub fn find_action_map(&self, name: &str) -> Result<&ActionMapDef, BindingError> {
        self.maps
            .iter()
            .find(|map| map.name == name)
            .ok_or_else(|| BindingError::MissingMap(name.to_owned()))
    }

    /// Load from a `.ron` or `.json` file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or malformed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_document(path)
    }

    /// Parse from a RON string
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid asset
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|e| ConfigError::DeserializeError(e.to_string()))
    }
}

impl Default for InputActionAsset {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Errors raised while resolving named maps and actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// No action map with this name
    MissingMap(String),
    /// The map exists but lacks the action
    MissingAction { map: String, action: String },
}

impl std::fmt::Display for BindingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingMap(map) => write!(f, "Action map '{map}' not found"),
            Self::MissingAction { map, action } => {
                write!(f, "Action '{action}' not found in map '{map}'")
            }
        }
    }
}

impl std::error::Error for BindingError {}

// ============================================================================
// Tests
// ============================================================================
