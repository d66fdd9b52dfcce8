//! Raw device state

use glam::Vec2;
use rustc_hash::FxHashSet;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

use super::Binding;

/// Live device queries the action layer reads from.
///
/// Anything that can answer these two questions can drive an
/// [`InputManager`](super::InputManager); the winit-backed [`Input`] is the
/// one used by the engine.
pub trait InputSource {
    /// Whether the binding is currently held down
    fn is_pressed(&self, binding: &Binding) -> bool;

    /// Current 2D value of the binding
    fn axis(&self, binding: &Binding) -> Vec2;
}

/// Keyboard and mouse state as reported by winit.
///
/// `just_pressed` sets and the mouse delta cover the current frame only and
/// are cleared by [`update`](Self::update).
#[derive(Debug, Default)]
pub struct Input {
    pressed_keys: FxHashSet<KeyCode>,
    just_pressed_keys: FxHashSet<KeyCode>,
    pressed_mouse_buttons: FxHashSet<MouseButton>,
    just_pressed_mouse_buttons: FxHashSet<MouseButton>,
    mouse_delta: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop per-frame state; the host calls this after `Game::update`
    pub fn update(&mut self) {
        self.just_pressed_keys.clear();
        self.just_pressed_mouse_buttons.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    /// Record a key transition.
    ///
    /// Returns `true` when this is a fresh press (an edge). OS key repeat
    /// does not produce further edges.
    pub fn process_keyboard(&mut self, key_code: KeyCode, state: ElementState) -> bool {
        match state {
            ElementState::Pressed => {
                let fresh = self.pressed_keys.insert(key_code);
                if fresh {
                    self.just_pressed_keys.insert(key_code);
                }
                fresh
            }
            ElementState::Released => {
                self.pressed_keys.remove(&key_code);
                false
            }
        }
    }

    /// Record a mouse button transition.
    ///
    /// Returns `true` when this is a fresh press.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) -> bool {
        match state {
            ElementState::Pressed => {
                let fresh = self.pressed_mouse_buttons.insert(button);
                if fresh {
                    self.just_pressed_mouse_buttons.insert(button);
                }
                fresh
            }
            ElementState::Released => {
                self.pressed_mouse_buttons.remove(&button);
                false
            }
        }
    }

    /// Add relative mouse motion reported by the device
    pub fn process_mouse_delta(&mut self, delta: Vec2) {
        self.mouse_delta += delta;
    }

    /// Whether `key` is held
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Whether `key` went down this frame
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed_keys.contains(&key)
    }

    /// Whether `button` is held
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_mouse_buttons.contains(&button)
    }

    /// Whether `button` went down this frame
    pub fn is_mouse_button_just_pressed(&self, button: MouseButton) -> bool {
        self.just_pressed_mouse_buttons.contains(&button)
    }

    /// Accumulated mouse motion this frame
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }
}

impl InputSource for Input {
    fn is_pressed(&self, binding: &Binding) -> bool {
        match *binding {
            Binding::Key(key) => self.is_key_pressed(key),
            Binding::Mouse(button) => self.is_mouse_button_pressed(button),
            Binding::Composite {
                up,
                down,
                left,
                right,
            } => [up, down, left, right]
                .into_iter()
                .any(|key| self.is_key_pressed(key)),
            Binding::MouseDelta => self.mouse_delta != Vec2::ZERO,
        }
    }

    fn axis(&self, binding: &Binding) -> Vec2 {
        let key = |k: KeyCode| if self.is_key_pressed(k) { 1.0 } else { 0.0 };
        match *binding {
            Binding::Composite {
                up,
                down,
                left,
                right,
            } => Vec2::new(key(right) - key(left), key(up) - key(down)),
            Binding::MouseDelta => self.mouse_delta,
            Binding::Key(_) | Binding::Mouse(_) => Vec2::ZERO,
        }
    }
}
