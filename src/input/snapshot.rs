//! Per-tick view of the player's input

use glam::Vec2;

use super::InputAction;

/// Input values cached once per tick.
///
/// Axes and held buttons are re-read from the device every tick. Edge flags
/// are latched when the press happens and stay set until the consumer clears
/// them, so two presses inside one tick read as a single press.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Movement axis, length at most 1
    pub movement: Vec2,
    /// Look delta
    pub look: Vec2,
    pub sprint_held: bool,
    pub crouch_held: bool,
    pub jump_pressed: bool,
    pub attack_pressed: bool,
    pub interact_pressed: bool,
    pub pause_pressed: bool,
    pub cancel_pressed: bool,
}

impl InputSnapshot {
    /// Whether the one-shot flag for `action` is set.
    ///
    /// Always `false` for axis and held-only actions.
    #[must_use]
    pub fn is_pressed(&self, action: InputAction) -> bool {
        match action {
            InputAction::Jump => self.jump_pressed,
            InputAction::Attack => self.attack_pressed,
            InputAction::Interact => self.interact_pressed,
            InputAction::Pause => self.pause_pressed,
            InputAction::Cancel => self.cancel_pressed,
            InputAction::Move | InputAction::Look | InputAction::Sprint | InputAction::Crouch => {
                false
            }
        }
    }

    /// Set the one-shot flag for `action`
    pub fn latch(&mut self, action: InputAction) {
        match action {
            InputAction::Jump => self.jump_pressed = true,
            InputAction::Attack => self.attack_pressed = true,
            InputAction::Interact => self.interact_pressed = true,
            InputAction::Pause => self.pause_pressed = true,
            InputAction::Cancel => self.cancel_pressed = true,
            InputAction::Move | InputAction::Look | InputAction::Sprint | InputAction::Crouch => {}
        }
    }

    /// Clear every one-shot flag
    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.attack_pressed = false;
        self.interact_pressed = false;
        self.pause_pressed = false;
        self.cancel_pressed = false;
    }

    /// Zero the sampled axes and held buttons
    pub(crate) fn clear_sampled(&mut self) {
        self.movement = Vec2::ZERO;
        self.look = Vec2::ZERO;
        self.sprint_held = false;
        self.crouch_held = false;
    }
}
