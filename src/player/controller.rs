//! Camera-relative character movement

use glam::{Quat, Vec3};

use crate::core::PlayerConfig;
use crate::ecs::Transform;
use crate::input::InputSnapshot;

/// Kinematic character motor on a flat ground plane at `y = 0`.
///
/// Movement is relative to the camera: the move axis' `y` goes along the
/// camera's flattened forward and `x` along its right. The body turns to face
/// the camera's forward direction.
#[derive(Debug, Clone, Copy)]
pub struct CharacterMotor {
    /// Gravity acceleration (negative)
    pub gravity: f32,
    /// Small downward speed that keeps the character glued to the ground
    pub grounded_gravity: f32,
    /// Speed multiplier while sprint is held
    pub sprint_multiplier: f32,
    vertical_speed: f32,
    grounded: bool,
}

impl Default for CharacterMotor {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            grounded_gravity: -2.0,
            sprint_multiplier: 1.5,
            vertical_speed: 0.0,
            grounded: true,
        }
    }
}

impl CharacterMotor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the character stood on the ground at the last step
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    #[must_use]
    pub fn vertical_speed(&self) -> f32 {
        self.vertical_speed
    }

    /// Advance one tick and return the velocity that was applied.
    ///
    /// `tuning` falls back to the default player tuning when absent. A zero
    /// `dt` (frozen clock) leaves the transform untouched.
    pub fn step(
        &mut self,
        transform: &mut Transform,
        input: &InputSnapshot,
        camera_forward: Vec3,
        tuning: Option<&PlayerConfig>,
        dt: f32,
    ) -> Vec3 {
        if dt <= 0.0 {
            return Vec3::ZERO;
        }
        let tuning = tuning.copied().unwrap_or_default();

        let forward = flatten(camera_forward);
        let right = forward.cross(Vec3::Y);

        let mut direction = Vec3::ZERO;
        if input.movement.length_squared() > 0.001 && forward != Vec3::ZERO {
            direction = (forward * input.movement.y + right * input.movement.x).normalize_or_zero();
        }

        let mut speed = tuning.move_speed;
        if input.sprint_held {
            speed *= self.sprint_multiplier;
        }

        self.grounded = transform.position.y <= 0.0;
        if self.grounded && self.vertical_speed < 0.0 {
            self.vertical_speed = self.grounded_gravity;
        }
        if self.grounded && input.jump_pressed {
            self.vertical_speed = (tuning.jump_force * -2.0 * self.gravity).sqrt();
        }
        self.vertical_speed += self.gravity * dt;

        let velocity = direction * speed + Vec3::Y * self.vertical_speed;
        transform.translate(velocity * dt);
        if transform.position.y < 0.0 {
            transform.position.y = 0.0;
        }

        if forward != Vec3::ZERO {
            let target = Quat::from_rotation_arc(Vec3::NEG_Z, forward);
            let t = (tuning.rotation_speed.to_radians() * dt).min(1.0);
            transform.rotation = transform.rotation.slerp(target, t);
        }

        velocity
    }
}

/// Project onto the ground plane and normalize
fn flatten(direction: Vec3) -> Vec3 {
    Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero()
}
