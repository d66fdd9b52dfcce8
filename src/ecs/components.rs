//! Components shared by gameplay entities

use glam::{Mat4, Quat, Vec3};

/// Placement of an entity.
///
/// For attached entities (see [`Parent`](super::Parent)) the values are local
/// to the parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// No offset, no rotation, unit scale
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Identity rotation and scale at `position`
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Local-to-parent matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Facing direction; entities look down their local -Z
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Move by `delta` without turning
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Human-readable label shown in logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_defaults_to_identity() {
        let transform = Transform::default();
        assert_eq!(transform.matrix(), Mat4::IDENTITY);
        assert_eq!(transform.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn test_transform_translate() {
        let mut transform = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        transform.translate(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 0.0));
    }
}
