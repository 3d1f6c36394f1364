use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::math::AABB;

/// Per-asset presentation override applied on top of the fitted model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub offset: Vec3,
    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vec3,
    pub scale: f32,
}

impl Placement {
    pub const IDENTITY: Self = Self {
        offset: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: 1.0,
    };

    pub fn raised(dy: f32) -> Self {
        Self {
            offset: Vec3::new(0.0, dy, 0.0),
            ..Self::IDENTITY
        }
    }

    pub fn rotated(rotation: Vec3) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation_quat(),
            self.offset,
        )
    }

    /// Full model transform: fit the bounds to `fit_radius` (if any), then
    /// apply this placement.
    pub fn model_matrix(&self, bounds: &AABB, fit_radius: Option<f32>) -> Mat4 {
        match fit_radius {
            Some(radius) => self.matrix() * bounds.fit_transform(radius),
            None => self.matrix(),
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}
