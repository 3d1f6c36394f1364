use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

pub const ORBIT_SENSITIVITY: f32 = 0.008;
pub const ZOOM_STEP: f32 = 0.1;
/// Keeps the eye off the poles so `look_at` never degenerates
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.05;

/// Camera orbiting a target point, driven by mouse drag and wheel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Angle around +Y, zero looking down -Z
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self {
            target,
            distance: 1.0,
            yaw: 0.0,
            pitch: 0.0,
            fov_y: 45f32.to_radians(),
            near: 0.01,
            far: 100.0,
            min_distance: 0.5,
            max_distance: 20.0,
        };
        camera.reset(position);
        camera
    }

    /// Camera for `config` placed at `position`. Limits are set before the
    /// eye is placed so a distant start position is not clamped to defaults.
    pub fn from_config(config: &CameraConfig, position: Vec3) -> Self {
        let mut camera = Self {
            target: Vec3::from_array(config.target),
            ..Self::default()
        }
        .with_fov(config.fov_degrees)
        .with_limits(config.min_distance, config.max_distance);
        camera.reset(position);
        camera
    }

    pub fn with_limits(mut self, min_distance: f32, max_distance: f32) -> Self {
        self.min_distance = min_distance;
        self.max_distance = max_distance.max(min_distance);
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self
    }

    pub fn with_fov(mut self, fov_y_degrees: f32) -> Self {
        self.fov_y = fov_y_degrees.to_radians();
        self
    }

    /// Move the eye to `position`, keeping the current target
    pub fn reset(&mut self, position: Vec3) {
        let offset = position - self.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            self.distance = self.min_distance;
            self.yaw = 0.0;
            self.pitch = 0.0;
            return;
        }

        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / distance).clamp(-1.0, 1.0).asin().clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch) * self.distance
    }

    /// Drag by a pixel delta; dragging right swings the eye to the left
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch + dy * ORBIT_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Positive steps move closer
    pub fn zoom(&mut self, steps: f32) {
        let factor = (1.0 - ZOOM_STEP).powf(steps);
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(f32::EPSILON), self.near, self.far)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_at(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO)
    }
}
