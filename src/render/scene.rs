use glam::{Mat4, Vec3};

use crate::config::{LightConfig, SceneConfig};
use crate::types::SceneUniform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector the light travels along
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl DirectionalLight {
    fn from_config(config: &LightConfig) -> Self {
        let direction = Vec3::from_array(config.direction).try_normalize().unwrap_or(Vec3::NEG_Y);
        Self {
            direction,
            color: Vec3::from_array(config.color),
            intensity: config.intensity.max(0.0),
        }
    }
}

/// Fixed lighting and environment the models are shown in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneRig {
    pub sky_color: Vec3,
    pub ground_color: Vec3,
    pub ambient_intensity: f32,
    pub key: DirectionalLight,
    pub fill: DirectionalLight,
    pub shininess: f32,
}

impl SceneRig {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            sky_color: Vec3::from_array(config.sky_color),
            ground_color: Vec3::from_array(config.ground_color),
            ambient_intensity: config.ambient_intensity.max(0.0),
            key: DirectionalLight::from_config(&config.key_light),
            fill: DirectionalLight::from_config(&config.fill_light),
            shininess: config.shininess.max(1.0),
        }
    }

    /// Background, a darkened blend of the environment towards the sky
    pub fn clear_color(&self) -> wgpu::Color {
        let c = self.ground_color.lerp(self.sky_color, 0.7) * 0.6;
        wgpu::Color {
            r: c.x as f64,
            g: c.y as f64,
            b: c.z as f64,
            a: 1.0,
        }
    }

    pub fn uniform(&self, view_proj: Mat4, model: Mat4, camera_position: Vec3) -> SceneUniform {
        let normal_matrix = model.inverse().transpose();
        SceneUniform {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            camera_position: camera_position.to_array(),
            ambient_intensity: self.ambient_intensity,
            sky_color: self.sky_color.to_array(),
            key_intensity: self.key.intensity,
            ground_color: self.ground_color.to_array(),
            fill_intensity: self.fill.intensity,
            key_direction: self.key.direction.to_array(),
            shininess: self.shininess,
            key_color: self.key.color.to_array(),
            _pad1: 0.0,
            fill_direction: self.fill.direction.to_array(),
            _pad2: 0.0,
            fill_color: self.fill.color.to_array(),
            _pad3: 0.0,
        }
    }
}

impl Default for SceneRig {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}
