//! Viewer configuration.
//!
//! Sources, highest precedence first:
//! 1. Command-line flags
//! 2. Environment variables (`MODEL_CAROUSEL_CONFIG`, `MODEL_CAROUSEL_ASSETS`)
//! 3. JSON configuration file
//! 4. Built-in defaults

use anyhow::{Context, Result};
use glam::Vec3;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{AssetRef, Catalog, CatalogEntry};
use crate::cli::Cli;
use crate::placement::Placement;

pub const CONFIG_ENV: &str = "MODEL_CAROUSEL_CONFIG";
pub const ASSETS_ENV: &str = "MODEL_CAROUSEL_ASSETS";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    /// Root that relative catalog asset paths are resolved against. A
    /// relative root read from a config file (the default included) is
    /// anchored at that file's directory; from the CLI or environment it is
    /// relative to the working directory.
    pub assets_dir: PathBuf,
    /// Replaces the built-in catalog when present
    pub catalog: Option<Vec<CatalogEntryConfig>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub show_fps: bool,
    pub show_ui: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub target: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Direction the light travels, world space
    pub direction: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub sky_color: [f32; 3],
    pub ground_color: [f32; 3],
    pub ambient_intensity: f32,
    pub key_light: LightConfig,
    pub fill_light: LightConfig,
    pub shininess: f32,
    /// Bounding-sphere radius every model is scaled to; `null` keeps authored size
    pub fit_radius: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntryConfig {
    pub name: String,
    pub asset: PathBuf,
    pub camera_position: [f32; 3],
    #[serde(default)]
    pub offset: [f32; 3],
    #[serde(default)]
    pub rotation_degrees: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl CatalogEntryConfig {
    pub fn to_entry(&self, asset_root: &Path) -> CatalogEntry {
        let rotation = Vec3::from_array(self.rotation_degrees);
        CatalogEntry::new(
            self.name.clone(),
            AssetRef::resolve(&self.asset, asset_root),
            Vec3::from_array(self.camera_position),
        )
        .with_placement(Placement {
            offset: Vec3::from_array(self.offset),
            rotation: Vec3::new(
                rotation.x.to_radians(),
                rotation.y.to_radians(),
                rotation.z.to_radians(),
            ),
            scale: self.scale,
        })
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            scene: SceneConfig::default(),
            assets_dir: PathBuf::from("assets/models"),
            catalog: None,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Model Carousel".to_string(),
            width: 1024,
            height: 768,
            show_fps: false,
            show_ui: true,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            target: [0.0, 0.0, 0.0],
            min_distance: 0.75,
            max_distance: 12.0,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: [-0.4, -1.0, -0.6],
            color: [1.0, 0.97, 0.92],
            intensity: 1.1,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sky_color: [0.60, 0.68, 0.80],
            ground_color: [0.18, 0.16, 0.15],
            ambient_intensity: 0.55,
            key_light: LightConfig::default(),
            fill_light: LightConfig {
                direction: [0.7, -0.2, 0.8],
                color: [0.75, 0.82, 1.0],
                intensity: 0.35,
            },
            shininess: 48.0,
            fit_radius: Some(1.0),
        }
    }
}

impl ViewerConfig {
    /// Resolve the configuration from the command line and process environment
    pub fn load(cli: &Cli) -> Result<Self> {
        Self::load_with(cli, |key| std::env::var(key).ok())
    }

    /// Same as [`ViewerConfig::load`] with an injectable environment lookup
    pub fn load_with(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let file = cli
            .config
            .clone()
            .or_else(|| env(CONFIG_ENV).map(PathBuf::from));

        let mut config = match file {
            Some(path) => Self::from_file(&path)?,
            None => {
                debug!("No configuration file given, using defaults");
                Self::default()
            }
        };

        if let Some(dir) = env(ASSETS_ENV) {
            config.assets_dir = PathBuf::from(dir);
        }
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from {:?}", path);
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let mut config =
            Self::from_json(&text).with_context(|| format!("Invalid config file: {:?}", path))?;

        if let Some(dir) = path.parent() {
            if config.assets_dir.is_relative() {
                config.assets_dir = dir.join(&config.assets_dir);
            }
        }
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.assets {
            self.assets_dir = dir.clone();
        }
        if let Some(width) = cli.width {
            self.window.width = width;
        }
        if let Some(height) = cli.height {
            self.window.height = height;
        }
        if cli.show_fps {
            self.window.show_fps = true;
        }
        if cli.no_ui {
            self.window.show_ui = false;
        }
    }

    /// Build the catalog: configured entries if any, else the built-in five
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(entries) => Ok(Catalog::from_config(entries, &self.assets_dir)?),
            None => Ok(Catalog::builtin(&self.assets_dir)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewerError;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn empty_object_yields_defaults() {
        let config = ViewerConfig::from_json("{}").unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.assets_dir, PathBuf::from("assets/models"));
        assert_eq!(config.scene.fit_radius, Some(1.0));
        assert!(config.catalog.is_none());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = ViewerConfig::from_json(r#"{ "window": { "width": 640 }, "scene": { "fit_radius": null } }"#)
            .unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 768);
        assert_eq!(config.scene.fit_radius, None);
        assert_eq!(config.scene.shininess, 48.0);
    }

    #[test]
    fn cli_overrides_environment() {
        let cli = Cli {
            assets: Some(PathBuf::from("from-cli")),
            width: Some(1920),
            no_ui: true,
            ..Cli::default()
        };
        let config = ViewerConfig::load_with(&cli, |key| match key {
            ASSETS_ENV => Some("from-env".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.assets_dir, PathBuf::from("from-cli"));
        assert_eq!(config.window.width, 1920);
        assert!(!config.window.show_ui);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ViewerConfig::load_with(&Cli::default(), |key| match key {
            ASSETS_ENV => Some("/opt/models".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.assets_dir, PathBuf::from("/opt/models"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli {
            config: Some(PathBuf::from("no/such/viewer.json")),
            ..Cli::default()
        };
        let err = ViewerConfig::load_with(&cli, no_env).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }

    fn write_config(name: &str, json: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("model-carousel-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("viewer.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn relative_assets_dir_is_anchored_at_config_file() {
        let path = write_config("relative", r#"{ "assets_dir": "models" }"#);
        let config = ViewerConfig::from_file(&path).unwrap();
        assert_eq!(config.assets_dir, path.parent().unwrap().join("models"));

        let entry = config.catalog().unwrap().get(0).unwrap().asset.path().to_path_buf();
        assert!(entry.starts_with(path.parent().unwrap()));
    }

    #[test]
    fn absolute_assets_dir_in_config_file_is_kept() {
        let path = write_config("absolute", r#"{ "assets_dir": "/srv/models" }"#);
        let config = ViewerConfig::from_file(&path).unwrap();
        assert_eq!(config.assets_dir, PathBuf::from("/srv/models"));
    }

    #[test]
    fn environment_assets_dir_overrides_config_file() {
        let path = write_config("override", r#"{ "assets_dir": "models" }"#);
        let cli = Cli {
            config: Some(path),
            ..Cli::default()
        };
        let config = ViewerConfig::load_with(&cli, |key| match key {
            ASSETS_ENV => Some("local/models".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.assets_dir, PathBuf::from("local/models"));
    }

    #[test]
    fn configured_catalog_resolves_against_assets_dir() {
        let config = ViewerConfig::from_json(
            r#"{
                "assets_dir": "/models",
                "catalog": [
                    { "name": "Cube", "asset": "cube.glb", "camera_position": [0, 1, 4] },
                    { "name": "Fox", "asset": "fox.glb", "camera_position": [2, 1, 2],
                      "offset": [0, -0.5, 0], "rotation_degrees": [0, 90, 0], "scale": 2.0 }
                ]
            }"#,
        )
        .unwrap();

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 2);

        let fox = catalog.get(1).unwrap();
        assert_eq!(fox.asset.path(), Path::new("/models/fox.glb"));
        assert_eq!(fox.placement.offset, Vec3::new(0.0, -0.5, 0.0));
        assert!((fox.placement.rotation.y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(fox.placement.scale, 2.0);
        assert_eq!(catalog.get(0).unwrap().placement, Placement::IDENTITY);
    }

    #[test]
    fn empty_configured_catalog_is_rejected() {
        let config = ViewerConfig::from_json(r#"{ "catalog": [] }"#).unwrap();
        let err = config.catalog().unwrap_err();
        assert_eq!(err.downcast_ref::<ViewerError>(), Some(&ViewerError::EmptyCatalog));
    }

    #[test]
    fn default_config_uses_builtin_catalog() {
        let catalog = ViewerConfig::default().catalog().unwrap();
        assert_eq!(catalog.len(), 5);
    }
}
