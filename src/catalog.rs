use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec3;

use crate::config::CatalogEntryConfig;
use crate::error::{Result, ViewerError};
use crate::placement::Placement;

/// Opaque reference to a glTF/.glb asset on disk
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRef(PathBuf);

impl AssetRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Anchor a relative reference at `root`; absolute references are kept
    pub fn resolve(path: impl AsRef<Path>, root: &Path) -> Self {
        let path = path.as_ref();
        if path.is_absolute() {
            Self(path.to_path_buf())
        } else {
            Self(root.join(path))
        }
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// One selectable item of the carousel
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub asset: AssetRef,
    pub initial_camera_position: Vec3,
    pub placement: Placement,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, asset: AssetRef, initial_camera_position: Vec3) -> Self {
        Self {
            name: name.into(),
            asset,
            initial_camera_position,
            placement: Placement::IDENTITY,
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

/// Fixed, ordered, non-empty list of entries with unique names
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ViewerError::EmptyCatalog);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(ViewerError::DuplicateEntry(entry.name.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Catalog described in the configuration file, anchored at `asset_root`
    pub fn from_config(entries: &[CatalogEntryConfig], asset_root: &Path) -> Result<Self> {
        Self::new(entries.iter().map(|e| e.to_entry(asset_root)).collect())
    }

    /// The five bundled sample models, resolved against `asset_root`
    pub fn builtin(asset_root: &Path) -> Self {
        let entry = |name: &str, file: &str, camera: [f32; 3]| {
            CatalogEntry::new(name, AssetRef::resolve(file, asset_root), Vec3::from_array(camera))
        };

        Self {
            entries: vec![
                entry("Damaged Helmet", "damaged_helmet.glb", [0.0, 0.3, 3.0]),
                entry("Lantern", "lantern.glb", [1.5, 0.8, 2.5])
                    .with_placement(Placement::raised(-0.35)),
                entry("Boom Box", "boom_box.glb", [0.0, 0.2, 2.6]),
                entry("Duck", "duck.glb", [2.0, 1.0, 2.0])
                    .with_placement(Placement::rotated(Vec3::new(0.0, -std::f32::consts::FRAC_PI_4, 0.0))),
                entry("Avocado", "avocado.glb", [0.0, 0.5, 2.2])
                    .with_placement(Placement::raised(-0.2)),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn wrap_next(&self, index: usize) -> usize {
        (index + 1) % self.len()
    }

    pub fn wrap_previous(&self, index: usize) -> usize {
        (index + self.len() - 1) % self.len()
    }

    pub fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(ViewerError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_five_unique_entries() {
        let catalog = Catalog::builtin(Path::new("assets/models"));
        assert_eq!(catalog.len(), 5);
        assert!(Catalog::new(catalog.entries().to_vec()).is_ok());
    }

    #[test]
    fn builtin_placements_cover_offsets_and_a_rotation() {
        let catalog = Catalog::builtin(Path::new("assets"));
        let raised = catalog.iter().filter(|e| e.placement.offset.y != 0.0).count();
        let rotated = catalog.iter().filter(|e| e.placement.rotation != Vec3::ZERO).count();
        assert_eq!(raised, 2);
        assert_eq!(rotated, 1);
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let root = Path::new("/srv/models");
        assert_eq!(AssetRef::resolve("duck.glb", root).path(), Path::new("/srv/models/duck.glb"));
        assert_eq!(AssetRef::resolve("/tmp/a.glb", root).path(), Path::new("/tmp/a.glb"));
    }

    #[test]
    fn wraparound_in_both_directions() {
        let catalog = Catalog::builtin(Path::new("."));
        assert_eq!(catalog.wrap_next(4), 0);
        assert_eq!(catalog.wrap_previous(0), 4);
        assert_eq!(catalog.wrap_next(1), 2);
        assert_eq!(catalog.wrap_previous(3), 2);
    }

    #[test]
    fn from_config_rejects_duplicate_names() {
        let entry = |name: &str| CatalogEntryConfig {
            name: name.to_string(),
            asset: PathBuf::from("duck.glb"),
            camera_position: [0.0, 0.0, 3.0],
            offset: [0.0; 3],
            rotation_degrees: [0.0; 3],
            scale: 1.0,
        };

        let catalog = Catalog::from_config(&[entry("Duck"), entry("Goose")], Path::new("models")).unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), ["Duck", "Goose"]);

        let err = Catalog::from_config(&[entry("Duck"), entry("Duck")], Path::new("models")).unwrap_err();
        assert_eq!(err, ViewerError::DuplicateEntry("Duck".into()));
    }
}
