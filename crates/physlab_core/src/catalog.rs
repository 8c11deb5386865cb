//! Simulation catalog
//!
//! The catalog is a snapshot of what the launcher can offer. It is built once
//! at startup by walking one directory per configured category under a
//! simulations root:
//!
//! ```text
//! simulations/
//!   Kinematics/
//!     projectile.sim
//!     projectile_description.txt   (optional)
//!     projectile.jpg               (optional thumbnail, .png also accepted)
//!   fluids/
//!     smoke_plume.sim
//! ```
//!
//! Each `<unit>.<ext>` file names a unit. Descriptions and thumbnails are
//! optional and degrade gracefully; only a category directory that cannot be
//! enumerated is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::CatalogError;
use crate::registry::{UnitKey, UnitResolver};
use crate::thumbnail::Thumbnail;

/// Description text used when a unit ships none
pub const NO_DESCRIPTION: &str = "No description available.";

/// Default extension of unit marker files
pub const DEFAULT_UNIT_EXTENSION: &str = "sim";

/// Thumbnail extensions tried in order
const THUMBNAIL_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// One launchable entry in the catalog
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationDescriptor {
    key: UnitKey,
    description: String,
    thumbnail: Option<Thumbnail>,
}

impl SimulationDescriptor {
    pub fn new(key: UnitKey, description: Option<String>, thumbnail: Option<Thumbnail>) -> Self {
        Self {
            key,
            description: description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            thumbnail,
        }
    }

    pub fn key(&self) -> &UnitKey {
        &self.key
    }

    pub fn category(&self) -> &str {
        &self.key.category
    }

    pub fn unit_name(&self) -> &str {
        &self.key.unit
    }

    /// Description text, or [`NO_DESCRIPTION`]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether a real description was found
    pub fn has_description(&self) -> bool {
        self.description != NO_DESCRIPTION
    }

    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }
}

/// A category and its units, sorted by name
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    name: String,
    units: Vec<SimulationDescriptor>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &[SimulationDescriptor] {
        &self.units
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// A unit file that had no registered entry point
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedUnit {
    pub key: UnitKey,
    pub path: PathBuf,
}

/// Ordered, immutable list of categories and their units
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
    skipped: Vec<SkippedUnit>,
}

impl Catalog {
    /// Categories in configured order, empty ones included
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn find(&self, category: &str, unit: &str) -> Option<&SimulationDescriptor> {
        self.category(category)?
            .units
            .iter()
            .find(|d| d.unit_name() == unit)
    }

    /// Every offered descriptor, category by category
    pub fn descriptors(&self) -> impl Iterator<Item = &SimulationDescriptor> + '_ {
        self.categories.iter().flat_map(|c| c.units.iter())
    }

    pub fn keys(&self) -> impl Iterator<Item = UnitKey> + '_ {
        self.descriptors().map(|d| d.key().clone())
    }

    /// Number of offered units
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.units.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unit files left out because nothing could run them
    pub fn skipped(&self) -> &[SkippedUnit] {
        &self.skipped
    }
}

/// Builder that walks the simulations root
///
/// # Example
/// ```ignore
/// let catalog = CatalogBuilder::new("simulations")
///     .with_categories(["Kinematics", "fluids"])
///     .build(&registry)?;
/// ```
#[derive(Clone, Debug)]
pub struct CatalogBuilder {
    root: PathBuf,
    categories: Vec<String>,
    unit_extension: String,
    thumbnail_edge: u32,
    corner_radius: u32,
}

impl CatalogBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            categories: Vec::new(),
            unit_extension: DEFAULT_UNIT_EXTENSION.to_string(),
            thumbnail_edge: 96,
            corner_radius: 12,
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Extension (without the dot) of unit marker files
    pub fn with_unit_extension(mut self, extension: impl Into<String>) -> Self {
        self.unit_extension = extension.into();
        self
    }

    /// Thumbnail box edge and corner radius, in pixels
    pub fn with_thumbnail_size(mut self, edge: u32, corner_radius: u32) -> Self {
        self.thumbnail_edge = edge;
        self.corner_radius = corner_radius;
        self
    }

    /// Walk every category directory and build the catalog
    ///
    /// Unit files that `resolver` cannot run are recorded in
    /// [`Catalog::skipped`] instead of being offered.
    pub fn build(&self, resolver: &impl UnitResolver) -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::default();

        for name in &self.categories {
            let dir = self.root.join(name);
            let mut units = Vec::new();

            for (unit, path) in self.unit_files(name, &dir)? {
                let key = UnitKey::new(name.as_str(), unit.as_str());
                if !resolver.resolves(&key) {
                    log::warn!(
                        "Skipping {}: no simulation is registered under that name",
                        path.display()
                    );
                    catalog.skipped.push(SkippedUnit { key, path });
                    continue;
                }

                let description = read_description(&dir, &unit);
                let thumbnail = self.load_thumbnail(&dir, &unit);
                units.push(SimulationDescriptor::new(key, description, thumbnail));
            }

            log::debug!("Category '{}': {} simulation(s)", name, units.len());
            catalog.categories.push(Category {
                name: name.clone(),
                units,
            });
        }

        log::info!(
            "Catalog built: {} simulation(s) in {} categories",
            catalog.len(),
            catalog.categories.len()
        );
        Ok(catalog)
    }

    /// Unit names and paths in `dir`, sorted by name
    fn unit_files(&self, category: &str, dir: &Path) -> Result<Vec<(String, PathBuf)>, CatalogError> {
        if dir.exists() && !dir.is_dir() {
            return Err(CatalogError::NotADirectory {
                category: category.to_string(),
                path: dir.to_path_buf(),
            });
        }
        let entries = fs::read_dir(dir).map_err(|source| CatalogError::MissingCategory {
            category: category.to_string(),
            path: dir.to_path_buf(),
            source,
        })?;

        let mut found = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(self.unit_extension.as_str()) {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => found.push((stem.to_string(), path.clone())),
                None => log::warn!("Ignoring unit file with a non UTF-8 name: {}", path.display()),
            }
        }

        found.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(found)
    }

    fn load_thumbnail(&self, dir: &Path, unit: &str) -> Option<Thumbnail> {
        let path = THUMBNAIL_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{}", unit, ext)))
            .find(|p| p.is_file())?;

        match Thumbnail::load(&path, self.thumbnail_edge, self.corner_radius) {
            Ok(thumbnail) => Some(thumbnail),
            Err(e) => {
                log::warn!("Ignoring thumbnail {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Trimmed contents of `<unit>_description.txt`, if present and non-empty
fn read_description(dir: &Path, unit: &str) -> Option<String> {
    let path = dir.join(format!("{}_description.txt", unit));
    match fs::read_to_string(&path) {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            None
        }
    }
}
