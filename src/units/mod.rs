//! Built-in simulation units
//!
//! Each unit lives in a module named after its category and exposes one
//! entry point, `main(&mut Runtime)`. The entry point opens the unit's own
//! window on the shared host and returns when that window closes.

pub mod fluids;
pub mod gravitation;
pub mod kinematics;

use std::path::PathBuf;

use physlab_core::{Registry, RegistryError};
use physlab_render::{Host, RenderError};

use crate::config::AppConfig;

/// Everything a unit may use while it runs
pub struct Runtime {
    pub host: Host,
    pub config: AppConfig,
}

impl Runtime {
    pub fn new(config: AppConfig) -> Result<Self, RenderError> {
        let host = Host::new(config.frame.fps, config.window.vsync)?;
        Ok(Self { host, config })
    }

    /// Directory a category's files live in
    pub fn category_dir(&self, category: &str) -> PathBuf {
        self.config.catalog.root.join(category)
    }
}

/// Registry with every built-in unit
pub fn registry() -> Result<Registry<Runtime>, RegistryError> {
    let mut registry = Registry::new();
    registry.register(kinematics::CATEGORY, "projectile", kinematics::projectile::main)?;
    registry.register(
        gravitation::CATEGORY,
        "gravitational_slingshot",
        gravitation::gravitational_slingshot::main,
    )?;
    registry.register(fluids::CATEGORY, "smoke_plume", fluids::smoke_plume::main)?;
    Ok(registry)
}
