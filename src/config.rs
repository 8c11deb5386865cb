//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`PHYSLAB_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

use physlab_math::Vec2;
use physlab_physics::{FlightConfig, PlumeConfig, SlingshotConfig};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Launcher window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Where and how simulations are discovered
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Frame pacing
    #[serde(default)]
    pub frame: FrameConfig,
    /// Projectile simulation
    #[serde(default)]
    pub kinematics: KinematicsConfig,
    /// Slingshot simulation
    #[serde(default)]
    pub gravitation: GravitationConfig,
    /// Smoke plume simulation
    #[serde(default)]
    pub fluids: FluidsConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`PHYSLAB_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // PHYSLAB_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("PHYSLAB_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Launcher window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Simulation Categories".to_string(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

/// Catalog discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding one subdirectory per category
    pub root: PathBuf,
    /// Categories shown as tabs, in order
    pub categories: Vec<String>,
    /// Extension of unit marker files, without the dot
    pub unit_extension: String,
    /// Thumbnail box edge in pixels
    pub thumbnail_size: u32,
    /// Thumbnail corner radius in pixels
    pub corner_radius: u32,
    /// Grid columns per tab
    pub columns: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("simulations"),
            categories: ["Kinematics", "atomics", "fluids", "gravitation", "materials"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            unit_extension: "sim".to_string(),
            thumbnail_size: 96,
            corner_radius: 12,
            columns: 4,
        }
    }
}

/// Frame pacing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Target frames per second for every window
    pub fps: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { fps: 60 }
    }
}

/// Projectile simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicsConfig {
    pub width: u32,
    pub height: u32,
    /// Gravitational acceleration (m/s²)
    pub gravity: f32,
    /// Launch point in window pixels
    pub origin: [f32; 2],
    /// Length of the aim line
    pub aim_radius: f32,
    /// Horizontal advance per frame
    pub step: f32,
    /// Positions kept in each trail
    pub trail_length: usize,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 700,
            gravity: 9.8,
            origin: [20.0, 340.0],
            aim_radius: 250.0,
            step: 2.0,
            trail_length: 50,
        }
    }
}

impl KinematicsConfig {
    pub fn to_flight_config(&self) -> FlightConfig {
        FlightConfig {
            step: self.step,
            trail_length: self.trail_length,
        }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::from_array(self.origin)
    }
}

/// Slingshot simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravitationConfig {
    pub width: u32,
    pub height: u32,
    pub gravitational_constant: f32,
    pub planet_mass: f32,
    pub ship_mass: f32,
    pub planet_radius: f32,
    /// Radius ships are drawn with
    pub ship_radius: f32,
    /// Divisor applied to the launch drag vector
    pub velocity_scale: f32,
    /// Image directory, relative to the category directory
    pub assets_dir: String,
}

impl Default for GravitationConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            gravitational_constant: 5.0,
            planet_mass: 100.0,
            ship_mass: 5.0,
            planet_radius: 50.0,
            ship_radius: 5.0,
            velocity_scale: 100.0,
            assets_dir: "assets".to_string(),
        }
    }
}

/// Smallest launch divisor accepted
const MIN_VELOCITY_SCALE: f32 = 1e-3;

impl GravitationConfig {
    pub fn to_slingshot_config(&self) -> SlingshotConfig {
        let velocity_scale = if self.velocity_scale.is_finite() {
            self.velocity_scale.max(MIN_VELOCITY_SCALE)
        } else {
            GravitationConfig::default().velocity_scale
        };
        SlingshotConfig {
            gravitational_constant: self.gravitational_constant,
            planet_mass: self.planet_mass,
            ship_mass: self.ship_mass,
            planet_radius: self.planet_radius,
            velocity_scale,
            bounds: Vec2::new(self.width as f32, self.height as f32),
        }
    }
}

/// Smoke plume simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluidsConfig {
    pub width: u32,
    pub height: u32,
    /// Domain edge length (square)
    pub domain_size: f32,
    pub smoke_resolution: usize,
    pub velocity_resolution: usize,
    pub inflow_center: [f32; 2],
    pub inflow_radius: f32,
    pub inflow_rate: f32,
    pub buoyancy: f32,
    pub dt: f32,
    pub pressure_iterations: usize,
    pub relaxation: f32,
    pub time_steps: usize,
    /// Close the window after the last step instead of holding the final frame
    pub exit_when_done: bool,
}

impl Default for FluidsConfig {
    fn default() -> Self {
        let plume = PlumeConfig::default();
        Self {
            width: 600,
            height: 640,
            domain_size: plume.bounds.x,
            smoke_resolution: plume.smoke_resolution,
            velocity_resolution: plume.velocity_resolution,
            inflow_center: plume.inflow_center.to_array(),
            inflow_radius: plume.inflow_radius,
            inflow_rate: plume.inflow_rate,
            buoyancy: plume.buoyancy,
            dt: plume.dt,
            pressure_iterations: plume.pressure_iterations,
            relaxation: plume.relaxation,
            time_steps: plume.time_steps,
            exit_when_done: false,
        }
    }
}

impl FluidsConfig {
    pub fn to_plume_config(&self) -> PlumeConfig {
        PlumeConfig {
            bounds: Vec2::new(self.domain_size, self.domain_size),
            smoke_resolution: self.smoke_resolution,
            velocity_resolution: self.velocity_resolution,
            inflow_center: Vec2::from_array(self.inflow_center),
            inflow_radius: self.inflow_radius,
            inflow_rate: self.inflow_rate,
            buoyancy: self.buoyancy,
            dt: self.dt,
            pressure_iterations: self.pressure_iterations,
            relaxation: self.relaxation,
            time_steps: self.time_steps,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
