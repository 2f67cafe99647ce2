//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SBX_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use sandbox_core::{
    ArenaConfig, DragController, ForceFieldConfig, ObjectKind, ProgressionConfig as EngineConfig,
    ProgressionEngine, SpawnParams, TaskDefinition, Vec2, DEFAULT_MAX_DRAG_FORCE, DEFAULT_SPEED_THRESHOLD,
};
use sandbox_input::SpawnSettings;
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Play area and wall configuration
    #[serde(default)]
    pub world: ArenaConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Initial spawn settings
    #[serde(default)]
    pub spawn: SpawnConfig,
    /// Wind and attraction configuration
    #[serde(default)]
    pub forces: ForceFieldConfig,
    /// Levels and tasks
    #[serde(default)]
    pub progression: ProgressionConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
    /// Headless session configuration
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SBX_*`)
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

        // Optional local overrides
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // SBX_PHYSICS__TIMESTEP=0.01 -> physics.timestep = 0.01
        figment = figment.merge(Env::prefixed("SBX_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.physics.timestep > 0.0) {
            return Err(ConfigError::invalid(format!(
                "physics.timestep must be positive, got {}",
                self.physics.timestep
            )));
        }
        Ok(())
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity in pixels/s² (positive y is down)
    pub gravity: [f32; 2],
    /// Fixed simulation step in seconds
    pub timestep: f32,
    /// Force cap of the drag joint
    pub drag_max_force: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 900.0],
            timestep: 1.0 / 60.0,
            drag_max_force: DEFAULT_MAX_DRAG_FORCE,
        }
    }
}

impl PhysicsConfig {
    /// Configuration for the physics world
    pub fn to_physics_config(&self) -> sandbox_core::PhysicsConfig {
        sandbox_core::PhysicsConfig::new(Vec2::new(self.gravity[0], self.gravity[1]))
    }

    pub fn drag_controller(&self) -> DragController {
        DragController::new(self.drag_max_force)
    }
}

/// Spawn settings at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub kind: ObjectKind,
    pub size: f32,
    pub mass: f32,
    pub elasticity: f32,
    pub friction: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        let params = SpawnParams::default();
        Self {
            kind: ObjectKind::Ball,
            size: params.size,
            mass: params.mass,
            elasticity: params.elasticity,
            friction: params.friction,
        }
    }
}

impl SpawnConfig {
    /// Spawn settings, clamped into range
    pub fn settings(&self) -> SpawnSettings {
        SpawnSettings::new(
            self.kind,
            SpawnParams {
                size: self.size,
                mass: self.mass,
                elasticity: self.elasticity,
                friction: self.friction,
            },
        )
    }
}

/// Progression configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Experience needed for the first level-up
    pub initial_threshold: u32,
    /// Threshold multiplier per level-up
    pub threshold_growth: f32,
    /// Number of simultaneously active tasks
    pub active_tasks: usize,
    /// Level-up flash fade per frame
    pub flash_decay: u8,
    /// Speed above which a body counts toward speed tasks
    pub speed_threshold: f32,
    /// Seed for task sampling (random when unset)
    pub seed: Option<u64>,
    /// Task pool
    pub tasks: Vec<TaskDefinition>,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            initial_threshold: engine.initial_threshold,
            threshold_growth: engine.threshold_growth,
            active_tasks: engine.active_tasks,
            flash_decay: engine.flash_decay,
            speed_threshold: DEFAULT_SPEED_THRESHOLD,
            seed: engine.seed,
            tasks: engine.pool,
        }
    }
}

impl ProgressionConfig {
    /// Build the progression engine this configuration describes
    pub fn engine(&self) -> ProgressionEngine {
        ProgressionEngine::new(EngineConfig {
            initial_threshold: self.initial_threshold,
            threshold_growth: self.threshold_growth,
            active_tasks: self.active_tasks,
            flash_decay: self.flash_decay,
            seed: self.seed,
            pool: self.tasks.clone(),
        })
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
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

/// Headless session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of fixed steps the scripted session runs
    pub frames: u32,
    /// Seed for colours and polygon shapes (random when unset)
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frames: 1200,
            seed: None,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: String) -> Self {
        ConfigError { message }
    }
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
