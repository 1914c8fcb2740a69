use crate::error::GlobeGenError;
use crate::power_grid::GridSettings;
use crate::sampler::ShellSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

pub const CONFIG_PATH: &str = "globegen_config.toml";

static CONFIG: OnceLock<Mutex<GlobeGenConfig>> = OnceLock::new();

/// Get a copy of the current configuration, loading it on first use.
///
/// A missing or broken config file falls back to [`GlobeGenConfig::default`].
pub fn get_config() -> GlobeGenConfig {
    let config_mutex = CONFIG.get_or_init(|| Mutex::new(load_or_default(CONFIG_PATH)));
    config_mutex
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Re-read the config file, replacing the cached copy.
pub fn reload_config() -> Result<(), GlobeGenError> {
    let new_config = GlobeGenConfig::load_from_file(CONFIG_PATH)?;
    let config_mutex = CONFIG.get_or_init(|| Mutex::new(new_config.clone()));
    *config_mutex.lock().unwrap_or_else(PoisonError::into_inner) = new_config;
    Ok(())
}

fn load_or_default(path: &str) -> GlobeGenConfig {
    if !Path::new(path).exists() {
        log::warn!("{path} not found, using built-in defaults");
        return GlobeGenConfig::default();
    }
    match GlobeGenConfig::load_from_file(path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("{err}; using built-in defaults");
            GlobeGenConfig::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeGenConfig {
    pub globe: GlobeConfig,
    pub grid: GridConfig,
    pub motion: MotionConfig,
    pub moon: MoonConfig,
    pub view: ViewConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub radius: i32,
    pub shell_thickness: f32,
    pub block_size: f32,
    /// Cube edge relative to the lattice spacing; above 1.0 hides seams.
    pub block_overlap: f32,
    /// ASCII map to load instead of the embedded Earth.
    pub map_path: Option<String>,
    pub map_width: usize,
    pub map_height: usize,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: 20,
            shell_thickness: 3.5,
            block_size: 0.11,
            block_overlap: 1.05,
            map_path: None,
            map_width: 128,
            map_height: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub num_towers: usize,
    pub connections_per_tower: usize,
    pub particles_per_line: usize,
    pub max_attempts: usize,
    pub tower_lift: f32,
    pub arc_height: f32,
    pub curve_segments: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Fixed seed for a reproducible grid; random when absent.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        let grid = GridSettings::default();
        Self {
            num_towers: grid.num_towers,
            connections_per_tower: grid.connections_per_tower,
            particles_per_line: grid.particles_per_line,
            max_attempts: grid.max_attempts,
            tower_lift: grid.tower_lift,
            arc_height: grid.arc_height,
            curve_segments: grid.curve_segments,
            min_speed: grid.min_speed,
            max_speed: grid.max_speed,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub globe_spin_speed: f32,
    pub moon_orbit_speed: f32,
    pub moon_spin_speed: f32,
    pub pulse_frequency: f32,
    pub pulse_phase_step: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            globe_spin_speed: 0.1,
            moon_orbit_speed: 0.2,
            moon_spin_speed: 0.05,
            pulse_frequency: 5.0,
            pulse_phase_step: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoonConfig {
    pub enabled: bool,
    pub radius: i32,
    pub shell_thickness: f32,
    pub block_size: f32,
    pub orbit_distance: f32,
    /// Tilt of the orbit plane around Z, in radians.
    pub orbit_tilt: f32,
    pub color: [u8; 3],
}

impl Default for MoonConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            radius: 6,
            shell_thickness: 3.5,
            block_size: 0.085,
            orbit_distance: 3.2,
            orbit_tilt: std::f32::consts::FRAC_PI_6,
            color: [0xcc, 0xcc, 0xcc],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub interactive: bool,
    pub auto_rotate: bool,
    pub camera_distance: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            interactive: true,
            auto_rotate: false,
            camera_distance: 12.0,
            fov: 40.0,
        }
    }
}

impl GlobeGenConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, GlobeGenError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|err| GlobeGenError::io(path.display().to_string(), err))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, GlobeGenError> {
        Ok(toml::from_str(content)?)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), GlobeGenError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|err| GlobeGenError::io(path.display().to_string(), err))
    }

    pub fn shell_settings(&self) -> ShellSettings {
        ShellSettings {
            radius: self.globe.radius,
            thickness: self.globe.shell_thickness,
            block_size: self.globe.block_size,
        }
    }

    pub fn moon_shell_settings(&self) -> ShellSettings {
        ShellSettings {
            radius: self.moon.radius,
            thickness: self.moon.shell_thickness,
            block_size: self.moon.block_size,
        }
    }

    pub fn grid_settings(&self) -> GridSettings {
        GridSettings {
            num_towers: self.grid.num_towers,
            connections_per_tower: self.grid.connections_per_tower,
            particles_per_line: self.grid.particles_per_line,
            max_attempts: self.grid.max_attempts,
            tower_lift: self.grid.tower_lift,
            arc_height: self.grid.arc_height,
            curve_segments: self.grid.curve_segments,
            min_speed: self.grid.min_speed,
            max_speed: self.grid.max_speed,
        }
    }
}
