use bevy::prelude::Resource;
use globegen::config::GlobeGenConfig;
use globegen::globe::GlobeData;
use globegen::power_grid::PowerGrid;

#[derive(Resource, Clone)]
pub struct GlobeSettings {
    /// Pointer-driven orbit, zoom and pan.
    pub interactive: bool,
    /// Constant-speed spin around Y.
    pub auto_rotate: bool,
    pub show_moon: bool,
    /// Fixed seed for the grid, `None` draws a fresh one per regeneration.
    pub grid_seed: Option<u64>,
    pub config: GlobeGenConfig,
}

impl Default for GlobeSettings {
    fn default() -> Self {
        let config = globegen::get_config();
        Self {
            interactive: config.view.interactive,
            auto_rotate: config.view.auto_rotate,
            show_moon: config.moon.enabled,
            grid_seed: config.grid.seed,
            config,
        }
    }
}

#[derive(Resource, Default)]
pub struct CurrentGlobeData {
    pub globe: Option<GlobeData>,
    pub grid: Option<PowerGrid>,
}

/// Set while egui owns the pointer so the camera ignores drags over the panel.
#[derive(Resource, Default)]
pub struct UiPointerCapture(pub bool);
